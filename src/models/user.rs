//! User, role and permission models and related forms

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::datetime::option_timestamp;
use super::event::EventWithDetails;
use super::zoo::{Group, Zoo};
use crate::error::{AppError, AppResult};

/// Permission names known to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionName {
    CreateEvents,
    UpdateEvents,
    DeleteEvents,
    ViewEvents,
    AddAnimal,
    CheckoutAnimals,
    CheckinAnimals,
    ViewAnimals,
    UpdateAnimals,
    DeleteAnimals,
    UpdateUserTier,
    UpdateUserRole,
    UpdateUserGroup,
    AddAnimalHealthLog,
    CreateGroup,
    CreateEventType,
    UpdateEventType,
    DeleteEventType,
    UpdateGroup,
    CreateReports,
    MakeAnimalUnavailable,
    MakeAnimalAvailable,
    DeleteUsers,
    CreateZoo,
    UpdateZoo,
    DeleteZoo,
}

impl PermissionName {
    pub const ALL: [PermissionName; 26] = [
        PermissionName::CreateEvents,
        PermissionName::UpdateEvents,
        PermissionName::DeleteEvents,
        PermissionName::ViewEvents,
        PermissionName::AddAnimal,
        PermissionName::CheckoutAnimals,
        PermissionName::CheckinAnimals,
        PermissionName::ViewAnimals,
        PermissionName::UpdateAnimals,
        PermissionName::DeleteAnimals,
        PermissionName::UpdateUserTier,
        PermissionName::UpdateUserRole,
        PermissionName::UpdateUserGroup,
        PermissionName::AddAnimalHealthLog,
        PermissionName::CreateGroup,
        PermissionName::CreateEventType,
        PermissionName::UpdateEventType,
        PermissionName::DeleteEventType,
        PermissionName::UpdateGroup,
        PermissionName::CreateReports,
        PermissionName::MakeAnimalUnavailable,
        PermissionName::MakeAnimalAvailable,
        PermissionName::DeleteUsers,
        PermissionName::CreateZoo,
        PermissionName::UpdateZoo,
        PermissionName::DeleteZoo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionName::CreateEvents => "create_events",
            PermissionName::UpdateEvents => "update_events",
            PermissionName::DeleteEvents => "delete_events",
            PermissionName::ViewEvents => "view_events",
            PermissionName::AddAnimal => "add_animal",
            PermissionName::CheckoutAnimals => "checkout_animals",
            PermissionName::CheckinAnimals => "checkin_animals",
            PermissionName::ViewAnimals => "view_animals",
            PermissionName::UpdateAnimals => "update_animals",
            PermissionName::DeleteAnimals => "delete_animals",
            PermissionName::UpdateUserTier => "update_user_tier",
            PermissionName::UpdateUserRole => "update_user_role",
            PermissionName::UpdateUserGroup => "update_user_group",
            PermissionName::AddAnimalHealthLog => "add_animal_health_log",
            PermissionName::CreateGroup => "create_group",
            PermissionName::CreateEventType => "create_event_type",
            PermissionName::UpdateEventType => "update_event_type",
            PermissionName::DeleteEventType => "delete_event_type",
            PermissionName::UpdateGroup => "update_group",
            PermissionName::CreateReports => "create_reports",
            PermissionName::MakeAnimalUnavailable => "make_animal_unavailable",
            PermissionName::MakeAnimalAvailable => "make_animal_available",
            PermissionName::DeleteUsers => "delete_users",
            PermissionName::CreateZoo => "create_zoo",
            PermissionName::UpdateZoo => "update_zoo",
            PermissionName::DeleteZoo => "delete_zoo",
        }
    }
}

impl AsRef<str> for PermissionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for PermissionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PermissionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionName::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown permission: {}", s))
    }
}

/// Permission record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default)]
    pub id: Option<i32>,
    /// Kept verbatim, including names this client does not know
    pub name: String,
}

/// Role with its permission set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.name == permission)
    }
}

/// Public user fields, as embedded in events and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserShort {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
    #[serde(default = "default_tier")]
    pub tier: i32,
    #[serde(default)]
    pub role_id: Option<i32>,
    #[serde(default)]
    pub zoo_id: Option<i32>,
    #[serde(default)]
    pub group_id: Option<i32>,
}

impl UserShort {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Authenticated or listed user with role, group and zoo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
    #[serde(default = "default_tier")]
    pub tier: i32,
    #[serde(default)]
    pub role_id: Option<i32>,
    #[serde(default)]
    pub zoo_id: Option<i32>,
    #[serde(default)]
    pub group_id: Option<i32>,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "option_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub zoo: Option<Zoo>,
}

fn default_tier() -> i32 {
    1
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn role_name(&self) -> &str {
        self.role.as_ref().map(|r| r.name.as_str()).unwrap_or("-")
    }

    /// True iff the user's role grants `permission`
    pub fn has_permission(&self, permission: impl AsRef<str>) -> bool {
        self.role
            .as_ref()
            .map(|role| role.grants(permission.as_ref()))
            .unwrap_or(false)
    }

    /// Local gate for privileged commands
    pub fn require_permission(&self, permission: PermissionName) -> AppResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Your role does not grant {}",
                permission
            )))
        }
    }
}

/// Permission gate over possibly missing user data.
///
/// Denies when the user, role or permission list is absent.
pub fn has_permission(user: Option<&User>, permission: impl AsRef<str>) -> bool {
    user.map(|u| u.has_permission(permission)).unwrap_or(false)
}

/// User profile with assigned events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithEvents {
    pub user: User,
    #[serde(default)]
    pub current_events: Vec<EventWithDetails>,
    #[serde(default)]
    pub past_events: Vec<EventWithDetails>,
    #[serde(default)]
    pub upcoming_events: Vec<EventWithDetails>,
}

/// Access token returned by login
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Sign up form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SignUpForm {
    #[validate(length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(length(min = 2, max = 50, message = "Username must be between 2 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 50, message = "Password must be between 8 and 50 characters"))]
    pub password: String,
}

/// Login form, sent form-urlencoded
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 2, message = "Email or username is required"))]
    pub username: String,
    #[validate(length(min = 8, max = 50, message = "Password must be between 8 and 50 characters"))]
    pub password: String,
}

/// Change password form
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_password_confirmation"))]
pub struct ChangePasswordForm {
    #[validate(length(min = 8, max = 50, message = "Current password must be between 8 and 50 characters"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 50, message = "New password must be between 8 and 50 characters"))]
    pub new_password: String,
    #[validate(length(min = 8, max = 50, message = "Confirm password must be between 8 and 50 characters"))]
    pub confirm_password: String,
}

fn validate_password_confirmation(form: &ChangePasswordForm) -> Result<(), ValidationError> {
    if form.new_password != form.confirm_password {
        let mut err = ValidationError::new("password_mismatch");
        err.message = Some("Passwords do not match".into());
        return Err(err);
    }
    Ok(())
}

/// Password change request body
#[derive(Debug, Serialize)]
pub struct UpdatePassword<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

impl ChangePasswordForm {
    pub fn body(&self) -> UpdatePassword<'_> {
        UpdatePassword {
            current_password: &self.current_password,
            new_password: &self.new_password,
        }
    }
}

/// Update own profile form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(min = 2, max = 50, message = "First name must be between 2 and 50 characters"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Role assignment request
#[derive(Debug, Serialize)]
pub struct UpdateRole {
    pub name: String,
}

/// Tier assignment request
#[derive(Debug, Serialize, Validate)]
pub struct UpdateTier {
    #[validate(range(min = 1, max = 4, message = "Tier must be between 1 and 4"))]
    pub tier: i32,
}
