//! Animal model, status tuples, logs and forms

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::datetime::{option_timestamp, timestamp};
use super::event::EventWithDetailsAndComments;
use super::user::UserShort;
use super::zoo::Zoo;

/// Animal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i32,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub max_daily_checkouts: i32,
    pub max_daily_checkout_hours: i32,
    /// Mandatory rest after an event, in hours
    pub rest_time: f64,
    #[serde(default = "default_tier")]
    pub tier: i32,
    #[serde(default)]
    pub handling_enabled: bool,
    pub zoo_id: i32,
    #[serde(default)]
    pub daily_checkout_count: i32,
    /// ISO-8601 duration as sent by the server
    #[serde(default)]
    pub daily_checkout_duration: Option<String>,
    #[serde(default, with = "option_timestamp")]
    pub last_checkin_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checked_in: bool,
    /// Raw server-side state (`checked_in`, `checked_out`, `unavailable`)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "option_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_tier() -> i32 {
    1
}

/// Server-computed availability tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    Available,
    Unavailable,
    CheckedOut,
}

impl AnimalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Available => "available",
            AnimalStatus::Unavailable => "unavailable",
            AnimalStatus::CheckedOut => "checked_out",
        }
    }
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `{animal, status, status_description}` tuple from `/animals/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalWithStatus {
    pub animal: Animal,
    pub status: AnimalStatus,
    #[serde(default)]
    pub status_description: String,
    #[serde(default)]
    pub daily_event_count: Option<i64>,
}

/// Animal detail page payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalWithEvents {
    pub animal: Animal,
    #[serde(default)]
    pub upcoming_events: Vec<EventWithDetailsAndComments>,
    #[serde(default)]
    pub current_events: Vec<EventWithDetailsAndComments>,
    #[serde(default)]
    pub past_events: Vec<EventWithDetailsAndComments>,
    pub zoo: Zoo,
    #[serde(default)]
    pub daily_checkout_count: i64,
    /// Hours checked out today
    #[serde(default)]
    pub daily_checkout_duration: f64,
}

/// Checked-out animal with the event it is out for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalWithCurrentEvent {
    pub animal: Animal,
    #[serde(default)]
    pub current_event: Option<EventWithDetailsAndComments>,
}

/// Animal currently resting after a checkin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestingAnimal {
    pub animal_status: AnimalWithStatus,
    #[serde(default)]
    pub weekly_event_activity_hours: f64,
    #[serde(default)]
    pub daily_checkout_count: i64,
    #[serde(default)]
    pub daily_checkout_duration: Option<String>,
}

/// Live feed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalFeed {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(with = "timestamp")]
    pub logged_at: DateTime<Utc>,
    pub by: String,
}

/// Audit trail record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalAudit {
    pub id: i32,
    pub animal_id: i32,
    pub changed_field: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub action: String,
    #[serde(with = "timestamp")]
    pub changed_at: DateTime<Utc>,
    pub changed_by: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalAuditWithDetails {
    pub audit: AnimalAudit,
    pub animal: Animal,
    pub user: UserShort,
}

/// Health log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalHealthLog {
    pub id: i32,
    pub animal_id: i32,
    pub details: String,
    #[serde(with = "timestamp")]
    pub logged_at: DateTime<Utc>,
    pub logged_by: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalHealthLogWithDetails {
    pub log: AnimalHealthLog,
    pub animal: Animal,
    pub user: UserShort,
}

/// Create/update animal form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AnimalForm {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 50, message = "Species must be between 2 and 50 characters"))]
    pub species: String,
    #[validate(length(min = 2, max = 500, message = "Description must be between 2 and 500 characters"))]
    pub description: String,
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,
    pub handling_enabled: bool,
    #[validate(range(min = 1, message = "Max daily checkout hours must be positive"))]
    pub max_daily_checkout_hours: i32,
    #[validate(range(min = 1, message = "Max daily checkouts must be positive"))]
    pub max_daily_checkouts: i32,
    #[validate(range(exclusive_min = 0.0, message = "Rest time must be positive"))]
    pub rest_time: f64,
    #[validate(range(min = 1, max = 4, message = "Tier is required"))]
    pub tier: i32,
    pub zoo_id: i32,
}

impl AnimalForm {
    /// Prefill an update form from an existing animal
    pub fn from_animal(animal: &Animal) -> Self {
        Self {
            name: animal.name.clone(),
            species: animal.species.clone(),
            description: animal.description.clone().unwrap_or_default(),
            image: animal.image.clone().unwrap_or_default(),
            handling_enabled: animal.handling_enabled,
            max_daily_checkout_hours: animal.max_daily_checkout_hours,
            max_daily_checkouts: animal.max_daily_checkouts,
            rest_time: animal.rest_time,
            tier: animal.tier,
            zoo_id: animal.zoo_id,
        }
    }
}

/// Health log entry form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct HealthLogForm {
    #[validate(length(min = 10, message = "Details must be more than 10 characters"))]
    pub details: String,
}
