//! Account and user administration

use super::{feedback::Feedback, queries::keys};
use crate::{
    api::{ApiClient, ApiMessage},
    error::AppResult,
    models::user::{
        ChangePasswordForm, LoginForm, PermissionName, SignUpForm, Token, UpdateProfileForm, UpdateTier,
        User,
    },
};

#[derive(Clone)]
pub struct UsersService {
    api: ApiClient,
    feedback: Feedback,
}

impl UsersService {
    pub fn new(api: ApiClient, feedback: Feedback) -> Self {
        Self { api, feedback }
    }

    pub async fn signup(&self, form: &SignUpForm) -> AppResult<ApiMessage> {
        self.feedback.validate(form)?;
        let result = self.api.register(form).await;
        self.feedback.settle(result, &[keys::users()]).await
    }

    /// Log in, store the token and drop whatever the previous session cached
    pub async fn login(&self, form: &LoginForm) -> AppResult<Token> {
        self.feedback.validate(form)?;
        match self.api.login(form).await {
            Ok(token) => {
                self.feedback.cache().reset().await;
                self.feedback.notifier().success("Logged in successfully");
                Ok(token)
            }
            Err(e) => self.feedback.reject(e),
        }
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.api.logout()?;
        self.feedback.cache().reset().await;
        self.feedback.notifier().success("Logged out");
        Ok(())
    }

    pub async fn update_profile(&self, form: &UpdateProfileForm) -> AppResult<ApiMessage> {
        self.feedback.validate(form)?;
        let result = self.api.update_profile(form).await;
        self.feedback.settle(result, &[keys::user(), keys::users()]).await
    }

    pub async fn change_password(&self, form: &ChangePasswordForm) -> AppResult<ApiMessage> {
        self.feedback.validate(form)?;
        let result = self.api.change_password(form).await;
        self.feedback.settle(result, &[]).await
    }

    pub async fn set_role(&self, actor: &User, user_id: i32, role: &str) -> AppResult<ApiMessage> {
        self.feedback.guard(actor, PermissionName::UpdateUserRole)?;
        let result = self.api.update_role(user_id, role).await;
        self.feedback
            .settle(result, &[keys::users(), keys::user(), keys::handlers()])
            .await
    }

    pub async fn set_tier(&self, actor: &User, user_id: i32, tier: i32) -> AppResult<ApiMessage> {
        self.feedback.guard(actor, PermissionName::UpdateUserTier)?;
        let form = UpdateTier { tier };
        self.feedback.validate(&form)?;
        let result = self.api.update_tier(user_id, &form).await;
        self.feedback.settle(result, &[keys::users(), keys::user()]).await
    }

    pub async fn set_group(&self, actor: &User, user_id: i32, group_id: Option<i32>) -> AppResult<ApiMessage> {
        self.feedback.guard(actor, PermissionName::UpdateUserGroup)?;
        let result = self.api.update_group(user_id, group_id).await;
        self.feedback.settle(result, &[keys::users(), keys::user()]).await
    }
}
