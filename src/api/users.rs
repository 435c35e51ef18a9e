//! User endpoints

use serde::Serialize;

use super::{ApiClient, ApiMessage};
use crate::{
    error::AppResult,
    models::user::{
        ChangePasswordForm, UpdateProfileForm, UpdateRole, UpdateTier, User, UserShort, UserWithEvents,
    },
};

#[derive(Serialize)]
struct GroupParam {
    group_id: i32,
}

impl ApiClient {
    pub async fn get_authenticated_user(&self) -> AppResult<User> {
        self.get("/users/me/").await
    }

    pub async fn update_profile(&self, form: &UpdateProfileForm) -> AppResult<ApiMessage> {
        self.put("/users/me/", form).await
    }

    pub async fn change_password(&self, form: &ChangePasswordForm) -> AppResult<ApiMessage> {
        self.put("/users/me/password", &form.body()).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.get("/users/").await
    }

    pub async fn get_user(&self, user_id: i32) -> AppResult<UserWithEvents> {
        self.get(&format!("/users/{}/", user_id)).await
    }

    pub async fn list_handlers(&self) -> AppResult<Vec<UserShort>> {
        self.get("/users/handlers/").await
    }

    pub async fn update_role(&self, user_id: i32, role: &str) -> AppResult<ApiMessage> {
        self.put(
            &format!("/users/{}/role/", user_id),
            &UpdateRole {
                name: role.to_string(),
            },
        )
        .await
    }

    pub async fn update_tier(&self, user_id: i32, tier: &UpdateTier) -> AppResult<ApiMessage> {
        self.put(&format!("/users/{}/tier/", user_id), tier).await
    }

    /// Move a user to a group, or out of any group with `None`
    pub async fn update_group(&self, user_id: i32, group_id: Option<i32>) -> AppResult<ApiMessage> {
        let path = format!("/users/{}/group/", user_id);
        match group_id {
            Some(group_id) => self.put_empty_with_query(&path, &GroupParam { group_id }).await,
            None => self.put_empty(&path).await,
        }
    }
}
