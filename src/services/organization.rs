//! Event types and groups

use super::{feedback::Feedback, queries::keys};
use crate::{
    api::{ApiClient, ApiMessage},
    error::AppResult,
    models::{
        event::EventTypeForm,
        user::{PermissionName, User},
        zoo::GroupForm,
    },
};

#[derive(Clone)]
pub struct OrganizationService {
    api: ApiClient,
    feedback: Feedback,
}

impl OrganizationService {
    pub fn new(api: ApiClient, feedback: Feedback) -> Self {
        Self { api, feedback }
    }

    pub async fn create_event_type(&self, user: &User, form: &EventTypeForm) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::CreateEventType)?;
        self.feedback.validate(form)?;
        let result = self.api.create_event_type(form).await;
        self.feedback.settle(result, &[keys::event_types()]).await
    }

    pub async fn update_event_type(
        &self,
        user: &User,
        event_type_id: i32,
        form: &EventTypeForm,
    ) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::UpdateEventType)?;
        self.feedback.validate(form)?;
        let result = self.api.update_event_type(event_type_id, form).await;
        self.feedback.settle(result, &[keys::event_types()]).await
    }

    pub async fn move_event_type_to_group(
        &self,
        user: &User,
        event_type_id: i32,
        group_id: i32,
    ) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::UpdateEventType)?;
        let result = self.api.update_event_type_group(event_type_id, group_id).await;
        self.feedback.settle(result, &[keys::event_types()]).await
    }

    pub async fn move_event_type_to_zoo(&self, user: &User, event_type_id: i32, zoo_id: i32) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::UpdateEventType)?;
        let result = self.api.update_event_type_zoo(event_type_id, zoo_id).await;
        self.feedback.settle(result, &[keys::event_types()]).await
    }

    pub async fn create_group(&self, user: &User, form: &GroupForm) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::CreateGroup)?;
        self.feedback.validate(form)?;
        let result = self.api.create_group(form).await;
        self.feedback.settle(result, &[keys::groups()]).await
    }
}
