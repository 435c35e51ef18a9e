//! Event mutations, including saving an edited event card

use chrono::{NaiveDate, TimeZone};

use super::{assignment::EventAssignment, feedback::Feedback, queries::keys};
use crate::{
    api::{ApiClient, ApiMessage},
    error::AppResult,
    models::{
        event::{CommentForm, CreateEventRequest, EventForm},
        user::{PermissionName, User},
    },
};

/// Who and what an event starts with
#[derive(Debug, Clone, Default)]
pub struct EventAssignees {
    pub user_ids: Vec<i32>,
    pub animal_ids: Vec<i32>,
    pub checkout_immediately: bool,
}

#[derive(Clone)]
pub struct EventsService {
    api: ApiClient,
    feedback: Feedback,
}

impl EventsService {
    pub fn new(api: ApiClient, feedback: Feedback) -> Self {
        Self { api, feedback }
    }

    fn request<Tz: TimeZone>(
        &self,
        form: &EventForm,
        assignees: EventAssignees,
        tz: &Tz,
        today: NaiveDate,
    ) -> AppResult<CreateEventRequest> {
        match form.to_event(tz, today) {
            Ok(event) => Ok(CreateEventRequest {
                event,
                user_ids: assignees.user_ids,
                animal_ids: assignees.animal_ids,
                checkout_immediately: assignees.checkout_immediately,
            }),
            Err(e) => self.feedback.reject(e),
        }
    }

    pub async fn create<Tz: TimeZone>(
        &self,
        user: &User,
        form: &EventForm,
        assignees: EventAssignees,
        tz: &Tz,
        today: NaiveDate,
    ) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::CreateEvents)?;
        let request = self.request(form, assignees, tz, today)?;
        let result = self.api.create_event(&request).await;
        let mut stale = keys::event_related();
        stale.push(keys::animals());
        self.feedback.settle(result, &stale).await
    }

    pub async fn update<Tz: TimeZone>(
        &self,
        user: &User,
        event_id: i32,
        form: &EventForm,
        assignees: EventAssignees,
        tz: &Tz,
        today: NaiveDate,
    ) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::UpdateEvents)?;
        let request = self.request(form, assignees, tz, today)?;
        let result = self.api.update_event(event_id, &request).await;
        self.feedback.settle(result, &keys::event_related()).await
    }

    pub async fn delete(&self, user: &User, event_id: i32) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::DeleteEvents)?;
        let result = self.api.delete_event(event_id).await;
        self.feedback.settle(result, &keys::event_related()).await
    }

    pub async fn comment(&self, event_id: i32, form: &CommentForm) -> AppResult<ApiMessage> {
        self.feedback.validate(form)?;
        let result = self.api.add_comment(event_id, form).await;
        self.feedback.settle(result, &keys::event_related()).await
    }

    /// Full-replace the animal set of `event_id`
    pub async fn reassign_animals(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage> {
        let result = self.api.reassign_animals(event_id, animal_ids).await;
        self.feedback.settle(result, &keys::event_related()).await
    }

    /// Full-replace the handler set of `event_id`
    pub async fn reassign_handlers(&self, event_id: i32, user_ids: &[i32]) -> AppResult<ApiMessage> {
        let result = self.api.reassign_handlers(event_id, user_ids).await;
        self.feedback.settle(result, &keys::event_related()).await
    }

    /// "Save" on an event card: sends the animal set and accepts it on success
    pub async fn save_animals(&self, card: &mut EventAssignment) -> AppResult<ApiMessage> {
        let message = self
            .reassign_animals(card.event().id, &card.animals().ids())
            .await?;
        card.animals_mut().commit();
        Ok(message)
    }

    pub async fn save_handlers(&self, card: &mut EventAssignment) -> AppResult<ApiMessage> {
        let message = self
            .reassign_handlers(card.event().id, &card.handlers().ids())
            .await?;
        card.handlers_mut().commit();
        Ok(message)
    }
}
