//! Event endpoints, including animal/handler reassignment and check-in/out

use chrono::NaiveDate;
use serde::Serialize;

use super::{ApiClient, ApiMessage};
use crate::{
    error::AppResult,
    models::event::{
        AnimalIds, CommentForm, CreateEventRequest, EventWithCount, EventWithDetails,
        EventWithDetailsAndComments, UpcomingLiveEvents, UserIds,
    },
};

#[derive(Serialize)]
struct DayFilter {
    #[serde(rename = "_date")]
    date: String,
}

impl ApiClient {
    pub async fn list_events(&self) -> AppResult<Vec<EventWithCount>> {
        self.get("/events").await
    }

    /// Events of one calendar day with animals, handlers and comments
    pub async fn get_events_details(&self, date: NaiveDate) -> AppResult<Vec<EventWithDetailsAndComments>> {
        let filter = DayFilter {
            date: date.format("%Y-%m-%d").to_string(),
        };
        self.get_with_query("/events/details", &filter).await
    }

    pub async fn get_upcoming_live_events(&self) -> AppResult<UpcomingLiveEvents> {
        self.get("/events/details/upcoming-live").await
    }

    pub async fn get_event(&self, event_id: i32) -> AppResult<EventWithDetails> {
        self.get(&format!("/events/{}", event_id)).await
    }

    pub async fn create_event(&self, request: &CreateEventRequest) -> AppResult<ApiMessage> {
        self.post("/events", request).await
    }

    pub async fn update_event(&self, event_id: i32, request: &CreateEventRequest) -> AppResult<ApiMessage> {
        self.put(&format!("/events/{}", event_id), request).await
    }

    pub async fn delete_event(&self, event_id: i32) -> AppResult<ApiMessage> {
        self.delete(&format!("/events/{}", event_id)).await
    }

    pub async fn add_comment(&self, event_id: i32, form: &CommentForm) -> AppResult<ApiMessage> {
        self.post(&format!("/events/{}/comments", event_id), form).await
    }

    /// Replace the full set of animals assigned to an event
    pub async fn reassign_animals(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage> {
        self.put(&format!("/events/{}/animals", event_id), &AnimalIds { animal_ids })
            .await
    }

    /// Replace the full set of handlers assigned to an event
    pub async fn reassign_handlers(&self, event_id: i32, user_ids: &[i32]) -> AppResult<ApiMessage> {
        self.put(&format!("/events/{}/handlers", event_id), &UserIds { user_ids })
            .await
    }

    pub async fn checkout_animals(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage> {
        self.put(&format!("/events/{}/checkout", event_id), &AnimalIds { animal_ids })
            .await
    }

    pub async fn checkin_animals(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage> {
        self.put(&format!("/events/{}/checkin", event_id), &AnimalIds { animal_ids })
            .await
    }
}
