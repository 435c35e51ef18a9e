use super::{ApiClient, ApiMessage};
use crate::{
    error::AppResult,
    models::event::{EventType, EventTypeForm},
};

impl ApiClient {
    pub async fn list_event_types(&self) -> AppResult<Vec<EventType>> {
        self.get("/event-type/").await
    }

    pub async fn create_event_type(&self, form: &EventTypeForm) -> AppResult<ApiMessage> {
        self.post("/event-type/", form).await
    }

    pub async fn update_event_type(&self, event_type_id: i32, form: &EventTypeForm) -> AppResult<ApiMessage> {
        self.put(&format!("/event-type/{}/", event_type_id), form).await
    }

    pub async fn update_event_type_group(&self, event_type_id: i32, group_id: i32) -> AppResult<ApiMessage> {
        self.put_empty(&format!("/event-type/{}/group/{}", event_type_id, group_id))
            .await
    }

    pub async fn update_event_type_zoo(&self, event_type_id: i32, zoo_id: i32) -> AppResult<ApiMessage> {
        self.put_empty(&format!("/event-type/{}/zoo/{}", event_type_id, zoo_id))
            .await
    }
}
