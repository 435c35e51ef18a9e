use super::{ApiClient, ApiMessage};
use crate::{
    error::AppResult,
    models::zoo::{Group, GroupForm},
};

impl ApiClient {
    pub async fn list_groups(&self) -> AppResult<Vec<Group>> {
        self.get("/groups").await
    }

    pub async fn create_group(&self, form: &GroupForm) -> AppResult<ApiMessage> {
        self.post("/groups", form).await
    }
}
