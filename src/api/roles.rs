use super::ApiClient;
use crate::{error::AppResult, models::user::Role};

impl ApiClient {
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.get("/roles/").await
    }
}
