use super::ApiClient;
use crate::{error::AppResult, models::zoo::Zoo};

impl ApiClient {
    pub async fn list_zoos(&self) -> AppResult<Vec<Zoo>> {
        self.get("/zoo/").await
    }
}
