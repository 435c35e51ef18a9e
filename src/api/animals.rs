//! Animal endpoints

use serde::Serialize;

use super::{ApiClient, ApiMessage};
use crate::{
    error::AppResult,
    models::animal::{
        Animal, AnimalAuditWithDetails, AnimalFeed, AnimalForm, AnimalHealthLogWithDetails,
        AnimalWithCurrentEvent, AnimalWithEvents, AnimalWithStatus, HealthLogForm, RestingAnimal,
    },
};

#[derive(Serialize)]
struct ZooFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    zoo_id: Option<i32>,
}

impl ApiClient {
    pub async fn list_animals(&self) -> AppResult<Vec<Animal>> {
        self.get("/animals").await
    }

    pub async fn get_animal(&self, animal_id: i32) -> AppResult<Animal> {
        self.get(&format!("/animals/{}", animal_id)).await
    }

    pub async fn get_animal_details(&self, animal_id: i32) -> AppResult<AnimalWithEvents> {
        self.get(&format!("/animals/{}/details", animal_id)).await
    }

    /// Server-computed status of every animal, optionally for one zoo
    pub async fn get_animals_with_status(&self, zoo_id: Option<i32>) -> AppResult<Vec<AnimalWithStatus>> {
        self.get_with_query("/animals/status", &ZooFilter { zoo_id }).await
    }

    pub async fn create_animal(&self, form: &AnimalForm) -> AppResult<ApiMessage> {
        self.post("/animals", form).await
    }

    pub async fn update_animal(&self, animal_id: i32, form: &AnimalForm) -> AppResult<ApiMessage> {
        self.put(&format!("/animals/{}", animal_id), form).await
    }

    pub async fn delete_animal(&self, animal_id: i32) -> AppResult<ApiMessage> {
        self.delete(&format!("/animals/{}", animal_id)).await
    }

    pub async fn make_animal_unavailable(&self, animal_id: i32) -> AppResult<ApiMessage> {
        self.put_empty(&format!("/animals/{}/unavailable", animal_id)).await
    }

    pub async fn make_animal_available(&self, animal_id: i32) -> AppResult<ApiMessage> {
        self.put_empty(&format!("/animals/{}/available", animal_id)).await
    }

    pub async fn get_animal_audit_log(&self, animal_id: i32) -> AppResult<Vec<AnimalAuditWithDetails>> {
        self.get(&format!("/animals/{}/audits", animal_id)).await
    }

    pub async fn get_animal_health_log(&self, animal_id: i32) -> AppResult<Vec<AnimalHealthLogWithDetails>> {
        self.get(&format!("/animals/{}/health-log", animal_id)).await
    }

    pub async fn create_animal_health_log(&self, animal_id: i32, form: &HealthLogForm) -> AppResult<ApiMessage> {
        self.post(&format!("/animals/{}/health-log", animal_id), form).await
    }

    pub async fn update_animal_health_log(
        &self,
        animal_id: i32,
        log_id: i32,
        form: &HealthLogForm,
    ) -> AppResult<ApiMessage> {
        self.put(&format!("/animals/{}/health-log/{}", animal_id, log_id), form)
            .await
    }

    pub async fn get_checked_out_animals(&self) -> AppResult<Vec<AnimalWithCurrentEvent>> {
        self.get("/animals/details/checkedout").await
    }

    pub async fn get_resting_animals(&self) -> AppResult<Vec<RestingAnimal>> {
        self.get("/animals/details/resting").await
    }

    pub async fn get_animal_feed(&self) -> AppResult<Vec<AnimalFeed>> {
        self.get("/animals/feed").await
    }
}
