//! Animal mutations

use super::{
    feedback::Feedback,
    queries::keys,
};
use crate::{
    api::{ApiClient, ApiMessage},
    error::AppResult,
    models::{
        animal::{AnimalForm, HealthLogForm},
        user::{PermissionName, User},
    },
};

#[derive(Clone)]
pub struct AnimalsService {
    api: ApiClient,
    feedback: Feedback,
}

impl AnimalsService {
    pub fn new(api: ApiClient, feedback: Feedback) -> Self {
        Self { api, feedback }
    }

    pub async fn create(&self, user: &User, form: &AnimalForm) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::AddAnimal)?;
        self.feedback.validate(form)?;
        let result = self.api.create_animal(form).await;
        self.feedback.settle(result, &keys::animal_related()).await
    }

    pub async fn update(&self, user: &User, animal_id: i32, form: &AnimalForm) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::UpdateAnimals)?;
        self.feedback.validate(form)?;
        let result = self.api.update_animal(animal_id, form).await;
        let mut stale = keys::animal_related();
        stale.push(keys::animal_audit(animal_id));
        self.feedback.settle(result, &stale).await
    }

    pub async fn delete(&self, user: &User, animal_id: i32) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::DeleteAnimals)?;
        let result = self.api.delete_animal(animal_id).await;
        self.feedback.settle(result, &keys::animal_related()).await
    }

    /// Toggle manual availability; each direction has its own permission
    pub async fn set_available(&self, user: &User, animal_id: i32, available: bool) -> AppResult<ApiMessage> {
        let result = if available {
            self.feedback.guard(user, PermissionName::MakeAnimalAvailable)?;
            self.api.make_animal_available(animal_id).await
        } else {
            self.feedback.guard(user, PermissionName::MakeAnimalUnavailable)?;
            self.api.make_animal_unavailable(animal_id).await
        };
        let mut stale = keys::animal_related();
        stale.push(keys::animal_audit(animal_id));
        self.feedback.settle(result, &stale).await
    }

    pub async fn add_health_log(&self, user: &User, animal_id: i32, form: &HealthLogForm) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::AddAnimalHealthLog)?;
        self.feedback.validate(form)?;
        let result = self.api.create_animal_health_log(animal_id, form).await;
        self.feedback
            .settle(result, &[keys::animal_health_log(animal_id)])
            .await
    }

    pub async fn update_health_log(
        &self,
        user: &User,
        animal_id: i32,
        log_id: i32,
        form: &HealthLogForm,
    ) -> AppResult<ApiMessage> {
        self.feedback.guard(user, PermissionName::AddAnimalHealthLog)?;
        self.feedback.validate(form)?;
        let result = self.api.update_animal_health_log(animal_id, log_id, form).await;
        self.feedback
            .settle(result, &[keys::animal_health_log(animal_id)])
            .await
    }
}
