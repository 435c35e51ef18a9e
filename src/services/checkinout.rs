//! Batch check-in/out of an event's animals

use std::sync::Arc;

use async_trait::async_trait;

use super::{assignment::CheckMode, cache::QueryCache, notify::Notifier};
use crate::{
    api::{ApiClient, ApiMessage},
    error::AppResult,
    models::user::{PermissionName, User},
};

/// Endpoints moving animals in or out of an event
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimalMovements: Send + Sync {
    async fn check_in(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage>;
    async fn check_out(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage>;
}

#[async_trait]
impl AnimalMovements for ApiClient {
    async fn check_in(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage> {
        self.checkin_animals(event_id, animal_ids).await
    }

    async fn check_out(&self, event_id: i32, animal_ids: &[i32]) -> AppResult<ApiMessage> {
        self.checkout_animals(event_id, animal_ids).await
    }
}

#[derive(Clone)]
pub struct CheckInOutService {
    movements: Arc<dyn AnimalMovements>,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
}

impl CheckInOutService {
    pub fn new(movements: Arc<dyn AnimalMovements>, cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            movements,
            cache,
            notifier,
        }
    }

    /// Send the whole selection in one call. Success resets the entire
    /// query cache; failure leaves it untouched and toasts the server detail.
    pub async fn submit(
        &self,
        user: &User,
        event_id: i32,
        mode: CheckMode,
        animal_ids: &[i32],
    ) -> AppResult<ApiMessage> {
        if let Err(e) = user.require_permission(PermissionName::CheckinAnimals) {
            self.notifier.error(&e.toast_message());
            return Err(e);
        }

        let result = match mode {
            CheckMode::CheckIn => self.movements.check_in(event_id, animal_ids).await,
            CheckMode::CheckOut => self.movements.check_out(event_id, animal_ids).await,
        };

        match result {
            Ok(message) => {
                tracing::info!(
                    "{} of {} animals for event {} accepted",
                    mode.label(),
                    animal_ids.len(),
                    event_id
                );
                self.notifier.success(&message.message);
                self.cache.reset().await;
                Ok(message)
            }
            Err(e) => {
                self.notifier.error(&e.toast_message());
                Err(e)
            }
        }
    }
}
