//! Shared tail of every mutation: toast the outcome, invalidate on success

use std::sync::Arc;

use validator::Validate;

use super::{
    cache::{QueryCache, QueryKey},
    notify::Notifier,
};
use crate::{
    api::ApiMessage,
    error::{AppError, AppResult},
    models::user::{PermissionName, User},
};

#[derive(Clone)]
pub struct Feedback {
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
}

impl Feedback {
    pub fn new(cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
        Self { cache, notifier }
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Toast `result` and drop the `stale` keys when it succeeded
    pub async fn settle(&self, result: AppResult<ApiMessage>, stale: &[QueryKey]) -> AppResult<ApiMessage> {
        match result {
            Ok(message) => {
                tracing::info!("{}", message.message);
                self.notifier().success(&message.message);
                self.cache.invalidate_all(stale).await;
                Ok(message)
            }
            Err(e) => {
                self.notifier().error(&e.toast_message());
                Err(e)
            }
        }
    }

    /// Local refusal (validation, permission) before anything is sent
    pub fn reject<T>(&self, error: AppError) -> AppResult<T> {
        self.notifier().error(&error.toast_message());
        Err(error)
    }

    pub fn guard(&self, user: &User, permission: PermissionName) -> AppResult<()> {
        match user.require_permission(permission) {
            Ok(()) => Ok(()),
            Err(e) => self.reject(e),
        }
    }

    pub fn validate(&self, form: &impl Validate) -> AppResult<()> {
        match form.validate() {
            Ok(()) => Ok(()),
            Err(e) => self.reject(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::{MockNotifier, Toast};

    #[tokio::test]
    async fn test_settle_invalidates_only_on_success() {
        let cache = QueryCache::new();
        let _: i32 = cache.fetch(QueryKey::from(["groups"]), || async { Ok(1) }).await.unwrap();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|t| *t == Toast::Error("Title already used".into()))
            .times(1)
            .return_const(());
        notifier
            .expect_notify()
            .withf(|t| *t == Toast::Success("Group created".into()))
            .times(1)
            .return_const(());
        let feedback = Feedback::new(cache.clone(), Arc::new(notifier));

        let failed: AppResult<ApiMessage> = Err(AppError::Api {
            status: 409,
            detail: "Title already used".to_string(),
        });
        assert!(feedback.settle(failed, &[QueryKey::from(["groups"])]).await.is_err());
        assert_eq!(cache.len().await, 1);

        let ok = Ok(ApiMessage {
            message: "Group created".to_string(),
        });
        feedback.settle(ok, &[QueryKey::from(["groups"])]).await.unwrap();
        assert!(cache.is_empty().await);
    }
}
