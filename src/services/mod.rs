//! Dashboard behaviour on top of the API client

pub mod animals;
pub mod assignment;
pub mod cache;
pub mod checkinout;
pub mod events;
pub mod feedback;
pub mod notify;
pub mod organization;
pub mod queries;
pub mod reports;
pub mod session;
pub mod status;
pub mod users;

use std::sync::Arc;

use crate::api::ApiClient;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub cache: cache::QueryCache,
    pub queries: queries::Queries,
    pub animals: animals::AnimalsService,
    pub events: events::EventsService,
    pub checkinout: checkinout::CheckInOutService,
    pub users: users::UsersService,
    pub organization: organization::OrganizationService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services around one client, one cache and one notifier
    pub fn new(api: ApiClient, notifier: Arc<dyn notify::Notifier>) -> Self {
        let cache = cache::QueryCache::new();
        let feedback = feedback::Feedback::new(cache.clone(), notifier.clone());

        Self {
            queries: queries::Queries::new(api.clone(), cache.clone()),
            animals: animals::AnimalsService::new(api.clone(), feedback.clone()),
            events: events::EventsService::new(api.clone(), feedback.clone()),
            checkinout: checkinout::CheckInOutService::new(Arc::new(api.clone()), cache.clone(), notifier),
            users: users::UsersService::new(api.clone(), feedback.clone()),
            organization: organization::OrganizationService::new(api.clone(), feedback.clone()),
            reports: reports::ReportsService::new(api.clone(), feedback),
            cache,
            api,
        }
    }
}
