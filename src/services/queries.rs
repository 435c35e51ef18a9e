//! Cached reads
//!
//! Every read goes through the query cache under a fixed key so mutations
//! can invalidate exactly what they touched.

use chrono::NaiveDate;

use super::cache::{QueryCache, QueryKey};
use crate::{
    api::ApiClient,
    error::AppResult,
    models::{
        animal::{
            Animal, AnimalAuditWithDetails, AnimalFeed, AnimalHealthLogWithDetails,
            AnimalWithCurrentEvent, AnimalWithEvents, AnimalWithStatus, RestingAnimal,
        },
        event::{EventType, EventWithCount, EventWithDetails, EventWithDetailsAndComments, UpcomingLiveEvents},
        user::{Role, User, UserShort, UserWithEvents},
        zoo::{Group, Zoo},
    },
};

pub mod keys {
    use chrono::NaiveDate;

    use crate::services::cache::QueryKey;

    pub fn user() -> QueryKey {
        QueryKey::from(["user"])
    }

    pub fn users() -> QueryKey {
        QueryKey::from(["users"])
    }

    pub fn user_details(user_id: i32) -> QueryKey {
        users().with(user_id)
    }

    pub fn groups() -> QueryKey {
        QueryKey::from(["groups"])
    }

    pub fn handlers() -> QueryKey {
        QueryKey::from(["handlers"])
    }

    pub fn events() -> QueryKey {
        QueryKey::from(["events"])
    }

    pub fn events_details() -> QueryKey {
        QueryKey::from(["events_details"])
    }

    pub fn events_details_on(date: NaiveDate) -> QueryKey {
        events_details().with(date.format("%Y-%m-%d"))
    }

    pub fn event() -> QueryKey {
        QueryKey::from(["event"])
    }

    pub fn event_by_id(event_id: i32) -> QueryKey {
        event().with(event_id)
    }

    pub fn upcoming_live_events() -> QueryKey {
        QueryKey::from(["upcomingLiveEvents"])
    }

    pub fn roles() -> QueryKey {
        QueryKey::from(["roles"])
    }

    pub fn event_types() -> QueryKey {
        QueryKey::from(["eventTypes"])
    }

    pub fn zoos() -> QueryKey {
        QueryKey::from(["zoos"])
    }

    pub fn animals() -> QueryKey {
        QueryKey::from(["animals"])
    }

    /// Lives under `animals` so invalidating the list also drops statuses
    pub fn animal_statuses(zoo_id: Option<i32>) -> QueryKey {
        let key = animals().with("statuses");
        match zoo_id {
            Some(zoo_id) => key.with(zoo_id),
            None => key.with("all"),
        }
    }

    pub fn animal() -> QueryKey {
        QueryKey::from(["animal"])
    }

    pub fn animal_by_id(animal_id: i32) -> QueryKey {
        animal().with(animal_id)
    }

    pub fn animal_details() -> QueryKey {
        QueryKey::from(["animal_details"])
    }

    pub fn animal_details_by_id(animal_id: i32) -> QueryKey {
        animal_details().with(animal_id)
    }

    pub fn animal_audit(animal_id: i32) -> QueryKey {
        QueryKey::from(["animal_audit"]).with(animal_id)
    }

    pub fn animal_health_log(animal_id: i32) -> QueryKey {
        QueryKey::from(["animal_health_log"]).with(animal_id)
    }

    pub fn checked_out_animals() -> QueryKey {
        QueryKey::from(["checkedoutAnimals"])
    }

    pub fn resting_animals() -> QueryKey {
        QueryKey::from(["restingAnimals"])
    }

    pub fn animal_feed() -> QueryKey {
        QueryKey::from(["animal_feed"])
    }

    /// Everything an event edit can change
    pub fn event_related() -> Vec<QueryKey> {
        vec![
            events(),
            events_details(),
            event(),
            upcoming_live_events(),
            animal_details(),
        ]
    }

    /// Everything an animal edit can change
    pub fn animal_related() -> Vec<QueryKey> {
        vec![
            animals(),
            animal(),
            animal_details(),
            checked_out_animals(),
            resting_animals(),
            animal_feed(),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct Queries {
    api: ApiClient,
    cache: QueryCache,
}

impl Queries {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    async fn cached<T, F, Fut>(&self, key: QueryKey, load: F) -> AppResult<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        self.cache.fetch(key, load).await
    }

    pub async fn user(&self) -> AppResult<User> {
        self.cached(keys::user(), || self.api.get_authenticated_user()).await
    }

    pub async fn users(&self) -> AppResult<Vec<User>> {
        self.cached(keys::users(), || self.api.list_users()).await
    }

    pub async fn user_details(&self, user_id: i32) -> AppResult<UserWithEvents> {
        self.cached(keys::user_details(user_id), || self.api.get_user(user_id))
            .await
    }

    pub async fn groups(&self) -> AppResult<Vec<Group>> {
        self.cached(keys::groups(), || self.api.list_groups()).await
    }

    pub async fn handlers(&self) -> AppResult<Vec<UserShort>> {
        self.cached(keys::handlers(), || self.api.list_handlers()).await
    }

    pub async fn events(&self) -> AppResult<Vec<EventWithCount>> {
        self.cached(keys::events(), || self.api.list_events()).await
    }

    pub async fn events_details(&self, date: NaiveDate) -> AppResult<Vec<EventWithDetailsAndComments>> {
        self.cached(keys::events_details_on(date), || self.api.get_events_details(date))
            .await
    }

    pub async fn event(&self, event_id: i32) -> AppResult<EventWithDetails> {
        self.cached(keys::event_by_id(event_id), || self.api.get_event(event_id))
            .await
    }

    pub async fn upcoming_live_events(&self) -> AppResult<UpcomingLiveEvents> {
        self.cached(keys::upcoming_live_events(), || self.api.get_upcoming_live_events())
            .await
    }

    pub async fn roles(&self) -> AppResult<Vec<Role>> {
        self.cached(keys::roles(), || self.api.list_roles()).await
    }

    pub async fn event_types(&self) -> AppResult<Vec<EventType>> {
        self.cached(keys::event_types(), || self.api.list_event_types()).await
    }

    pub async fn zoos(&self) -> AppResult<Vec<Zoo>> {
        self.cached(keys::zoos(), || self.api.list_zoos()).await
    }

    pub async fn animals(&self) -> AppResult<Vec<Animal>> {
        self.cached(keys::animals(), || self.api.list_animals()).await
    }

    pub async fn animal(&self, animal_id: i32) -> AppResult<Animal> {
        self.cached(keys::animal_by_id(animal_id), || self.api.get_animal(animal_id))
            .await
    }

    pub async fn animal_details(&self, animal_id: i32) -> AppResult<AnimalWithEvents> {
        self.cached(keys::animal_details_by_id(animal_id), || {
            self.api.get_animal_details(animal_id)
        })
        .await
    }

    pub async fn animal_statuses(&self, zoo_id: Option<i32>) -> AppResult<Vec<AnimalWithStatus>> {
        self.cached(keys::animal_statuses(zoo_id), || {
            self.api.get_animals_with_status(zoo_id)
        })
        .await
    }

    pub async fn animal_audit_log(&self, animal_id: i32) -> AppResult<Vec<AnimalAuditWithDetails>> {
        self.cached(keys::animal_audit(animal_id), || {
            self.api.get_animal_audit_log(animal_id)
        })
        .await
    }

    pub async fn animal_health_log(&self, animal_id: i32) -> AppResult<Vec<AnimalHealthLogWithDetails>> {
        self.cached(keys::animal_health_log(animal_id), || {
            self.api.get_animal_health_log(animal_id)
        })
        .await
    }

    pub async fn checked_out_animals(&self) -> AppResult<Vec<AnimalWithCurrentEvent>> {
        self.cached(keys::checked_out_animals(), || self.api.get_checked_out_animals())
            .await
    }

    pub async fn resting_animals(&self) -> AppResult<Vec<RestingAnimal>> {
        self.cached(keys::resting_animals(), || self.api.get_resting_animals())
            .await
    }

    pub async fn animal_feed(&self) -> AppResult<Vec<AnimalFeed>> {
        self.cached(keys::animal_feed(), || self.api.get_animal_feed()).await
    }
}

#[cfg(test)]
mod tests {
    use super::keys;
    use chrono::NaiveDate;

    #[test]
    fn test_key_layout() {
        assert_eq!(keys::animal_statuses(Some(2)).parts(), ["animals", "statuses", "2"]);
        assert_eq!(keys::animal_statuses(None).parts(), ["animals", "statuses", "all"]);
        assert!(keys::animal_statuses(None).starts_with(&keys::animals()));

        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(keys::events_details_on(day).parts(), ["events_details", "2024-05-17"]);
        assert!(!keys::animal_by_id(3).starts_with(&keys::animals()));
    }
}
