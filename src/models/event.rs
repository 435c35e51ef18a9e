//! Event model (animal outings, ambassador programs) and related types

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::animal::Animal;
use super::datetime::{option_timestamp, timestamp};
use super::user::UserShort;
use super::zoo::Zoo;
use crate::error::{AppError, AppResult};

/// Event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "timestamp")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_at: DateTime<Utc>,
    pub event_type_id: i32,
    pub zoo_id: i32,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Event {
    /// The event's start time has passed
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_at < now
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_at < now
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.start_at <= now && now <= self.end_at
    }
}

/// Event category, owned by a zoo and optionally a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventType {
    pub id: i32,
    pub name: String,
    pub zoo_id: i32,
    #[serde(default)]
    pub group_id: Option<i32>,
}

/// Checkout/checkin record of one animal for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalEvent {
    pub id: i32,
    pub animal_id: i32,
    pub event_id: i32,
    #[serde(default)]
    pub user_in_id: Option<i32>,
    #[serde(default)]
    pub user_out_id: Option<i32>,
    #[serde(default, with = "option_timestamp")]
    pub checked_in: Option<DateTime<Utc>>,
    #[serde(default, with = "option_timestamp")]
    pub checked_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl AnimalEvent {
    /// Out for this event and not yet returned
    pub fn is_out(&self) -> bool {
        self.checked_out.is_some() && self.checked_in.is_none()
    }
}

/// Handler assignment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub id: i32,
    #[serde(default)]
    pub user_id: Option<i32>,
    #[serde(default)]
    pub event_id: Option<i32>,
    #[serde(default)]
    pub assigner_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventComment {
    pub id: i32,
    pub user_id: i32,
    #[serde(default)]
    pub event_id: Option<i32>,
    pub comment: String,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCommentWithUser {
    pub comment: EventComment,
    pub user: UserShort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalEventWithDetails {
    pub animal_event: AnimalEvent,
    pub animal: Animal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEventWithDetails {
    pub user_event: UserEvent,
    pub user: UserShort,
}

/// Event list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithCount {
    pub event: Event,
    pub event_type: EventType,
    #[serde(default)]
    pub animal_count: i64,
}

/// Event with assigned animals and handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithDetails {
    pub event: Event,
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub users: Vec<UserShort>,
    pub event_type: EventType,
    pub zoo: Zoo,
}

/// Event detail card payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithDetailsAndComments {
    pub event: Event,
    #[serde(default)]
    pub animals: Vec<AnimalEventWithDetails>,
    #[serde(default)]
    pub users: Vec<UserEventWithDetails>,
    pub event_type: EventType,
    pub zoo: Zoo,
    #[serde(default)]
    pub comments: Vec<EventCommentWithUser>,
}

impl EventWithDetailsAndComments {
    pub fn animal_ids(&self) -> Vec<i32> {
        self.animals.iter().map(|a| a.animal.id).collect()
    }

    pub fn handler_ids(&self) -> Vec<i32> {
        self.users.iter().map(|u| u.user.id).collect()
    }
}

/// Events ending in the future, split by whether they are running now
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingLiveEvents {
    #[serde(default)]
    pub live: Vec<EventWithDetailsAndComments>,
    #[serde(default)]
    pub upcoming: Vec<EventWithDetailsAndComments>,
}

/// Event payload for create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventIn {
    pub name: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_at: DateTime<Utc>,
    pub zoo_id: i32,
    pub event_type_id: i32,
}

/// Create/update event request
#[derive(Debug, Clone, Serialize)]
pub struct CreateEventRequest {
    pub event: EventIn,
    pub user_ids: Vec<i32>,
    pub animal_ids: Vec<i32>,
    pub checkout_immediately: bool,
}

/// Event form: a date range plus a time of day for each end
#[derive(Debug, Clone, Validate)]
pub struct EventForm {
    #[validate(length(min = 3, message = "Name is too short"))]
    pub name: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub zoo_id: i32,
    pub event_type_id: i32,
}

impl EventForm {
    /// Check the date range against `today`
    pub fn validate_range(&self, today: NaiveDate) -> AppResult<()> {
        if self.from > self.to {
            return Err(AppError::Validation(
                "Ending date must be after starting date".to_string(),
            ));
        }
        if self.from < today {
            return Err(AppError::Validation(
                "Starting date must be in the future".to_string(),
            ));
        }
        if self.to < today {
            return Err(AppError::Validation(
                "Ending date must be in the future".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and combine date and time of day into `start_at`/`end_at`,
    /// reading both as wall-clock time in `tz`.
    pub fn to_event<Tz: TimeZone>(&self, tz: &Tz, today: NaiveDate) -> AppResult<EventIn> {
        self.validate()?;
        self.validate_range(today)?;

        let start_at = local_to_utc(tz, self.from.and_time(self.start_time))?;
        let end_at = local_to_utc(tz, self.to.and_time(self.end_time))?;
        if start_at >= end_at {
            return Err(AppError::Validation(
                "Ending time must be after starting time".to_string(),
            ));
        }

        Ok(EventIn {
            name: self.name.clone(),
            description: self.description.clone(),
            start_at,
            end_at,
            zoo_id: self.zoo_id,
            event_type_id: self.event_type_id,
        })
    }
}

fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> AppResult<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::Validation(format!("{} does not exist in the local timezone", naive)))
}

/// Create/update event type form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EventTypeForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub zoo_id: i32,
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Comment can't be empty"))]
    pub comment: String,
}

/// Full-replace animal assignment body
#[derive(Debug, Clone, Serialize)]
pub struct AnimalIds<'a> {
    pub animal_ids: &'a [i32],
}

/// Full-replace handler assignment body
#[derive(Debug, Clone, Serialize)]
pub struct UserIds<'a> {
    pub user_ids: &'a [i32],
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::animal::fixtures::animal;

    pub fn event(id: i32, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Event {
        Event {
            id,
            name: "Education Outreach".to_string(),
            description: "School visit with ambassador animals".to_string(),
            start_at,
            end_at,
            event_type_id: 1,
            zoo_id: 1,
            created_at: None,
        }
    }

    pub fn event_details(event: Event, animal_ids: &[i32]) -> EventWithDetailsAndComments {
        EventWithDetailsAndComments {
            animals: animal_ids
                .iter()
                .map(|&id| AnimalEventWithDetails {
                    animal_event: AnimalEvent {
                        id: 100 + id,
                        animal_id: id,
                        event_id: event.id,
                        user_in_id: None,
                        user_out_id: None,
                        checked_in: None,
                        checked_out: None,
                        duration: None,
                    },
                    animal: animal(id, &format!("Animal {}", id)),
                })
                .collect(),
            event,
            users: vec![],
            event_type: EventType {
                id: 1,
                name: "Outreach".to_string(),
                zoo_id: 1,
                group_id: None,
            },
            zoo: Zoo {
                id: 1,
                name: "Hogle Zoo".to_string(),
                location: "Salt Lake City, UT".to_string(),
                information: None,
                created_at: None,
            },
            comments: vec![],
        }
    }
}
