//! Zoo and group models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::datetime::option_timestamp;

/// Organizational unit owning animals, events and users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zoo {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub information: Option<String>,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Group of users inside a zoo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i32,
    pub title: String,
    pub zoo_id: i32,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create group form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct GroupForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub zoo_id: i32,
}
