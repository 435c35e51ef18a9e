//! Small shared enumerations

use serde::{Deserialize, Serialize};

/// Difficulty/permission rating for animals and users
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Tier(i32);

impl Tier {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 4;

    pub fn new(value: i32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::MIN..=Self::MAX).map(Tier)
    }
}

impl TryFrom<i32> for Tier {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Tier::new(value).ok_or_else(|| format!("Tier must be between 1 and 4, got {}", value))
    }
}

impl From<Tier> for i32 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier {}", self.0)
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw
            .strip_prefix("Tier ")
            .or_else(|| raw.strip_prefix("tier"))
            .unwrap_or(raw)
            .trim();
        let value: i32 = raw.parse().map_err(|_| format!("Invalid tier: {}", s))?;
        Tier::try_from(value)
    }
}

/// Report export category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportEntity {
    Events,
    Users,
    Animals,
}

impl ReportEntity {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportEntity::Events => "events",
            ReportEntity::Users => "users",
            ReportEntity::Animals => "animals",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportEntity::Events => "Events",
            ReportEntity::Users => "Users",
            ReportEntity::Animals => "Animals",
        }
    }

    /// Download file name, e.g. `report-Events.csv`
    pub fn file_name(&self) -> String {
        format!("report-{}.csv", self.label())
    }
}

impl std::fmt::Display for ReportEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ReportEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "events" => Ok(ReportEntity::Events),
            "users" => Ok(ReportEntity::Users),
            "animals" => Ok(ReportEntity::Animals),
            _ => Err(format!("Invalid report entity: {}", s)),
        }
    }
}
