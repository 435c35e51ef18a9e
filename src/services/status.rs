//! Animal status badges
//!
//! Rendering only: the status itself is computed by the server and looked up
//! here by animal id.

use std::collections::HashMap;

use crate::models::animal::{AnimalStatus, AnimalWithStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    CheckCircle,
    XCircle,
}

impl StatusIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::CheckCircle => "✔",
            StatusIcon::XCircle => "✘",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub icon: StatusIcon,
    pub color: StatusColor,
}

impl AnimalStatus {
    pub fn badge(&self) -> StatusBadge {
        match self {
            AnimalStatus::Available => StatusBadge {
                label: "Available",
                icon: StatusIcon::CheckCircle,
                color: StatusColor::Green,
            },
            AnimalStatus::Unavailable => StatusBadge {
                label: "Unavailable",
                icon: StatusIcon::XCircle,
                color: StatusColor::Red,
            },
            AnimalStatus::CheckedOut => StatusBadge {
                label: "Checked Out",
                icon: StatusIcon::XCircle,
                color: StatusColor::Default,
            },
        }
    }
}

/// How much of the status to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDetail {
    /// Selection lists: description only explains unavailability
    Compact,
    /// Detail panels: description for every status
    Verbose,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub badge: StatusBadge,
    pub description: Option<String>,
}

impl StatusLine {
    pub fn new(entry: Option<&AnimalWithStatus>, detail: StatusDetail) -> Self {
        // No entry renders like checked out
        let status = entry.map(|e| e.status).unwrap_or(AnimalStatus::CheckedOut);
        let show_description = match detail {
            StatusDetail::Verbose => true,
            StatusDetail::Compact => status == AnimalStatus::Unavailable,
        };
        let description = entry
            .filter(|_| show_description)
            .map(|e| e.status_description.clone())
            .filter(|d| !d.is_empty());

        Self {
            badge: status.badge(),
            description,
        }
    }

    pub fn render(&self) -> String {
        let head = format!("{} {}", self.badge.icon.glyph(), self.badge.label);
        match &self.description {
            Some(description) => format!("{} ({})", head, description),
            None => head,
        }
    }
}

/// Server-reported statuses indexed by animal id
#[derive(Debug, Clone, Default)]
pub struct StatusIndex {
    by_animal: HashMap<i32, AnimalWithStatus>,
}

impl StatusIndex {
    pub fn new(statuses: Vec<AnimalWithStatus>) -> Self {
        Self {
            by_animal: statuses.into_iter().map(|s| (s.animal.id, s)).collect(),
        }
    }

    pub fn get(&self, animal_id: i32) -> Option<&AnimalWithStatus> {
        self.by_animal.get(&animal_id)
    }

    pub fn status_of(&self, animal_id: i32) -> AnimalStatus {
        self.get(animal_id)
            .map(|s| s.status)
            .unwrap_or(AnimalStatus::CheckedOut)
    }

    pub fn line(&self, animal_id: i32, detail: StatusDetail) -> StatusLine {
        StatusLine::new(self.get(animal_id), detail)
    }

    pub fn len(&self) -> usize {
        self.by_animal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_animal.is_empty()
    }
}
