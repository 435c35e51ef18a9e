//! Event card state: animal and handler assignment, then check-in/out
//!
//! The card starts in `Assign`. Editing the selection makes it dirty and
//! offers "Save" (full replace). A clean selection offers the check path,
//! which is check-in once the event has started and check-out before.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::models::{
    event::{Event, EventWithDetails, EventWithDetailsAndComments},
    user::{PermissionName, User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    CheckIn,
    CheckOut,
}

impl CheckMode {
    /// The one rule deciding which batch movement an event offers
    pub fn offered_for(event: &Event, now: DateTime<Utc>) -> Self {
        if event.has_started(now) {
            CheckMode::CheckIn
        } else {
            CheckMode::CheckOut
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckMode::CheckIn => "Check In",
            CheckMode::CheckOut => "Check Out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalView {
    Assign,
    CheckIn,
    CheckOut,
}

impl AnimalView {
    pub fn mode(&self) -> Option<CheckMode> {
        match self {
            AnimalView::Assign => None,
            AnimalView::CheckIn => Some(CheckMode::CheckIn),
            AnimalView::CheckOut => Some(CheckMode::CheckOut),
        }
    }
}

impl From<CheckMode> for AnimalView {
    fn from(mode: CheckMode) -> Self {
        match mode {
            CheckMode::CheckIn => AnimalView::CheckIn,
            CheckMode::CheckOut => AnimalView::CheckOut,
        }
    }
}

/// What the assign view offers for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignAction {
    Save,
    Proceed(CheckMode),
}

/// What the check view's submit button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckAction {
    Submit(CheckMode),
    Cancel,
}

/// Edited set of ids compared against what the server has assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    assigned: BTreeSet<i32>,
    selected: BTreeSet<i32>,
}

impl Selection {
    pub fn new(assigned: impl IntoIterator<Item = i32>) -> Self {
        let assigned: BTreeSet<i32> = assigned.into_iter().collect();
        Self {
            selected: assigned.clone(),
            assigned,
        }
    }

    pub fn toggle(&mut self, id: i32) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = i32>) {
        self.selected = ids.into_iter().collect();
    }

    pub fn is_selected(&self, id: i32) -> bool {
        self.selected.contains(&id)
    }

    /// Set comparison: order and duplicates do not count
    pub fn is_dirty(&self) -> bool {
        self.selected != self.assigned
    }

    pub fn ids(&self) -> Vec<i32> {
        self.selected.iter().copied().collect()
    }

    pub fn assigned(&self) -> Vec<i32> {
        self.assigned.iter().copied().collect()
    }

    /// Accept the selection as the new server state after a successful save
    pub fn commit(&mut self) {
        self.assigned = self.selected.clone();
    }

    pub fn discard(&mut self) {
        self.selected = self.assigned.clone();
    }
}

/// Selection inside the check-in/out view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPanel {
    mode: CheckMode,
    candidates: Vec<i32>,
    selected: BTreeSet<i32>,
}

impl CheckPanel {
    pub fn new(mode: CheckMode, candidates: Vec<i32>) -> Self {
        Self {
            mode,
            candidates,
            selected: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    pub fn candidates(&self) -> &[i32] {
        &self.candidates
    }

    /// Toggle one animal; ids outside the event are ignored
    pub fn toggle(&mut self, animal_id: i32) {
        if !self.candidates.contains(&animal_id) {
            return;
        }
        if !self.selected.remove(&animal_id) {
            self.selected.insert(animal_id);
        }
    }

    /// Add one animal to the selection. Repeats are no-ops; returns false
    /// for ids outside the event.
    pub fn select(&mut self, animal_id: i32) -> bool {
        if !self.candidates.contains(&animal_id) {
            return false;
        }
        self.selected.insert(animal_id);
        true
    }

    /// "Select all" checkbox: checked selects every candidate, unchecked clears
    pub fn select_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.candidates.iter().copied().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn all_selected(&self) -> bool {
        !self.candidates.is_empty() && self.selected.len() == self.candidates.len()
    }

    pub fn is_selected(&self, animal_id: i32) -> bool {
        self.selected.contains(&animal_id)
    }

    pub fn selected(&self) -> Vec<i32> {
        self.selected.iter().copied().collect()
    }

    /// No button without `checkin_animals`; "Cancel" while nothing is selected
    pub fn action(&self, user: Option<&User>) -> Option<CheckAction> {
        if !crate::models::has_permission(user, PermissionName::CheckinAnimals) {
            return None;
        }
        if self.selected.is_empty() {
            Some(CheckAction::Cancel)
        } else {
            Some(CheckAction::Submit(self.mode))
        }
    }
}

/// Per-event card state
#[derive(Debug, Clone)]
pub struct EventAssignment {
    event: Event,
    view: AnimalView,
    animals: Selection,
    handlers: Selection,
    check: Option<CheckPanel>,
}

impl EventAssignment {
    pub fn new(details: &EventWithDetailsAndComments) -> Self {
        Self::from_parts(details.event.clone(), details.animal_ids(), details.handler_ids())
    }

    /// Card for the single-event payload of `GET /events/{id}`
    pub fn from_event(details: &EventWithDetails) -> Self {
        Self::from_parts(
            details.event.clone(),
            details.animals.iter().map(|a| a.id).collect(),
            details.users.iter().map(|u| u.id).collect(),
        )
    }

    fn from_parts(event: Event, animal_ids: Vec<i32>, handler_ids: Vec<i32>) -> Self {
        Self {
            event,
            view: AnimalView::Assign,
            animals: Selection::new(animal_ids),
            handlers: Selection::new(handler_ids),
            check: None,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn view(&self) -> AnimalView {
        self.view
    }

    pub fn animals(&self) -> &Selection {
        &self.animals
    }

    pub fn animals_mut(&mut self) -> &mut Selection {
        &mut self.animals
    }

    pub fn handlers(&self) -> &Selection {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut Selection {
        &mut self.handlers
    }

    pub fn animal_action(&self, now: DateTime<Utc>) -> AssignAction {
        if self.animals.is_dirty() {
            AssignAction::Save
        } else {
            AssignAction::Proceed(CheckMode::offered_for(&self.event, now))
        }
    }

    /// Handlers only ever offer "Save" when edited
    pub fn handlers_need_save(&self) -> bool {
        self.handlers.is_dirty()
    }

    /// Move from `Assign` to the offered check view. Refused while the
    /// animal selection has unsaved edits.
    pub fn enter_check_view(&mut self, now: DateTime<Utc>) -> Option<CheckMode> {
        match self.animal_action(now) {
            AssignAction::Save => None,
            AssignAction::Proceed(mode) => {
                self.view = mode.into();
                self.check = Some(CheckPanel::new(mode, self.animals.assigned()));
                Some(mode)
            }
        }
    }

    pub fn check_panel(&self) -> Option<&CheckPanel> {
        self.check.as_ref()
    }

    pub fn check_panel_mut(&mut self) -> Option<&mut CheckPanel> {
        self.check.as_mut()
    }

    /// Back (or Cancel) to `Assign`, dropping the check selection
    pub fn back(&mut self) {
        self.view = AnimalView::Assign;
        self.check = None;
    }
}
