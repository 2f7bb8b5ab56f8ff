//! Attendee entry model
//!
//! One row of the "tickets for other people" formset. Rows are soft-deleted:
//! a deleted row keeps its identifier and contents so the formset widget can
//! restore it, but it no longer takes part in pricing or validation.

use crate::models::days::{DayId, DaySelection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Formset row identifier, e.g. "form-0"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ticket request for one other attendee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeEntry {
    pub id: EntryId,

    /// Attendee's email address, empty until typed in
    #[serde(default)]
    pub email_address: String,

    /// Days the attendee will come on
    #[serde(default)]
    pub days: DaySelection,

    /// Soft-delete marker set by the formset widget
    #[serde(default)]
    pub marked_for_deletion: bool,
}

impl AttendeeEntry {
    /// Create an empty, active row
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            email_address: String::new(),
            days: DaySelection::new(),
            marked_for_deletion: false,
        }
    }

    pub fn with_email(mut self, email_address: impl Into<String>) -> Self {
        self.email_address = email_address.into();
        self
    }

    pub fn with_days<I, D>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DayId>,
    {
        self.days = days.into_iter().collect();
        self
    }

    pub fn deleted(mut self) -> Self {
        self.marked_for_deletion = true;
        self
    }

    /// Rows not marked for deletion take part in pricing and validation
    pub fn is_active(&self) -> bool {
        !self.marked_for_deletion
    }

    pub fn has_email(&self) -> bool {
        !self.email_address.is_empty()
    }

    pub fn has_days(&self) -> bool {
        !self.days.is_empty()
    }

    /// An entry counts towards a submittable order only with both an email
    /// address and at least one day
    pub fn is_complete(&self) -> bool {
        self.has_email() && self.has_days()
    }
}
