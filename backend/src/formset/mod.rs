//! Attendee formset adapter
//!
//! The repeating "other attendee" sub-form is owned by an external widget.
//! The engine reaches it only through [`AttendeeFormsetView`]: it enumerates
//! rows, toggles required flags, and asks for a row to exist when it needs
//! somewhere to show an error. No pricing or validation rule lives here.

pub mod memory;

use crate::models::{AttendeeEntry, EntryId};
use serde::{Deserialize, Serialize};

pub use memory::{AttendeeFormset, FormsetConfig, FormsetError};

/// Field of an attendee row whose required flag the engine controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeField {
    Email,
}

/// Contract between the engine and the formset widget
///
/// Implementations must make `set_required` and `ensure_at_least_one_row`
/// idempotent: repeating a call with the same arguments changes nothing.
pub trait AttendeeFormsetView {
    /// Every row in display order, including soft-deleted ones
    fn entries(&self) -> &[AttendeeEntry];

    /// Rows not marked for deletion, in display order
    fn active_entries(&self) -> Vec<&AttendeeEntry> {
        self.entries()
            .iter()
            .filter(|entry| entry.is_active())
            .collect()
    }

    /// Set or clear the required flag on one field of one row
    ///
    /// Unknown row ids are ignored.
    fn set_required(&mut self, entry: &EntryId, field: AttendeeField, required: bool);

    /// Make sure at least one active row exists
    ///
    /// Adds a row through the widget when there is none and returns its id;
    /// otherwise returns the first active row's id.
    fn ensure_at_least_one_row(&mut self) -> EntryId;
}
