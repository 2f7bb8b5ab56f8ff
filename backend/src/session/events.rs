//! Input events of the order form

use crate::models::{DayId, EntryId, PurchaserType, RateTier};
use serde::{Deserialize, Serialize};

/// One user interaction that changes the order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// "Who are these tickets for?" radio changed
    PurchaserChanged { purchaser: PurchaserType },

    /// Rate radio changed
    RateChanged { rate: RateTier },

    /// A day checkbox on the account holder's own ticket
    SelfDayToggled { day: DayId, selected: bool },

    /// A day checkbox on an attendee row
    EntryDayToggled {
        entry: EntryId,
        day: DayId,
        selected: bool,
    },

    /// An attendee row's email field was edited
    EntryEmailChanged { entry: EntryId, email: String },

    /// "Add another" clicked
    EntryAdded,

    /// A row's delete control clicked
    EntryDeleted { entry: EntryId },

    /// A deleted row brought back
    EntryRestored { entry: EntryId },
}
