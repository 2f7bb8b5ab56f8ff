//! Order state
//!
//! The single source of truth for one order form. Everything the form
//! shows (panels, required flags, totals) is derived from this struct on
//! every change; none of it is stored here.

use crate::models::attendee::{AttendeeEntry, EntryId};
use crate::models::days::DaySelection;
use crate::models::purchaser::PurchaserType;
use crate::models::rate::RateTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where an inline error marker is shown
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldTarget {
    /// The account holder's own day selection
    SelfDays,
    /// One attendee row
    Entry(EntryId),
}

impl FieldTarget {
    pub const SELF_KEY: &'static str = "self";
}

impl From<String> for FieldTarget {
    fn from(value: String) -> Self {
        if value == Self::SELF_KEY {
            FieldTarget::SelfDays
        } else {
            FieldTarget::Entry(EntryId::new(value))
        }
    }
}

impl From<FieldTarget> for String {
    fn from(target: FieldTarget) -> Self {
        match target {
            FieldTarget::SelfDays => FieldTarget::SELF_KEY.to_string(),
            FieldTarget::Entry(id) => id.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTarget::SelfDays => f.write_str(Self::SELF_KEY),
            FieldTarget::Entry(id) => write!(f, "{}", id),
        }
    }
}

/// Set of targets currently carrying an error marker
pub type FieldErrors = BTreeSet<FieldTarget>;

/// Complete input state of an order form
///
/// # Example
///
/// ```rust
/// use ticket_order_core_rs::{OrderState, PurchaserType, RateTier};
///
/// let order = OrderState::new(PurchaserType::SelfOnly, RateTier::individual())
///     .with_self_days(["mon", "tue"]);
/// assert_eq!(order.self_days.len(), 2);
/// assert_eq!(order.active_attendees().count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(default)]
    pub purchaser: PurchaserType,

    #[serde(default)]
    pub rate: RateTier,

    /// Days chosen for the account holder's own ticket
    #[serde(default)]
    pub self_days: DaySelection,

    /// Every formset row, in display order, including soft-deleted ones
    #[serde(default)]
    pub attendees: Vec<AttendeeEntry>,

    /// Error markers raised by the last submit attempt that have not been
    /// lowered since
    #[serde(default)]
    pub flagged: FieldErrors,
}

impl OrderState {
    pub fn new(purchaser: PurchaserType, rate: RateTier) -> Self {
        Self {
            purchaser,
            rate,
            ..Default::default()
        }
    }

    pub fn with_self_days<I, D>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<crate::models::days::DayId>,
    {
        self.self_days = days.into_iter().collect();
        self
    }

    pub fn with_attendee(mut self, entry: AttendeeEntry) -> Self {
        self.attendees.push(entry);
        self
    }

    /// Attendee rows not marked for deletion, in display order
    pub fn active_attendees(&self) -> impl Iterator<Item = &AttendeeEntry> {
        self.attendees.iter().filter(|entry| entry.is_active())
    }

    pub fn attendee(&self, id: &EntryId) -> Option<&AttendeeEntry> {
        self.attendees.iter().find(|entry| &entry.id == id)
    }

    /// Both choices that gate the rest of the form have been made
    pub fn is_configured(&self) -> bool {
        self.purchaser.is_set() && self.rate.is_set()
    }
}
