//! Day identifiers, per-purchaser day selections and the catalog of days
//! offered on the form

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Short key for a conference day, e.g. "sat"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayId(String);

impl DayId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DayId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of days chosen by one purchaser (self or one attendee)
///
/// May be empty. Selecting a day twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySelection {
    days: BTreeSet<DayId>,
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect `day`
    ///
    /// Returns true if the selection changed.
    pub fn set(&mut self, day: DayId, selected: bool) -> bool {
        if selected {
            self.days.insert(day)
        } else {
            self.days.remove(&day)
        }
    }

    pub fn contains(&self, day: &DayId) -> bool {
        self.days.contains(day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayId> {
        self.days.iter()
    }
}

impl<D: Into<DayId>> FromIterator<D> for DaySelection {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One day offered on the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOption {
    pub id: DayId,
    pub label: String,
}

/// Ordered list of the days a ticket can cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayCatalog {
    options: Vec<DayOption>,
}

impl DayCatalog {
    pub fn new(options: Vec<DayOption>) -> Self {
        Self { options }
    }

    pub fn contains(&self, day: &DayId) -> bool {
        self.options.iter().any(|option| &option.id == day)
    }

    pub fn label(&self, day: &DayId) -> Option<&str> {
        self.options
            .iter()
            .find(|option| &option.id == day)
            .map(|option| option.label.as_str())
    }

    pub fn options(&self) -> &[DayOption] {
        &self.options
    }
}

impl Default for DayCatalog {
    /// The five conference days: Saturday through Wednesday
    fn default() -> Self {
        let days = [
            ("sat", "Saturday"),
            ("sun", "Sunday"),
            ("mon", "Monday"),
            ("tue", "Tuesday"),
            ("wed", "Wednesday"),
        ];
        Self::new(
            days.iter()
                .map(|(id, label)| DayOption {
                    id: DayId::from(*id),
                    label: label.to_string(),
                })
                .collect(),
        )
    }
}
