//! In-memory formset
//!
//! Stand-in for the browser formset widget: rows are numbered with a fixed
//! prefix ("form-0", "form-1", ...), deletion only sets the row's marker,
//! and required flags are tracked per row and field.

use crate::formset::{AttendeeField, AttendeeFormsetView};
use crate::models::{AttendeeEntry, DayId, EntryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Formset layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsetConfig {
    /// Row id prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Rows present before the user adds any (minimum plus one extra)
    #[serde(default = "default_initial_rows")]
    pub initial_rows: usize,
}

fn default_prefix() -> String {
    "form".to_string()
}

fn default_initial_rows() -> usize {
    2
}

impl Default for FormsetConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            initial_rows: default_initial_rows(),
        }
    }
}

/// Errors from row operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormsetError {
    #[error("Formset row '{0}' does not exist")]
    UnknownEntry(EntryId),
}

/// Formset rows plus their required flags
#[derive(Debug, Clone)]
pub struct AttendeeFormset {
    prefix: String,
    rows: Vec<AttendeeEntry>,
    required: BTreeSet<(EntryId, AttendeeField)>,
    next_index: usize,
}

impl AttendeeFormset {
    pub fn new(config: FormsetConfig) -> Self {
        let mut formset = Self {
            prefix: config.prefix,
            rows: Vec::new(),
            required: BTreeSet::new(),
            next_index: 0,
        };
        for _ in 0..config.initial_rows {
            formset.add_row();
        }
        formset
    }

    /// Formset holding rows that already exist, e.g. from a submitted order
    ///
    /// New rows are numbered after the highest existing "<prefix>-N" id so
    /// an added row never reuses the id of an existing one.
    pub fn with_rows(prefix: impl Into<String>, rows: Vec<AttendeeEntry>) -> Self {
        let prefix = prefix.into();
        let next_index = rows
            .iter()
            .filter_map(|row| {
                row.id
                    .as_str()
                    .strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.strip_prefix('-'))
                    .and_then(|index| index.parse::<usize>().ok())
            })
            .max()
            .map_or(0, |highest| highest + 1);

        Self {
            prefix,
            rows,
            required: BTreeSet::new(),
            next_index,
        }
    }

    /// Append an empty active row and return its id
    pub fn add_row(&mut self) -> EntryId {
        let id = EntryId::new(format!("{}-{}", self.prefix, self.next_index));
        self.next_index += 1;
        self.rows.push(AttendeeEntry::new(id.clone()));
        id
    }

    /// Soft-delete a row
    ///
    /// The row keeps its contents so [`restore`](Self::restore) can bring it
    /// back. Its required flags are cleared.
    pub fn mark_deleted(&mut self, id: &EntryId) -> Result<(), FormsetError> {
        self.row_mut(id)?.marked_for_deletion = true;
        self.required.retain(|(entry, _)| entry != id);
        Ok(())
    }

    /// Undo a soft delete
    pub fn restore(&mut self, id: &EntryId) -> Result<(), FormsetError> {
        self.row_mut(id)?.marked_for_deletion = false;
        Ok(())
    }

    pub fn set_email(&mut self, id: &EntryId, email: impl Into<String>) -> Result<(), FormsetError> {
        self.row_mut(id)?.email_address = email.into();
        Ok(())
    }

    /// Tick or untick one day checkbox on a row
    pub fn set_day(&mut self, id: &EntryId, day: DayId, selected: bool) -> Result<(), FormsetError> {
        self.row_mut(id)?.days.set(day, selected);
        Ok(())
    }

    pub fn row(&self, id: &EntryId) -> Option<&AttendeeEntry> {
        self.rows.iter().find(|row| &row.id == id)
    }

    pub fn is_required(&self, id: &EntryId, field: AttendeeField) -> bool {
        self.required.contains(&(id.clone(), field))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_mut(&mut self, id: &EntryId) -> Result<&mut AttendeeEntry, FormsetError> {
        self.rows
            .iter_mut()
            .find(|row| &row.id == id)
            .ok_or_else(|| FormsetError::UnknownEntry(id.clone()))
    }
}

impl Default for AttendeeFormset {
    fn default() -> Self {
        Self::new(FormsetConfig::default())
    }
}

impl AttendeeFormsetView for AttendeeFormset {
    fn entries(&self) -> &[AttendeeEntry] {
        &self.rows
    }

    fn set_required(&mut self, entry: &EntryId, field: AttendeeField, required: bool) {
        if self.row(entry).is_none() {
            return;
        }
        let key = (entry.clone(), field);
        if required {
            self.required.insert(key);
        } else {
            self.required.remove(&key);
        }
    }

    fn ensure_at_least_one_row(&mut self) -> EntryId {
        match self.rows.iter().find(|row| row.is_active()) {
            Some(row) => row.id.clone(),
            None => self.add_row(),
        }
    }
}
