//! Submit-time validation
//!
//! Runs only when the user tries to submit. Problems are user-input states,
//! reported as a list of issues; the caller blocks the submit on `Err`.

use crate::formset::AttendeeFormsetView;
use crate::models::{EntryId, FieldErrors, FieldTarget, OrderState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reason the order cannot be submitted yet
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitIssue {
    #[error("Select at least one day for your own ticket")]
    SelfDaysMissing,

    #[error("Attendee row {entry} has an email address but no days selected")]
    IncompleteEntry { entry: EntryId },

    #[error("Enter at least one attendee with an email address and a day (row {entry})")]
    NoValidAttendee { entry: EntryId },
}

impl SubmitIssue {
    /// Where the issue's error marker is shown
    pub fn target(&self) -> FieldTarget {
        match self {
            SubmitIssue::SelfDaysMissing => FieldTarget::SelfDays,
            SubmitIssue::IncompleteEntry { entry } | SubmitIssue::NoValidAttendee { entry } => {
                FieldTarget::Entry(entry.clone())
            }
        }
    }
}

/// Validation result
pub type SubmitResult = Result<(), Vec<SubmitIssue>>;

/// Collapse issues into the set of marker targets
pub fn field_errors(issues: &[SubmitIssue]) -> FieldErrors {
    issues.iter().map(SubmitIssue::target).collect()
}

/// Check whether the order may be submitted
///
/// Purchaser type and self days come from `order`; attendee rows are read
/// through `formset`, the same widget that supplies a row when one is needed.
///
/// - An order that includes self needs at least one self day.
/// - An order that includes others needs at least one active row with both
///   an email address and a day. Rows with an email but no days are
///   reported individually.
/// - With no valid row, the first active row is flagged. If there is no
///   active row at all, one is added through `formset` first so the user has
///   something highlighted.
///
/// # Returns
///
/// Ok(()) if the order is submittable, Err(issues) otherwise
///
/// # Example
///
/// ```rust
/// use ticket_order_core_rs::{
///     validate_for_submit, AttendeeFormset, FormsetConfig, OrderState, PurchaserType, RateTier,
///     SubmitIssue,
/// };
///
/// let mut formset = AttendeeFormset::new(FormsetConfig { initial_rows: 0, ..Default::default() });
/// let order = OrderState::new(PurchaserType::Others, RateTier::corporate());
///
/// let issues = validate_for_submit(&order, &mut formset).unwrap_err();
/// assert!(matches!(issues[0], SubmitIssue::NoValidAttendee { .. }));
/// assert_eq!(formset.len(), 1);
/// ```
pub fn validate_for_submit<F>(order: &OrderState, formset: &mut F) -> SubmitResult
where
    F: AttendeeFormsetView + ?Sized,
{
    let mut issues = Vec::new();

    if order.purchaser.includes_self() && order.self_days.is_empty() {
        issues.push(SubmitIssue::SelfDaysMissing);
    }

    if order.purchaser.includes_others() {
        let mut valid_forms = 0;
        let mut first_active = None;

        for entry in formset.active_entries() {
            if first_active.is_none() {
                first_active = Some(entry.id.clone());
            }
            if entry.has_email() && !entry.has_days() {
                issues.push(SubmitIssue::IncompleteEntry {
                    entry: entry.id.clone(),
                });
            }
            if entry.is_complete() {
                valid_forms += 1;
            }
        }

        if valid_forms == 0 {
            let entry = match first_active {
                Some(first) => first,
                None => formset.ensure_at_least_one_row(),
            };
            issues.push(SubmitIssue::NoValidAttendee { entry });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
