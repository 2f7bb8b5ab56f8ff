//! Order form session
//!
//! Drives one order form the way the page's event handlers do: every input
//! event mutates the [`OrderState`] (or the formset) and is followed by
//! exactly one [`recompute`]; a submit attempt runs
//! [`validate_for_submit`] and raises error markers for what it finds.
//!
//! # Marker lifecycle
//!
//! Markers are raised only by a rejected submit. A recompute lowers the
//! markers whose condition is now satisfied, and the lowered set is written
//! back into the order, so a marker stays down until the next submit even if
//! the user undoes the fix.
//!
//! # Failed events
//!
//! An event or submit attempt that returns an error leaves the order, the
//! formset and the view exactly as they were before it.

pub mod events;

use crate::engine::{field_errors, recompute, validate_for_submit, DerivedView, SubmitIssue};
use crate::formset::{AttendeeFormset, AttendeeFormsetView, FormsetConfig, FormsetError};
use crate::models::{DayCatalog, DayId, FieldErrors, OrderState};
use crate::rates::{PricingError, RateTable, RateTableConfig, RateTableError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use events::FormEvent;

/// Everything needed to set up an order form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFormConfig {
    #[serde(default)]
    pub rates: RateTableConfig,

    /// Days offered on the form
    #[serde(default)]
    pub days: DayCatalog,

    #[serde(default)]
    pub formset: FormsetConfig,
}

/// Session errors
///
/// All of these are defects in configuration or in the caller's event
/// stream, not problems with what the user typed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid rate table: {0}")]
    Config(#[from] RateTableError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Formset(#[from] FormsetError),

    #[error("Day '{0}' is not offered on this form")]
    UnknownDay(DayId),
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "issues", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The form may be submitted
    Accepted,
    /// Submission must be blocked; markers were raised for each issue
    Rejected(Vec<SubmitIssue>),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// One live order form
///
/// # Example
///
/// ```rust
/// use ticket_order_core_rs::{FormEvent, OrderForm, OrderFormConfig, PurchaserType, RateTier};
///
/// let mut form = OrderForm::new(OrderFormConfig::default()).unwrap();
/// form.apply(FormEvent::PurchaserChanged { purchaser: PurchaserType::SelfOnly }).unwrap();
/// form.apply(FormEvent::RateChanged { rate: RateTier::individual() }).unwrap();
/// let view = form
///     .apply(FormEvent::SelfDayToggled { day: "sat".into(), selected: true })
///     .unwrap();
///
/// assert!(view.show_self_panel);
/// assert_eq!(view.total_cost, 18 + 24);
/// ```
#[derive(Debug, Clone)]
pub struct OrderForm {
    session_id: Uuid,
    rates: RateTable,
    days: DayCatalog,
    formset: AttendeeFormset,
    order: OrderState,
    view: DerivedView,
}

impl OrderForm {
    /// Create a form with nothing chosen yet
    ///
    /// # Errors
    ///
    /// `SessionError::Config` if the rate table configuration is invalid.
    pub fn new(config: OrderFormConfig) -> Result<Self, SessionError> {
        let rates = RateTable::from_config(config.rates)?;
        let formset = AttendeeFormset::new(config.formset);

        let mut form = Self {
            session_id: Uuid::new_v4(),
            rates,
            days: config.days,
            formset,
            order: OrderState::default(),
            view: DerivedView::default(),
        };
        form.refresh(FieldErrors::new())?;

        tracing::info!(
            session = %form.session_id,
            rows = form.formset.len(),
            "Order form created"
        );

        Ok(form)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    pub fn formset(&self) -> &AttendeeFormset {
        &self.formset
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Apply one input event and recompute
    ///
    /// # Errors
    ///
    /// - `UnknownDay` for a day not in the catalog
    /// - `Formset` for an event naming a row that does not exist
    /// - `Pricing` when the chosen rate has no prices or the total overflows
    ///
    /// On error the form is left as it was before the event.
    pub fn apply(&mut self, event: FormEvent) -> Result<&DerivedView, SessionError> {
        tracing::debug!(session = %self.session_id, event = ?event, "Applying form event");

        self.transact(|form| {
            form.mutate(event)?;
            form.refresh(FieldErrors::new())
        })?;
        Ok(&self.view)
    }

    fn mutate(&mut self, event: FormEvent) -> Result<(), SessionError> {
        match event {
            FormEvent::PurchaserChanged { purchaser } => {
                self.order.purchaser = purchaser;
            }
            FormEvent::RateChanged { rate } => {
                self.order.rate = rate;
            }
            FormEvent::SelfDayToggled { day, selected } => {
                self.check_day(&day)?;
                self.order.self_days.set(day, selected);
            }
            FormEvent::EntryDayToggled {
                entry,
                day,
                selected,
            } => {
                self.check_day(&day)?;
                self.formset.set_day(&entry, day, selected)?;
            }
            FormEvent::EntryEmailChanged { entry, email } => {
                self.formset.set_email(&entry, email)?;
            }
            FormEvent::EntryAdded => {
                let id = self.formset.add_row();
                tracing::debug!(session = %self.session_id, entry = %id, "Attendee row added");
            }
            FormEvent::EntryDeleted { entry } => {
                self.formset.mark_deleted(&entry)?;
            }
            FormEvent::EntryRestored { entry } => {
                self.formset.restore(&entry)?;
            }
        }
        Ok(())
    }

    /// Validate the order for submission
    ///
    /// On rejection the issues' markers are raised on top of the recomputed
    /// view; on acceptance every marker is cleared. An error leaves the form
    /// as it was, including any row validation added.
    pub fn attempt_submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        let outcome = self.transact(|form| {
            let outcome = match validate_for_submit(&form.order, &mut form.formset) {
                Ok(()) => {
                    form.order.flagged.clear();
                    SubmitOutcome::Accepted
                }
                Err(issues) => SubmitOutcome::Rejected(issues),
            };

            let raised = match &outcome {
                SubmitOutcome::Accepted => FieldErrors::new(),
                SubmitOutcome::Rejected(issues) => field_errors(issues),
            };
            form.refresh(raised)?;
            Ok(outcome)
        })?;

        match &outcome {
            SubmitOutcome::Accepted => tracing::info!(
                session = %self.session_id,
                tickets = self.view.ticket_count,
                total = self.view.total_cost,
                "Order accepted for submission"
            ),
            SubmitOutcome::Rejected(issues) => tracing::info!(
                session = %self.session_id,
                issues = issues.len(),
                "Order submission blocked"
            ),
        }

        Ok(outcome)
    }

    /// Run `step`, restoring the order and formset if it fails
    ///
    /// The view is only replaced by a successful `refresh`, so it needs no
    /// snapshot.
    fn transact<T>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let order = self.order.clone();
        let formset = self.formset.clone();

        step(self).map_err(|err| {
            tracing::warn!(session = %self.session_id, error = %err, "Form change rolled back");
            self.order = order;
            self.formset = formset;
            err
        })
    }

    fn check_day(&self, day: &DayId) -> Result<(), SessionError> {
        if self.days.contains(day) {
            Ok(())
        } else {
            tracing::warn!(session = %self.session_id, day = %day, "Rejected toggle for unknown day");
            Err(SessionError::UnknownDay(day.clone()))
        }
    }

    /// Re-derive the view, then raise `raised` markers on top of it
    fn refresh(&mut self, raised: FieldErrors) -> Result<(), SessionError> {
        self.order.attendees = self.formset.entries().to_vec();

        let mut view = recompute(&self.order, &self.rates)?;
        view.field_errors.extend(raised);
        view.apply_required_flags(&mut self.formset);

        self.order.flagged = view.field_errors.clone();
        self.view = view;
        Ok(())
    }
}
