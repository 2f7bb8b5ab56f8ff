//! Derived view computation

use crate::formset::{AttendeeField, AttendeeFormsetView};
use crate::models::{EntryId, FieldErrors, FieldTarget, OrderState};
use crate::rates::{PricingError, RateTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the form displays, recomputed from scratch on each change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedView {
    pub show_self_panel: bool,
    pub show_others_panel: bool,
    pub show_company_panel: bool,
    pub show_submit: bool,

    /// Company name and address must be filled in
    pub company_fields_required: bool,

    pub ticket_count: usize,
    pub day_count: usize,

    /// `ticket_count * ticket_price + day_count * day_price`
    pub total_cost: i64,

    /// `total_cost` with VAT, when the rate table carries a VAT rate
    pub total_cost_incl_vat: Option<i64>,

    /// Required flag of each attendee row's email field
    pub email_required: BTreeMap<EntryId, bool>,

    /// Error markers still showing after this recompute
    pub field_errors: FieldErrors,
}

impl DerivedView {
    /// View for a form whose purchaser or rate is not chosen yet
    fn unconfigured(order: &OrderState) -> Self {
        Self {
            email_required: order
                .attendees
                .iter()
                .map(|entry| (entry.id.clone(), false))
                .collect(),
            field_errors: order.flagged.clone(),
            ..Default::default()
        }
    }

    pub fn is_email_required(&self, entry: &EntryId) -> bool {
        self.email_required.get(entry).copied().unwrap_or(false)
    }

    /// Push the email required flags to the formset widget
    pub fn apply_required_flags<F>(&self, formset: &mut F)
    where
        F: AttendeeFormsetView + ?Sized,
    {
        for (entry, required) in &self.email_required {
            formset.set_required(entry, AttendeeField::Email, *required);
        }
    }
}

/// Derive the view for `order`
///
/// Steps:
/// 1. Purchaser or rate unset: everything hidden, zero totals.
/// 2. Resolve the tier's prices; an unpriced tier is a configuration error.
/// 3. Self panel for self/both, others panel for others/both, company panel
///    for the corporate tier.
/// 4. Count one ticket for self plus one per active attendee row with at
///    least one day; sum their days. Such rows get a required email and
///    their error marker lowered. The self marker is lowered once a self
///    day is chosen.
/// 5. Price the counts.
///
/// # Errors
///
/// - `PricingError::UnknownTier` when the chosen tier is not in `rates`
/// - `PricingError::CostOverflow` when the total (or its VAT-inclusive
///   amount) does not fit in an i64
///
/// # Example
///
/// ```rust
/// use ticket_order_core_rs::{recompute, OrderState, PurchaserType, RateTable, RateTier};
///
/// let order = OrderState::new(PurchaserType::SelfOnly, RateTier::individual())
///     .with_self_days(["mon", "tue"]);
/// let view = recompute(&order, &RateTable::default()).unwrap();
///
/// assert_eq!(view.ticket_count, 1);
/// assert_eq!(view.day_count, 2);
/// assert_eq!(view.total_cost, 18 + 2 * 24);
/// ```
pub fn recompute(order: &OrderState, rates: &RateTable) -> Result<DerivedView, PricingError> {
    if !order.is_configured() {
        return Ok(DerivedView::unconfigured(order));
    }

    let params = rates.lookup(&order.rate)?;

    let includes_self = order.purchaser.includes_self();
    let includes_others = order.purchaser.includes_others();

    let mut view = DerivedView::unconfigured(order);
    view.show_self_panel = includes_self;
    view.show_others_panel = includes_others;
    view.show_company_panel = order.rate.is_corporate();
    view.company_fields_required = view.show_company_panel;
    view.show_submit = true;

    if includes_self {
        view.ticket_count += 1;
        view.day_count += order.self_days.len();
        if !order.self_days.is_empty() {
            view.field_errors.remove(&FieldTarget::SelfDays);
        }
    }

    // Rows stay optional unless the order is for others and the row has days
    if includes_others {
        for entry in order.active_attendees() {
            if entry.has_days() {
                view.ticket_count += 1;
                view.day_count += entry.days.len();
                view.email_required.insert(entry.id.clone(), true);
                view.field_errors.remove(&FieldTarget::Entry(entry.id.clone()));
            }
        }
    }

    view.total_cost = params.cost(view.ticket_count, view.day_count)?;
    view.total_cost_incl_vat = rates.with_vat(view.total_cost)?;

    tracing::debug!(
        purchaser = %order.purchaser,
        rate = %order.rate,
        tickets = view.ticket_count,
        days = view.day_count,
        total = view.total_cost,
        "Recomputed order view"
    );

    Ok(view)
}
