//! Tests for the event-driven order form session

use ticket_order_core_rs::{
    AttendeeField, DayId, EntryId, FieldTarget, FormEvent, FormsetConfig, FormsetError,
    OrderForm, OrderFormConfig, PricingError, PricingParams, PurchaserType, RateTier,
    SessionError, SubmitIssue, SubmitOutcome, UnknownTierError,
};

fn configured_form(purchaser: PurchaserType, rate: RateTier) -> OrderForm {
    let mut form = OrderForm::new(OrderFormConfig::default()).unwrap();
    form.apply(FormEvent::PurchaserChanged { purchaser }).unwrap();
    form.apply(FormEvent::RateChanged { rate }).unwrap();
    form
}

fn self_day(day: &str, selected: bool) -> FormEvent {
    FormEvent::SelfDayToggled {
        day: DayId::from(day),
        selected,
    }
}

fn entry_day(entry: &str, day: &str, selected: bool) -> FormEvent {
    FormEvent::EntryDayToggled {
        entry: EntryId::from(entry),
        day: DayId::from(day),
        selected,
    }
}

fn entry_email(entry: &str, email: &str) -> FormEvent {
    FormEvent::EntryEmailChanged {
        entry: EntryId::from(entry),
        email: email.to_string(),
    }
}

#[test]
fn test_rest_of_form_appears_once_both_choices_made() {
    let mut form = OrderForm::new(OrderFormConfig::default()).unwrap();

    let view = form
        .apply(FormEvent::PurchaserChanged {
            purchaser: PurchaserType::Both,
        })
        .unwrap();
    assert!(!view.show_submit);
    assert!(!view.show_self_panel);

    let view = form
        .apply(FormEvent::RateChanged {
            rate: RateTier::corporate(),
        })
        .unwrap();
    assert!(view.show_submit);
    assert!(view.show_self_panel);
    assert!(view.show_others_panel);
    assert!(view.show_company_panel);
    assert_eq!(view.ticket_count, 1);
    assert_eq!(view.total_cost, 36);
}

#[test]
fn test_self_marker_lifecycle() {
    let mut form = configured_form(PurchaserType::SelfOnly, RateTier::individual());

    let outcome = form.attempt_submit().unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(vec![SubmitIssue::SelfDaysMissing])
    );
    assert!(form.view().field_errors.contains(&FieldTarget::SelfDays));

    form.apply(self_day("sat", true)).unwrap();
    assert!(form.view().field_errors.is_empty());

    // Undoing the fix does not bring the marker back until the next submit
    form.apply(self_day("sat", false)).unwrap();
    assert!(form.view().field_errors.is_empty());

    form.attempt_submit().unwrap();
    assert!(form.view().field_errors.contains(&FieldTarget::SelfDays));
}

#[test]
fn test_others_with_all_rows_deleted_gets_a_new_row_on_submit() {
    let mut form = configured_form(PurchaserType::Others, RateTier::corporate());
    form.apply(FormEvent::EntryDeleted {
        entry: EntryId::from("form-0"),
    })
    .unwrap();
    form.apply(FormEvent::EntryDeleted {
        entry: EntryId::from("form-1"),
    })
    .unwrap();

    let outcome = form.attempt_submit().unwrap();
    let new_row = EntryId::from("form-2");
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(vec![SubmitIssue::NoValidAttendee {
            entry: new_row.clone()
        }])
    );
    assert_eq!(form.formset().len(), 3);
    assert_eq!(form.order().attendees.len(), 3);
    assert!(form
        .view()
        .field_errors
        .contains(&FieldTarget::Entry(new_row.clone())));
    assert_eq!(form.view().email_required.get(&new_row), Some(&false));
}

#[test]
fn test_no_valid_marker_survives_submit_then_lowers_on_edit() {
    let mut form = configured_form(PurchaserType::Others, RateTier::individual());
    form.apply(entry_day("form-0", "sat", true)).unwrap();

    // Row has a day but no email: it is counted but not valid
    assert_eq!(form.view().ticket_count, 1);
    let outcome = form.attempt_submit().unwrap();
    assert!(!outcome.is_accepted());
    let target = FieldTarget::Entry(EntryId::from("form-0"));
    assert!(form.view().field_errors.contains(&target));

    form.apply(entry_email("form-0", "a@x.com")).unwrap();
    assert!(!form.view().field_errors.contains(&target));

    assert_eq!(form.attempt_submit().unwrap(), SubmitOutcome::Accepted);
}

#[test]
fn test_full_order_accepted() {
    let mut form = configured_form(PurchaserType::Both, RateTier::corporate());
    form.apply(self_day("mon", true)).unwrap();
    form.apply(entry_email("form-0", "b@x.com")).unwrap();
    form.apply(entry_day("form-0", "tue", true)).unwrap();
    let view = form.apply(entry_day("form-0", "wed", true)).unwrap();

    assert_eq!(view.ticket_count, 2);
    assert_eq!(view.day_count, 3);
    assert_eq!(view.total_cost, 216);
    assert_eq!(view.total_cost_incl_vat, Some(259));

    assert_eq!(form.attempt_submit().unwrap(), SubmitOutcome::Accepted);
    assert!(form.view().field_errors.is_empty());
    assert!(form.order().flagged.is_empty());
}

#[test]
fn test_required_flags_follow_day_selection() {
    let mut form = configured_form(PurchaserType::Others, RateTier::individual());
    let row = EntryId::from("form-1");

    form.apply(entry_day("form-1", "sun", true)).unwrap();
    assert!(form.formset().is_required(&row, AttendeeField::Email));

    form.apply(entry_day("form-1", "sun", false)).unwrap();
    assert!(!form.formset().is_required(&row, AttendeeField::Email));

    form.apply(entry_day("form-1", "sun", true)).unwrap();
    form.apply(FormEvent::PurchaserChanged {
        purchaser: PurchaserType::SelfOnly,
    })
    .unwrap();
    assert!(!form.formset().is_required(&row, AttendeeField::Email));
}

#[test]
fn test_deleted_and_restored_row() {
    let mut form = configured_form(PurchaserType::Others, RateTier::individual());
    form.apply(entry_email("form-0", "a@x.com")).unwrap();
    form.apply(entry_day("form-0", "sat", true)).unwrap();
    assert_eq!(form.view().total_cost, 42);

    let view = form
        .apply(FormEvent::EntryDeleted {
            entry: EntryId::from("form-0"),
        })
        .unwrap();
    assert_eq!(view.total_cost, 0);

    let view = form
        .apply(FormEvent::EntryRestored {
            entry: EntryId::from("form-0"),
        })
        .unwrap();
    assert_eq!(view.total_cost, 42);
}

#[test]
fn test_added_row_takes_part_in_pricing() {
    let mut form = configured_form(PurchaserType::Others, RateTier::individual());
    form.apply(FormEvent::EntryAdded).unwrap();
    assert_eq!(form.formset().len(), 3);

    let view = form.apply(entry_day("form-2", "wed", true)).unwrap();
    assert_eq!(view.ticket_count, 1);
    assert!(view.is_email_required(&EntryId::from("form-2")));
}

#[test]
fn test_unpriced_rate_is_a_session_error() {
    let mut form = OrderForm::new(OrderFormConfig::default()).unwrap();
    form.apply(FormEvent::PurchaserChanged {
        purchaser: PurchaserType::SelfOnly,
    })
    .unwrap();

    let err = form
        .apply(FormEvent::RateChanged {
            rate: RateTier::from("student"),
        })
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::Pricing(PricingError::UnknownTier(UnknownTierError {
            tier: "student".to_string()
        }))
    );
}

#[test]
fn test_rejected_rate_change_keeps_previous_rate() {
    let mut form = configured_form(PurchaserType::SelfOnly, RateTier::individual());
    form.apply(self_day("sat", true)).unwrap();
    let before = form.view().clone();

    assert!(form
        .apply(FormEvent::RateChanged {
            rate: RateTier::from("student"),
        })
        .is_err());
    assert_eq!(form.order().rate, RateTier::individual());
    assert_eq!(form.view(), &before);

    // Later events price against the rate that is still in effect
    let view = form.apply(self_day("sun", true)).unwrap().clone();
    assert_eq!(view.day_count, 2);
    assert_eq!(view.day_count, form.order().self_days.len());
    assert_eq!(view.total_cost, 18 + 2 * 24);
}

#[test]
fn test_overflowing_toggle_is_rolled_back() {
    let mut config = OrderFormConfig::default();
    config
        .rates
        .tiers
        .insert("gala".to_string(), PricingParams::new(i64::MAX, 1));
    config.rates.vat_percent = None;
    let mut form = OrderForm::new(config).unwrap();
    form.apply(FormEvent::PurchaserChanged {
        purchaser: PurchaserType::Others,
    })
    .unwrap();
    form.apply(FormEvent::RateChanged {
        rate: RateTier::from("gala"),
    })
    .unwrap();
    let before = form.view().clone();

    let err = form.apply(entry_day("form-0", "sat", true)).unwrap_err();
    assert_eq!(err, SessionError::Pricing(PricingError::CostOverflow));

    let row = form.formset().row(&EntryId::from("form-0")).unwrap();
    assert!(!row.has_days());
    assert!(form.order().attendees.iter().all(|entry| !entry.has_days()));
    assert_eq!(form.view(), &before);
    assert_eq!(form.view().ticket_count, 0);
}

#[test]
fn test_event_for_missing_row_is_an_error() {
    let mut form = configured_form(PurchaserType::Others, RateTier::individual());
    let err = form.apply(entry_email("form-7", "a@x.com")).unwrap_err();
    assert_eq!(
        err,
        SessionError::Formset(FormsetError::UnknownEntry(EntryId::from("form-7")))
    );
}

#[test]
fn test_custom_formset_config() {
    let config = OrderFormConfig {
        formset: FormsetConfig {
            prefix: "attendee".to_string(),
            initial_rows: 0,
        },
        ..Default::default()
    };
    let mut form = OrderForm::new(config).unwrap();
    form.apply(FormEvent::PurchaserChanged {
        purchaser: PurchaserType::Others,
    })
    .unwrap();
    form.apply(FormEvent::RateChanged {
        rate: RateTier::individual(),
    })
    .unwrap();

    let outcome = form.attempt_submit().unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(vec![SubmitIssue::NoValidAttendee {
            entry: EntryId::from("attendee-0")
        }])
    );
}
