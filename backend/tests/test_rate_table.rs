//! Tests for the rate table
//!
//! CRITICAL: All money values are i64 (minor units)

use ticket_order_core_rs::{
    recompute, OrderState, PricingError, PricingParams, PurchaserType, RateTable, RateTableConfig,
    RateTableError, RateTier,
};

#[test]
fn test_default_tiers_match_published_rates() {
    let table = RateTable::default();

    let tiers: Vec<(&str, PricingParams)> = table.tiers().map(|(name, p)| (name, *p)).collect();
    assert_eq!(
        tiers,
        vec![
            ("corporate", PricingParams::new(36, 48)),
            ("individual", PricingParams::new(18, 24)),
        ]
    );
}

#[test]
fn test_config_accepts_both_field_spellings() {
    let json = r#"{
        "tiers": {
            "individual": { "ticket_price": 18, "day_price": 24 },
            "corporate": { "ticketPrice": 36, "dayPrice": 48 }
        }
    }"#;
    let config: RateTableConfig = serde_json::from_str(json).unwrap();
    let table = RateTable::from_config(config).unwrap();

    assert_eq!(
        table.lookup(&RateTier::individual()).unwrap(),
        PricingParams::new(18, 24)
    );
    assert_eq!(
        table.lookup(&RateTier::corporate()).unwrap(),
        PricingParams::new(36, 48)
    );
    assert_eq!(table.vat_percent(), None);
    assert_eq!(table.with_vat(100), Ok(None));
}

#[test]
fn test_new_tier_needs_no_engine_change() {
    let mut config = RateTableConfig::default();
    config
        .tiers
        .insert("education".to_string(), PricingParams::new(9, 12));
    let table = RateTable::from_config(config).unwrap();

    let order = OrderState::new(PurchaserType::SelfOnly, RateTier::from("education"))
        .with_self_days(["sat", "sun", "mon"]);
    let view = recompute(&order, &table).unwrap();

    assert_eq!(view.total_cost, 9 + 3 * 12);
    assert!(!view.show_company_panel);
}

#[test]
fn test_unknown_tier_is_configuration_error() {
    let table = RateTable::default();
    let err = table.lookup(&RateTier::from("student")).unwrap_err();
    assert_eq!(err.tier, "student");
}

#[test]
fn test_blank_tier_name_rejected() {
    let mut config = RateTableConfig::default();
    config
        .tiers
        .insert(" ".to_string(), PricingParams::new(1, 1));
    assert_eq!(
        RateTable::from_config(config),
        Err(RateTableError::EmptyTierName)
    );
}

#[test]
fn test_negative_ticket_price_rejected() {
    let mut config = RateTableConfig::default();
    config
        .tiers
        .insert("corporate".to_string(), PricingParams::new(-36, 48));

    let err = RateTable::from_config(config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rate tier 'corporate' has negative ticket_price: -36"
    );
}

#[test]
fn test_vat_applied_to_total() {
    let table = RateTable::default();
    assert_eq!(table.with_vat(216), Ok(Some(259))); // 216 + 43.2
    assert_eq!(table.with_vat(0), Ok(Some(0)));
}

#[test]
fn test_cost_overflow_is_reported() {
    let mut config = RateTableConfig::default();
    config
        .tiers
        .insert("gala".to_string(), PricingParams::new(i64::MAX, 1));
    config.vat_percent = None;
    let table = RateTable::from_config(config).unwrap();

    // One ticket at i64::MAX fits; one day on top of it does not
    let order = OrderState::new(PurchaserType::SelfOnly, RateTier::from("gala"));
    assert_eq!(recompute(&order, &table).unwrap().total_cost, i64::MAX);

    let order = order.with_self_days(["sat"]);
    assert_eq!(recompute(&order, &table), Err(PricingError::CostOverflow));
    assert_eq!(PricingError::CostOverflow.to_string(), "Order cost overflows");
}
