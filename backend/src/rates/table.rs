//! Rate table
//!
//! Static lookup of price parameters per rate tier. All prices are i64 in
//! minor units; the table is built once from configuration and never
//! mutated afterwards.

use crate::models::rate::RateTier;
use crate::rates::vat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Price parameters for one tier
///
/// Accepts both `ticket_price`/`day_price` and `ticketPrice`/`dayPrice`
/// field names so either spelling of a rates file loads into the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingParams {
    /// Flat price per ticket
    #[serde(alias = "ticketPrice")]
    pub ticket_price: i64,

    /// Price per day covered by a ticket
    #[serde(alias = "dayPrice")]
    pub day_price: i64,
}

impl PricingParams {
    pub fn new(ticket_price: i64, day_price: i64) -> Self {
        Self {
            ticket_price,
            day_price,
        }
    }

    /// Cost of `ticket_count` tickets covering `day_count` days in total
    ///
    /// # Errors
    ///
    /// `PricingError::CostOverflow` if the total does not fit in an i64.
    pub fn cost(&self, ticket_count: usize, day_count: usize) -> Result<i64, PricingError> {
        let tickets = i64::try_from(ticket_count).map_err(|_| PricingError::CostOverflow)?;
        let days = i64::try_from(day_count).map_err(|_| PricingError::CostOverflow)?;

        tickets
            .checked_mul(self.ticket_price)
            .zip(days.checked_mul(self.day_price))
            .and_then(|(ticket_cost, day_cost)| ticket_cost.checked_add(day_cost))
            .ok_or(PricingError::CostOverflow)
    }
}

/// A rate tier with no entry in the table
///
/// This is a configuration defect (the form offered a tier nobody priced),
/// never a user input error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Rate tier '{tier}' is not configured")]
pub struct UnknownTierError {
    pub tier: String,
}

/// Errors from pricing an order against the table
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error(transparent)]
    UnknownTier(#[from] UnknownTierError),

    #[error("Order cost overflows")]
    CostOverflow,
}

/// Errors found while building a table from configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("Rate table has no tiers")]
    Empty,

    #[error("Rate tier name must not be empty")]
    EmptyTierName,

    #[error("Rate tier '{tier}' has negative {field}: {value}")]
    NegativePrice {
        tier: String,
        field: &'static str,
        value: i64,
    },

    #[error("VAT percentage {0} exceeds 100")]
    InvalidVatPercent(u32),
}

/// Rate table configuration as loaded from a rates file
///
/// # Example
///
/// ```rust
/// use ticket_order_core_rs::rates::RateTableConfig;
///
/// let json = r#"{
///     "tiers": {
///         "individual": { "ticket_price": 18, "day_price": 24 },
///         "corporate": { "ticketPrice": 36, "dayPrice": 48 }
///     },
///     "vat_percent": 20
/// }"#;
/// let config: RateTableConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.tiers["corporate"].day_price, 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableConfig {
    /// Tier name -> prices
    pub tiers: BTreeMap<String, PricingParams>,

    /// VAT added on top of the quoted total, in whole percent
    #[serde(default)]
    pub vat_percent: Option<u32>,
}

impl Default for RateTableConfig {
    fn default() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(RateTier::INDIVIDUAL.to_string(), PricingParams::new(18, 24));
        tiers.insert(RateTier::CORPORATE.to_string(), PricingParams::new(36, 48));
        Self {
            tiers,
            vat_percent: Some(vat::STANDARD_VAT_PERCENT),
        }
    }
}

/// Validated, immutable rate table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    tiers: BTreeMap<String, PricingParams>,
    vat_percent: Option<u32>,
}

impl RateTable {
    /// Build a table from configuration
    ///
    /// # Errors
    ///
    /// Returns `RateTableError` if the table is empty, a tier name is blank,
    /// a price is negative, or the VAT percentage is above 100.
    pub fn from_config(config: RateTableConfig) -> Result<Self, RateTableError> {
        if config.tiers.is_empty() {
            return Err(RateTableError::Empty);
        }

        for (tier, params) in &config.tiers {
            if tier.trim().is_empty() {
                return Err(RateTableError::EmptyTierName);
            }
            if params.ticket_price < 0 {
                return Err(RateTableError::NegativePrice {
                    tier: tier.clone(),
                    field: "ticket_price",
                    value: params.ticket_price,
                });
            }
            if params.day_price < 0 {
                return Err(RateTableError::NegativePrice {
                    tier: tier.clone(),
                    field: "day_price",
                    value: params.day_price,
                });
            }
        }

        if let Some(percent) = config.vat_percent {
            if percent > 100 {
                return Err(RateTableError::InvalidVatPercent(percent));
            }
        }

        Ok(Self {
            tiers: config.tiers,
            vat_percent: config.vat_percent,
        })
    }

    /// Resolve the prices for `tier`
    ///
    /// # Errors
    ///
    /// `UnknownTierError` if the tier is unset or has no entry.
    pub fn lookup(&self, tier: &RateTier) -> Result<PricingParams, UnknownTierError> {
        let name = tier.name().unwrap_or_default();
        self.tiers
            .get(name)
            .copied()
            .ok_or_else(|| UnknownTierError {
                tier: name.to_string(),
            })
    }

    /// Registered tier names, sorted
    pub fn tiers(&self) -> impl Iterator<Item = (&str, &PricingParams)> {
        self.tiers.iter().map(|(name, params)| (name.as_str(), params))
    }

    pub fn vat_percent(&self) -> Option<u32> {
        self.vat_percent
    }

    /// `amount` with VAT added, or `None` when no VAT is configured
    ///
    /// # Errors
    ///
    /// `PricingError::CostOverflow` if the VAT-inclusive amount does not fit
    /// in an i64.
    pub fn with_vat(&self, amount: i64) -> Result<Option<i64>, PricingError> {
        match self.vat_percent {
            Some(percent) => vat::add_vat(amount, percent)
                .map(Some)
                .ok_or(PricingError::CostOverflow),
            None => Ok(None),
        }
    }
}

impl Default for RateTable {
    /// The built-in tiers, validated like any other configuration
    fn default() -> Self {
        Self::from_config(RateTableConfig::default())
            .expect("built-in rate table configuration is valid")
    }
}
