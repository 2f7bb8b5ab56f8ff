//! Rate tiers and their prices

pub mod table;
pub mod vat;

pub use table::{PricingError, PricingParams, RateTable, RateTableConfig, RateTableError, UnknownTierError};
