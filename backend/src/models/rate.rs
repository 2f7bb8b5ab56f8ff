//! Rate tier selected for an order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing category applied to the whole order
///
/// Named tiers are open-ended: whether a name is priced is decided by the
/// `RateTable`, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RateTier {
    /// No rate chosen yet
    #[default]
    Unset,
    /// A named tier, e.g. "individual" or "corporate"
    Named(String),
}

impl RateTier {
    pub const INDIVIDUAL: &'static str = "individual";
    pub const CORPORATE: &'static str = "corporate";

    pub fn individual() -> Self {
        RateTier::Named(Self::INDIVIDUAL.to_string())
    }

    pub fn corporate() -> Self {
        RateTier::Named(Self::CORPORATE.to_string())
    }

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            RateTier::Unset
        } else {
            RateTier::Named(name)
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, RateTier::Named(_))
    }

    /// Corporate orders must also carry company name and address
    pub fn is_corporate(&self) -> bool {
        self.name() == Some(Self::CORPORATE)
    }

    /// Tier name, or `None` when unset
    pub fn name(&self) -> Option<&str> {
        match self {
            RateTier::Unset => None,
            RateTier::Named(name) => Some(name.as_str()),
        }
    }
}

impl From<String> for RateTier {
    fn from(value: String) -> Self {
        RateTier::named(value)
    }
}

impl From<&str> for RateTier {
    fn from(value: &str) -> Self {
        RateTier::named(value)
    }
}

impl From<RateTier> for String {
    fn from(tier: RateTier) -> Self {
        match tier {
            RateTier::Unset => String::new(),
            RateTier::Named(name) => name,
        }
    }
}

impl fmt::Display for RateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateTier::Unset => write!(f, "unset"),
            RateTier::Named(name) => write!(f, "{}", name),
        }
    }
}
