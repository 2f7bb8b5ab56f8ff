//! Purchaser type
//!
//! Who an order is for: the account holder, other named attendees, or both.
//! Parsed from the single-choice "who" input of the order form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Who the tickets in an order are for
///
/// `Unset` means the user has not picked an option yet; nothing else on the
/// form can be derived until they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PurchaserType {
    /// No choice made yet
    #[default]
    Unset,
    /// A ticket for the account holder only
    SelfOnly,
    /// Tickets for other named attendees only
    Others,
    /// A ticket for the account holder plus other attendees
    Both,
}

/// Raised when the "who" input carries a value the form never offers
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unrecognised purchaser type '{0}'")]
pub struct PurchaserParseError(pub String);

impl PurchaserType {
    /// Form value for `SelfOnly`
    pub const SELF_VALUE: &'static str = "self";
    /// Form value for `Others`
    pub const OTHERS_VALUE: &'static str = "others";
    /// Form value for `Both`
    pub const BOTH_VALUE: &'static str = "self and others";

    /// True when the order contains a ticket for the account holder
    pub fn includes_self(&self) -> bool {
        matches!(self, PurchaserType::SelfOnly | PurchaserType::Both)
    }

    /// True when the order contains tickets for other attendees
    pub fn includes_others(&self) -> bool {
        matches!(self, PurchaserType::Others | PurchaserType::Both)
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, PurchaserType::Unset)
    }

    /// The radio value this purchaser type is submitted as
    pub fn as_form_value(&self) -> &'static str {
        match self {
            PurchaserType::Unset => "",
            PurchaserType::SelfOnly => Self::SELF_VALUE,
            PurchaserType::Others => Self::OTHERS_VALUE,
            PurchaserType::Both => Self::BOTH_VALUE,
        }
    }
}

impl FromStr for PurchaserType {
    type Err = PurchaserParseError;

    /// Parse a radio value
    ///
    /// Only the values the form offers are accepted, after trimming: "",
    /// "self", "others", "self and others", and "both" as a short form of
    /// the last.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" => Ok(PurchaserType::Unset),
            Self::SELF_VALUE => Ok(PurchaserType::SelfOnly),
            Self::OTHERS_VALUE => Ok(PurchaserType::Others),
            Self::BOTH_VALUE | "both" => Ok(PurchaserType::Both),
            other => Err(PurchaserParseError(other.to_string())),
        }
    }
}

impl TryFrom<String> for PurchaserType {
    type Error = PurchaserParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PurchaserType> for String {
    fn from(purchaser: PurchaserType) -> Self {
        purchaser.as_form_value().to_string()
    }
}

impl fmt::Display for PurchaserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaserType::Unset => write!(f, "unset"),
            other => write!(f, "{}", other.as_form_value()),
        }
    }
}
