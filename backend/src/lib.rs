//! Ticket Order Core - Rust Engine
//!
//! Order configuration engine for the conference ticket form: decides which
//! parts of the form are shown and required, whether it can be submitted,
//! and what the order costs.
//!
//! # Architecture
//!
//! - **models**: Domain types (PurchaserType, RateTier, AttendeeEntry, OrderState)
//! - **rates**: Rate table lookup and VAT
//! - **formset**: Adapter over the repeating attendee sub-form
//! - **engine**: `recompute` and `validate_for_submit`
//! - **session**: Event-driven order form built on the engine
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units), integer arithmetic only
//! 2. The derived view is recomputed from `OrderState`, never patched
//! 3. An unpriced rate tier is a configuration error, never a zero cost

// Module declarations
pub mod engine;
pub mod formset;
pub mod models;
pub mod rates;
pub mod session;

// Re-exports for convenience
pub use engine::{field_errors, recompute, validate_for_submit, DerivedView, SubmitIssue, SubmitResult};
pub use formset::{AttendeeField, AttendeeFormset, AttendeeFormsetView, FormsetConfig, FormsetError};
pub use models::{
    attendee::{AttendeeEntry, EntryId},
    days::{DayCatalog, DayId, DayOption, DaySelection},
    order::{FieldErrors, FieldTarget, OrderState},
    purchaser::{PurchaserParseError, PurchaserType},
    rate::RateTier,
};
pub use rates::{PricingError, PricingParams, RateTable, RateTableConfig, RateTableError, UnknownTierError};
pub use session::{FormEvent, OrderForm, OrderFormConfig, SessionError, SubmitOutcome};
