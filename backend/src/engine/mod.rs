//! Order pricing engine
//!
//! Two pure entry points over an [`OrderState`](crate::models::OrderState):
//!
//! - [`recompute`] derives panel visibility, required flags, counts and
//!   totals. Called after every edit.
//! - [`validate_for_submit`] decides whether the form may be submitted.
//!   Called only on a submit attempt.
//!
//! There is no stored engine state between calls. Both functions are
//! idempotent; the only side effects go through the formset adapter.

pub mod validation;
pub mod view;

pub use validation::{field_errors, validate_for_submit, SubmitIssue, SubmitResult};
pub use view::{recompute, DerivedView};
