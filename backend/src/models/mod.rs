//! Domain models for the ticket order form

pub mod attendee;
pub mod days;
pub mod order;
pub mod purchaser;
pub mod rate;

// Re-exports
pub use attendee::{AttendeeEntry, EntryId};
pub use days::{DayCatalog, DayId, DayOption, DaySelection};
pub use order::{FieldErrors, FieldTarget, OrderState};
pub use purchaser::{PurchaserParseError, PurchaserType};
pub use rate::RateTier;
