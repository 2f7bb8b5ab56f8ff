//! VAT on quoted totals
//!
//! Integer-only: the VAT share is rounded half up to the nearest minor unit.

/// Standard UK VAT rate
pub const STANDARD_VAT_PERCENT: u32 = 20;

/// VAT due on `amount` at `percent`, rounded half up
///
/// `None` if the intermediate product overflows.
pub fn vat_on(amount: i64, percent: u32) -> Option<i64> {
    let scaled = amount.checked_mul(i64::from(percent))?;
    let rounded = if scaled >= 0 {
        scaled.checked_add(50)?
    } else {
        scaled.checked_sub(50)?
    };
    Some(rounded / 100)
}

/// `amount` plus VAT at `percent`, or `None` on overflow
pub fn add_vat(amount: i64, percent: u32) -> Option<i64> {
    amount.checked_add(vat_on(amount, percent)?)
}
