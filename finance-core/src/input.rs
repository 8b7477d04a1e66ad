//! Sanitisation of raw form values before they reach the tax calculators.
//!
//! Form fields arrive as strings or floats and may be blank, malformed or
//! NaN. Tax inputs treat all of those as zero so a single bad field cannot
//! poison a whole summary. Loan inputs are stricter and go through
//! [`crate::LoanInput::from_f64`] instead.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::warn;

/// Normalizes input for decimal parsing: trims whitespace and removes commas
/// (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a money field, treating blank or unparseable text as zero.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::input::parse_money;
///
/// assert_eq!(parse_money("1,234.56"), dec!(1234.56));
/// assert_eq!(parse_money(""), dec!(0));
/// assert_eq!(parse_money("NaN"), dec!(0));
/// ```
pub fn parse_money(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        warn!(input = %s, "invalid amount treated as zero: {}", e);
        Decimal::ZERO
    })
}

/// Parses an optional money field; `None` is zero.
pub fn parse_optional_money(s: Option<&str>) -> Decimal {
    s.map_or(Decimal::ZERO, parse_money)
}

/// Converts a float to a decimal, mapping NaN and infinities to zero.
pub fn sanitize_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        warn!(%value, "non-finite amount treated as zero");
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or_else(|| {
        warn!(%value, "amount out of decimal range treated as zero");
        Decimal::ZERO
    })
}
