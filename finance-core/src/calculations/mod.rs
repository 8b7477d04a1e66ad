//! Tax and loan calculators.
//!
//! Each calculator is a pure function over caller-supplied amounts and a
//! borrowed rule table. The free functions at this level run against the
//! built-in [`TaxTables::global`] tables; [`TaxCalculator`] binds any other
//! set of tables.

pub mod business_tax;
pub mod common;
pub mod income_tax;
pub mod loan;
pub mod sst;
pub mod summary;

use rust_decimal::Decimal;

use crate::{TaxSummary, TaxTables};

pub use loan::{amortization_schedule, amortize};
pub use summary::TaxCalculator;

/// Progressive income tax on `gross_income - deductions` using the built-in
/// income schedule.
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::calculate_income_tax;
///
/// assert_eq!(calculate_income_tax(dec!(20000), dec!(0)), dec!(150.00));
/// ```
pub fn calculate_income_tax(
    gross_income: Decimal,
    deductions: Decimal,
) -> Decimal {
    income_tax::calculate(&TaxTables::global().income, gross_income, deductions)
}

/// Two-tier business tax using the built-in rule.
pub fn calculate_business_tax(business_income: Decimal) -> Decimal {
    business_tax::calculate(&TaxTables::global().business, business_income)
}

/// Threshold-gated SST using the built-in rule.
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::calculations::calculate_sst;
///
/// assert_eq!(calculate_sst(dec!(499999.99)), dec!(0));
/// assert_eq!(calculate_sst(dec!(500000)), dec!(30000.00));
/// ```
pub fn calculate_sst(total_sales: Decimal) -> Decimal {
    sst::calculate(&TaxTables::global().sst, total_sales)
}

/// All three taxes against the built-in tables.
pub fn summarize_tax(
    income: Decimal,
    deductions: Decimal,
    business_income: Decimal,
    total_sales: Decimal,
) -> TaxSummary {
    TaxCalculator::new(TaxTables::global()).summarize(income, deductions, business_income, total_sales)
}
