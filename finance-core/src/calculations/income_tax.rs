//! Progressive (marginal-rate) income tax.
//!
//! Each bracket's rate applies only to the slice of taxable income that falls
//! inside that bracket. The tax is the fold of those slices over the schedule
//! in ascending order, rounded to cents once at the end.

use rust_decimal::Decimal;
use tracing::debug;

use crate::TaxSchedule;
use crate::calculations::common::{non_negative, round_half_up};

/// Taxable income after deductions, never below zero.
pub fn taxable_income(
    gross_income: Decimal,
    deductions: Decimal,
) -> Decimal {
    non_negative(gross_income - deductions)
}

/// Income tax on `gross_income - deductions` under `schedule`.
///
/// Negative taxable income is clamped to zero rather than reported as an
/// error.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::TaxTables;
/// use finance_core::calculations::income_tax;
///
/// let schedule = &TaxTables::global().income;
///
/// assert_eq!(income_tax::calculate(schedule, dec!(5000), dec!(0)), dec!(0));
/// assert_eq!(income_tax::calculate(schedule, dec!(60000), dec!(10000)), dec!(1500.00));
/// ```
pub fn calculate(
    schedule: &TaxSchedule,
    gross_income: Decimal,
    deductions: Decimal,
) -> Decimal {
    let taxable = taxable_income(gross_income, deductions);

    let tax = schedule
        .brackets()
        .iter()
        .take_while(|bracket| bracket.min < taxable)
        .fold(Decimal::ZERO, |acc, bracket| {
            acc + bracket.taxable_portion(taxable) * bracket.rate
        });

    let tax = round_half_up(tax);
    debug!(%taxable, %tax, "income tax calculated");
    tax
}
