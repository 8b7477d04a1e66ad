//! Two-tier business tax.
//!
//! A graduated-flat hybrid: the first tier is taxed at a flat rate up to and
//! including its ceiling, and only the excess above the ceiling is taxed at
//! the second rate. The result is continuous at the ceiling.

use rust_decimal::Decimal;
use tracing::debug;

use crate::BusinessTaxRule;
use crate::calculations::common::{non_negative, round_half_up};

/// Business tax on `business_income` under `rule`. Negative income owes
/// nothing.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finance_core::TaxTables;
/// use finance_core::calculations::business_tax;
///
/// let rule = &TaxTables::global().business;
///
/// assert_eq!(business_tax::calculate(rule, dec!(600000)), dec!(102000.00));
/// assert_eq!(business_tax::calculate(rule, dec!(600001)), dec!(102000.24));
/// ```
pub fn calculate(
    rule: &BusinessTaxRule,
    business_income: Decimal,
) -> Decimal {
    let income = non_negative(business_income);
    let tier_one = income.min(rule.tier_one_ceiling);
    let excess = non_negative(income - rule.tier_one_ceiling);

    let tax = round_half_up(tier_one * rule.tier_one_rate + excess * rule.excess_rate);
    debug!(%income, %tax, "business tax calculated");
    tax
}
