//! Sales and Service Tax.
//!
//! A cliff rather than a bracket: once total sales reach the threshold the
//! flat rate applies to the entire amount, and below it nothing is due.

use rust_decimal::Decimal;
use tracing::debug;

use crate::SstRule;
use crate::calculations::common::round_half_up;

/// Whether `total_sales` crosses the registration threshold.
pub fn is_liable(
    rule: &SstRule,
    total_sales: Decimal,
) -> bool {
    total_sales > Decimal::ZERO && total_sales >= rule.threshold
}

/// SST due on `total_sales` under `rule`.
pub fn calculate(
    rule: &SstRule,
    total_sales: Decimal,
) -> Decimal {
    if !is_liable(rule, total_sales) {
        return Decimal::ZERO;
    }

    let tax = round_half_up(total_sales * rule.rate);
    debug!(%total_sales, %tax, "sst calculated");
    tax
}
