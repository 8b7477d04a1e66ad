//! Fixed-payment loan amortization.
//!
//! The monthly payment follows the standard annuity formula
//!
//! ```text
//! payment = P * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! with `r` the monthly rate and `n` the term in months. A zero rate makes the
//! formula 0/0, so that case is `P / n`. Intermediate values keep full decimal
//! precision and are rounded to cents only when the summary is produced.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finance_core::calculations::amortize;
//!
//! let summary = amortize(dec!(100000), dec!(6), 360).unwrap();
//!
//! assert_eq!(summary.monthly_payment, dec!(599.55));
//! assert_eq!(summary.total_repayment, dec!(215838.19));
//! assert_eq!(summary.total_interest, dec!(115838.19));
//! ```

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::{AmortizationRow, AmortizationSchedule, LoanError, LoanInput, LoanSummary};

/// Validates the raw parameters and amortizes them.
///
/// # Errors
///
/// [`LoanError::InvalidInput`] for a non-positive principal, a negative rate
/// or a term outside `1..=MAX_TERM_MONTHS`, plus anything [`summarize`] returns.
pub fn amortize(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: i64,
) -> Result<LoanSummary, LoanError> {
    let input = LoanInput::new(principal, annual_rate_percent, term_months)?;
    summarize(&input)
}

/// Unrounded fixed monthly payment.
///
/// # Errors
///
/// [`LoanError::Overflow`] when `(1 + r)^n` does not fit in a decimal.
pub fn monthly_payment(input: &LoanInput) -> Result<Decimal, LoanError> {
    let principal = input.principal();
    let term = input.term_months();
    let rate = input.monthly_rate();

    if rate.is_zero() {
        return Ok(principal / Decimal::from(term));
    }

    let overflow = || LoanError::Overflow {
        monthly_rate: rate,
        term_months: term,
    };

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(term))
        .ok_or_else(overflow)?;

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(factor - Decimal::ONE))
        .ok_or_else(overflow)
}

/// Monthly payment, total repayment and total interest, each in cents.
///
/// Totals are derived from the unrounded payment so rounding error does not
/// compound over the term.
///
/// # Errors
///
/// [`LoanError::Overflow`] from [`monthly_payment`], or
/// [`LoanError::NegativeInterest`] if repayment would fall short of the
/// principal.
pub fn summarize(input: &LoanInput) -> Result<LoanSummary, LoanError> {
    let payment = monthly_payment(input)?;
    let principal = round_half_up(input.principal());

    let total_repayment = payment
        .checked_mul(Decimal::from(input.term_months()))
        .map(round_half_up)
        .ok_or(LoanError::Overflow {
            monthly_rate: input.monthly_rate(),
            term_months: input.term_months(),
        })?;
    let total_interest = total_repayment - principal;

    if total_interest < Decimal::ZERO {
        return Err(LoanError::NegativeInterest(total_interest));
    }

    let summary = LoanSummary {
        monthly_payment: round_half_up(payment),
        total_repayment,
        total_interest,
    };
    debug!(
        monthly_payment = %summary.monthly_payment,
        total_interest = %summary.total_interest,
        "loan amortized"
    );
    Ok(summary)
}

/// Month-by-month repayment table.
///
/// Every row pays the rounded monthly payment, split into interest on the
/// opening balance (rounded to cents) and principal. The final row absorbs
/// the accumulated rounding so the closing balance is exactly zero. When
/// `start_date` is given, payment `k` falls due `k` months after it.
///
/// # Errors
///
/// Same as [`monthly_payment`].
pub fn amortization_schedule(
    input: &LoanInput,
    start_date: Option<NaiveDate>,
) -> Result<AmortizationSchedule, LoanError> {
    let payment = round_half_up(monthly_payment(input)?);
    let rate = input.monthly_rate();
    let term = input.term_months();

    let mut balance = round_half_up(input.principal());
    let mut rows = Vec::new();

    for period in 1..=term {
        let interest = round_half_up(balance * rate);
        let principal = if period == term {
            balance
        } else {
            (payment - interest).min(balance).max(Decimal::ZERO)
        };
        balance -= principal;

        rows.push(AmortizationRow {
            period,
            due_date: start_date.and_then(|d| d.checked_add_months(Months::new(period))),
            payment: interest + principal,
            interest,
            principal,
            balance,
        });
    }

    Ok(AmortizationSchedule { rows })
}
