use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the loan calculators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    /// A loan parameter is outside its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// The compounding factor does not fit in a decimal.
    #[error("compounding overflow for monthly rate {monthly_rate} over {term_months} months")]
    Overflow {
        monthly_rate: Decimal,
        term_months: u32,
    },

    /// Total repayment came out below the principal.
    #[error("total interest is negative ({0}); inputs are inconsistent")]
    NegativeInterest(Decimal),
}

impl LoanError {
    fn invalid(
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Longest accepted term: 100 years of monthly payments.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Validated loan parameters.
///
/// Only obtainable through [`LoanInput::new`] or [`LoanInput::from_f64`], so a
/// `LoanInput` always has a positive principal, a non-negative rate and a
/// term between 1 and [`MAX_TERM_MONTHS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
}

impl LoanInput {
    /// # Errors
    ///
    /// [`LoanError::InvalidInput`] if the principal is not positive, the rate
    /// is negative, or the term is not in `1..=MAX_TERM_MONTHS`.
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        term_months: i64,
    ) -> Result<Self, LoanError> {
        if principal <= Decimal::ZERO {
            return Err(LoanError::invalid(
                "principal",
                format!("must be positive, got {principal}"),
            ));
        }
        if annual_rate_percent < Decimal::ZERO {
            return Err(LoanError::invalid(
                "annual_rate_percent",
                format!("must be non-negative, got {annual_rate_percent}"),
            ));
        }
        let term_months = u32::try_from(term_months)
            .ok()
            .filter(|t| (1..=MAX_TERM_MONTHS).contains(t))
            .ok_or_else(|| {
                LoanError::invalid(
                    "term_months",
                    format!("must be between 1 and {MAX_TERM_MONTHS}, got {term_months}"),
                )
            })?;

        Ok(Self {
            principal,
            annual_rate_percent,
            term_months,
        })
    }

    /// Builds an input from raw floating-point form values.
    ///
    /// Non-finite values are rejected rather than clamped.
    pub fn from_f64(
        principal: f64,
        annual_rate_percent: f64,
        term_months: i64,
    ) -> Result<Self, LoanError> {
        let principal = finite_decimal("principal", principal)?;
        let annual_rate_percent = finite_decimal("annual_rate_percent", annual_rate_percent)?;
        Self::new(principal, annual_rate_percent, term_months)
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// `annual_rate_percent / 100 / 12`, unrounded.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12)
    }
}

impl<'de> Deserialize<'de> for LoanInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            principal: Decimal,
            annual_rate_percent: Decimal,
            term_months: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.principal, raw.annual_rate_percent, raw.term_months)
            .map_err(serde::de::Error::custom)
    }
}

fn finite_decimal(
    field: &'static str,
    value: f64,
) -> Result<Decimal, LoanError> {
    if !value.is_finite() {
        return Err(LoanError::invalid(field, format!("must be finite, got {value}")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| LoanError::invalid(field, format!("out of range: {value}")))
}

/// Headline figures for a fixed-payment loan, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: Decimal,
    pub total_repayment: Decimal,
    pub total_interest: Decimal,
}

/// One month of an amortization table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number.
    pub period: u32,
    pub due_date: Option<NaiveDate>,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Outstanding balance after this payment.
    pub balance: Decimal,
}

/// Month-by-month repayment table for a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn total_paid(&self) -> Decimal {
        self.rows.iter().map(|r| r.payment).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> Decimal {
        self.rows.iter().map(|r| r.principal).sum()
    }

    pub fn final_balance(&self) -> Decimal {
        self.rows.last().map_or(Decimal::ZERO, |r| r.balance)
    }
}
