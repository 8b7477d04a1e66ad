use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Errors raised when a tax table violates its structural invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A schedule must contain at least one bracket.
    #[error("tax schedule has no brackets")]
    Empty,

    /// Rates are fractions and must lie in [0, 1].
    #[error("rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    /// Thresholds, ceilings and bracket bounds cannot be negative.
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    /// A bracket's upper bound must lie strictly above its lower bound.
    #[error("bracket {index} has max {max} not above min {min}")]
    EmptyBracket {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// Each bracket must start exactly where the previous one ended.
    #[error("bracket {index} starts at {min} but previous bracket ends at {previous_max}")]
    NotContiguous {
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },

    /// Only the last bracket may be open-ended.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),
}

/// An ordered, validated sequence of [`TaxBracket`]s for one tax regime.
///
/// Brackets are contiguous, sorted ascending by `min`, and only the final
/// bracket may have an unbounded `max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Builds a schedule, rejecting any bracket list that breaks the
    /// ordering, contiguity or rate invariants.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use finance_core::{TaxBracket, TaxSchedule};
    ///
    /// let schedule = TaxSchedule::new(vec![
    ///     TaxBracket::new(dec!(0), Some(dec!(5000)), dec!(0)),
    ///     TaxBracket::new(dec!(5000), None, dec!(0.01)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(schedule.brackets().len(), 2);
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        validate_brackets(&brackets)?;
        Ok(Self { brackets })
    }

    /// For constant tables whose validity is covered by tests.
    pub(crate) fn from_validated(brackets: Vec<TaxBracket>) -> Self {
        debug_assert!(validate_brackets(&brackets).is_ok());
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Marginal rate that applies to the next unit of income above
    /// `taxable_income`.
    ///
    /// Zero at or above the `max` of a bounded top bracket, since income past
    /// it is not taxed.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.brackets
            .iter()
            .find(|b| taxable_income >= b.min && b.max.is_none_or(|max| taxable_income < max))
            .map_or(Decimal::ZERO, |b| b.rate)
    }
}

impl<'de> Deserialize<'de> for TaxSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let brackets = Vec::<TaxBracket>::deserialize(deserializer)?;
        Self::new(brackets).map_err(serde::de::Error::custom)
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), ScheduleError> {
    let first = brackets.first().ok_or(ScheduleError::Empty)?;
    if first.min < Decimal::ZERO {
        return Err(ScheduleError::NegativeAmount(first.min));
    }

    let last_index = brackets.len() - 1;
    let mut previous_max: Option<Decimal> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(ScheduleError::InvalidRate(bracket.rate));
        }

        if let Some(previous_max) = previous_max {
            if bracket.min != previous_max {
                return Err(ScheduleError::NotContiguous {
                    index,
                    min: bracket.min,
                    previous_max,
                });
            }
        }

        match bracket.max {
            Some(max) if max <= bracket.min => {
                return Err(ScheduleError::EmptyBracket {
                    index,
                    min: bracket.min,
                    max,
                });
            }
            Some(max) => previous_max = Some(max),
            None if index != last_index => return Err(ScheduleError::UnboundedBeforeEnd(index)),
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket::new(min, max, rate)
    }

    #[test]
    fn accepts_contiguous_schedule_with_open_top() {
        let schedule = TaxSchedule::new(vec![
            bracket(dec!(0), Some(dec!(5000)), dec!(0)),
            bracket(dec!(5000), Some(dec!(20000)), dec!(0.01)),
            bracket(dec!(20000), None, dec!(0.03)),
        ]);

        assert!(schedule.is_ok());
    }

    #[test]
    fn accepts_fully_bounded_schedule() {
        let schedule = TaxSchedule::new(vec![bracket(dec!(0), Some(dec!(5000)), dec!(0.10))]);

        assert!(schedule.is_ok());
    }

    #[test]
    fn rejects_empty_schedule() {
        assert_eq!(TaxSchedule::new(vec![]), Err(ScheduleError::Empty));
    }

    #[test]
    fn rejects_gap_between_brackets() {
        let result = TaxSchedule::new(vec![
            bracket(dec!(0), Some(dec!(5000)), dec!(0)),
            bracket(dec!(6000), None, dec!(0.01)),
        ]);

        assert_eq!(
            result,
            Err(ScheduleError::NotContiguous {
                index: 1,
                min: dec!(6000),
                previous_max: dec!(5000),
            })
        );
    }

    #[test]
    fn rejects_overlapping_brackets() {
        let result = TaxSchedule::new(vec![
            bracket(dec!(0), Some(dec!(5000)), dec!(0)),
            bracket(dec!(4000), None, dec!(0.01)),
        ]);

        assert!(matches!(result, Err(ScheduleError::NotContiguous { index: 1, .. })));
    }

    #[test]
    fn rejects_unbounded_bracket_before_end() {
        let result = TaxSchedule::new(vec![
            bracket(dec!(0), None, dec!(0)),
            bracket(dec!(5000), None, dec!(0.01)),
        ]);

        assert_eq!(result, Err(ScheduleError::UnboundedBeforeEnd(0)));
    }

    #[test]
    fn rejects_inverted_bracket() {
        let result = TaxSchedule::new(vec![bracket(dec!(5000), Some(dec!(5000)), dec!(0))]);

        assert!(matches!(result, Err(ScheduleError::EmptyBracket { index: 0, .. })));
    }

    #[test]
    fn rejects_rate_above_one() {
        let result = TaxSchedule::new(vec![bracket(dec!(0), None, dec!(1.5))]);

        assert_eq!(result, Err(ScheduleError::InvalidRate(dec!(1.5))));
    }

    #[test]
    fn rejects_negative_first_min() {
        let result = TaxSchedule::new(vec![bracket(dec!(-1), None, dec!(0.1))]);

        assert_eq!(result, Err(ScheduleError::NegativeAmount(dec!(-1))));
    }

    #[test]
    fn marginal_rate_follows_bracket_boundaries() {
        let schedule = TaxSchedule::new(vec![
            bracket(dec!(0), Some(dec!(5000)), dec!(0)),
            bracket(dec!(5000), None, dec!(0.01)),
        ])
        .unwrap();

        assert_eq!(schedule.marginal_rate(dec!(4999.99)), dec!(0));
        assert_eq!(schedule.marginal_rate(dec!(5000)), dec!(0.01));
    }

    #[test]
    fn marginal_rate_is_zero_past_bounded_top() {
        let schedule = TaxSchedule::new(vec![
            bracket(dec!(0), Some(dec!(5000)), dec!(0.01)),
            bracket(dec!(5000), Some(dec!(20000)), dec!(0.03)),
        ])
        .unwrap();

        assert_eq!(schedule.marginal_rate(dec!(19999.99)), dec!(0.03));
        assert_eq!(schedule.marginal_rate(dec!(20000)), dec!(0));
        assert_eq!(schedule.marginal_rate(dec!(1000000)), dec!(0));
    }

    #[test]
    fn taxable_portion_caps_at_bracket_max() {
        let b = bracket(dec!(5000), Some(dec!(20000)), dec!(0.01));

        assert_eq!(b.taxable_portion(dec!(3000)), dec!(0));
        assert_eq!(b.taxable_portion(dec!(12000)), dec!(7000));
        assert_eq!(b.taxable_portion(dec!(50000)), dec!(15000));
    }

    #[test]
    fn taxable_portion_of_open_bracket_is_excess() {
        let b = bracket(dec!(2000000), None, dec!(0.30));

        assert_eq!(b.taxable_portion(dec!(2500000)), dec!(500000));
    }
}
