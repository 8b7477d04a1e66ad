//! Reference tax tables.
//!
//! The built-in tables mirror the Malaysian resident individual income tax
//! scale, the SME corporate tiers and the service-tax registration threshold.
//! They are built once on first use and shared read-only for the life of the
//! process; alternative tables can be constructed (or loaded from a file by
//! `finance-data`) and passed to the calculators by reference.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BusinessTaxRule, ScheduleError, SstRule, TaxBracket, TaxSchedule};

/// Every table the tax calculators need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    pub income: TaxSchedule,
    pub business: BusinessTaxRule,
    pub sst: SstRule,
}

static DEFAULT_TABLES: OnceLock<TaxTables> = OnceLock::new();

/// `(min, max, rate)` in whole ringgit and whole percent.
const INCOME_BANDS: &[(i64, Option<i64>, i64)] = &[
    (0, Some(5_000), 0),
    (5_000, Some(20_000), 1),
    (20_000, Some(35_000), 3),
    (35_000, Some(50_000), 6),
    (50_000, Some(70_000), 11),
    (70_000, Some(100_000), 19),
    (100_000, Some(400_000), 25),
    (400_000, Some(600_000), 26),
    (600_000, Some(2_000_000), 28),
    (2_000_000, None, 30),
];

impl TaxTables {
    /// Validates the three tables together.
    pub fn new(
        income: TaxSchedule,
        business: BusinessTaxRule,
        sst: SstRule,
    ) -> Result<Self, ScheduleError> {
        business.validate()?;
        sst.validate()?;
        Ok(Self {
            income,
            business,
            sst,
        })
    }

    /// Shared instance of the built-in tables.
    pub fn global() -> &'static TaxTables {
        DEFAULT_TABLES.get_or_init(Self::builtin)
    }

    fn builtin() -> Self {
        let brackets = INCOME_BANDS
            .iter()
            .map(|&(min, max, rate)| {
                TaxBracket::new(
                    Decimal::from(min),
                    max.map(Decimal::from),
                    percent(rate),
                )
            })
            .collect();

        Self {
            income: TaxSchedule::from_validated(brackets),
            business: BusinessTaxRule {
                tier_one_ceiling: Decimal::from(600_000),
                tier_one_rate: percent(17),
                excess_rate: percent(24),
            },
            sst: SstRule {
                rate: percent(6),
                threshold: Decimal::from(500_000),
            },
        }
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::global().clone()
    }
}

fn percent(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn builtin_income_schedule_starts_zero_rated() {
        let tables = TaxTables::global();
        let first = &tables.income.brackets()[0];

        assert_eq!(first.min, dec!(0));
        assert_eq!(first.max, Some(dec!(5000)));
        assert_eq!(first.rate, dec!(0));
    }

    #[test]
    fn builtin_income_schedule_has_open_top() {
        let tables = TaxTables::global();
        let last = tables.income.brackets().last().unwrap();

        assert_eq!(last.min, dec!(2000000));
        assert_eq!(last.max, None);
        assert_eq!(last.rate, dec!(0.30));
    }

    #[test]
    fn builtin_business_and_sst_rules() {
        let tables = TaxTables::global();

        assert_eq!(tables.business.tier_one_ceiling, dec!(600000));
        assert_eq!(tables.business.tier_one_rate, dec!(0.17));
        assert_eq!(tables.business.excess_rate, dec!(0.24));
        assert_eq!(tables.sst.rate, dec!(0.06));
        assert_eq!(tables.sst.threshold, dec!(500000));
    }

    #[test]
    fn builtin_income_schedule_passes_validation() {
        let brackets = TaxTables::global().income.brackets().to_vec();

        assert!(TaxSchedule::new(brackets).is_ok());
    }

    #[test]
    fn global_returns_same_instance() {
        assert!(std::ptr::eq(TaxTables::global(), TaxTables::global()));
    }

    #[test]
    fn new_rejects_invalid_sst_rule() {
        let tables = TaxTables::global();
        let bad_sst = SstRule {
            rate: dec!(1.2),
            threshold: dec!(0),
        };

        let result = TaxTables::new(tables.income.clone(), tables.business, bad_sst);

        assert_eq!(result, Err(ScheduleError::InvalidRate(dec!(1.2))));
    }
}
