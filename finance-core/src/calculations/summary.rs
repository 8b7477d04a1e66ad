//! Aggregation of the individual taxes into a [`TaxSummary`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finance_core::TaxTables;
//! use finance_core::calculations::TaxCalculator;
//!
//! let calculator = TaxCalculator::new(TaxTables::global());
//! let summary = calculator.summarize(dec!(20000), dec!(0), dec!(600001), dec!(500000));
//!
//! assert_eq!(summary.income_tax(), dec!(150.00));
//! assert_eq!(summary.business_tax(), dec!(102000.24));
//! assert_eq!(summary.sst(), dec!(30000.00));
//! assert_eq!(summary.total_tax(), dec!(132150.24));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{business_tax, income_tax, sst};
use crate::{TaxSummary, TaxTables};

/// Calculator bound to one set of tax tables.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a TaxTables {
        self.tables
    }

    pub fn income_tax(
        &self,
        gross_income: Decimal,
        deductions: Decimal,
    ) -> Decimal {
        income_tax::calculate(&self.tables.income, gross_income, deductions)
    }

    pub fn business_tax(
        &self,
        business_income: Decimal,
    ) -> Decimal {
        business_tax::calculate(&self.tables.business, business_income)
    }

    pub fn sst(
        &self,
        total_sales: Decimal,
    ) -> Decimal {
        sst::calculate(&self.tables.sst, total_sales)
    }

    /// Computes each tax (each rounded to cents) and sums the rounded values.
    pub fn summarize(
        &self,
        income: Decimal,
        deductions: Decimal,
        business_income: Decimal,
        total_sales: Decimal,
    ) -> TaxSummary {
        let summary = TaxSummary::new(
            self.income_tax(income, deductions),
            self.business_tax(business_income),
            self.sst(total_sales),
        );
        debug!(total_tax = %summary.total_tax(), "tax summary calculated");
        summary
    }
}

impl Default for TaxCalculator<'static> {
    fn default() -> Self {
        Self::new(TaxTables::global())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BusinessTaxRule, SstRule, TaxBracket, TaxSchedule};

    #[test]
    fn summarize_all_zero() {
        let summary = TaxCalculator::default().summarize(dec!(0), dec!(0), dec!(0), dec!(0));

        assert_eq!(summary.total_tax(), dec!(0));
    }

    #[test]
    fn summarize_sums_components() {
        let summary =
            TaxCalculator::default().summarize(dec!(85000), dec!(9000), dec!(250000), dec!(120000));

        // income: taxable 76000 -> 3700 + 6000 * 0.19 = 4840
        assert_eq!(summary.income_tax(), dec!(4840.00));
        assert_eq!(summary.business_tax(), dec!(42500.00));
        assert_eq!(summary.sst(), dec!(0));
        assert_eq!(summary.total_tax(), dec!(47340.00));
    }

    #[test]
    fn total_is_sum_of_rounded_components() {
        // Each leaf rounds up by half a cent; re-rounding an unrounded sum
        // would give 0.02 instead of 0.03.
        let tables = TaxTables::new(
            TaxSchedule::new(vec![TaxBracket::new(dec!(0), None, dec!(0.01))]).unwrap(),
            BusinessTaxRule::new(dec!(1000), dec!(0.01), dec!(0.01)).unwrap(),
            SstRule::new(dec!(0.01), dec!(0)).unwrap(),
        )
        .unwrap();
        let calculator = TaxCalculator::new(&tables);

        let summary = calculator.summarize(dec!(0.5), dec!(0), dec!(0.5), dec!(0.5));

        assert_eq!(summary.income_tax(), dec!(0.01));
        assert_eq!(summary.business_tax(), dec!(0.01));
        assert_eq!(summary.sst(), dec!(0.01));
        assert_eq!(summary.total_tax(), dec!(0.03));
    }

    #[test]
    fn total_invariant_holds_over_a_grid() {
        let calculator = TaxCalculator::default();
        let amounts = [dec!(0), dec!(4999.99), dec!(20000.50), dec!(600000.01), dec!(2500000.37)];

        for income in amounts {
            for sales in [dec!(499999.99), dec!(500000), dec!(812345.67)] {
                let s = calculator.summarize(income, dec!(1234.56), income, sales);
                assert_eq!(s.total_tax(), s.income_tax() + s.business_tax() + s.sst());
            }
        }
    }

    #[test]
    fn free_function_matches_default_calculator() {
        let a = crate::calculations::summarize_tax(dec!(50000), dec!(0), dec!(10), dec!(600000));
        let b = TaxCalculator::default().summarize(dec!(50000), dec!(0), dec!(10), dec!(600000));

        assert_eq!(a, b);
    }
}
