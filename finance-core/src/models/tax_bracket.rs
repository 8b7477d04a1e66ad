use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous income band taxed at one marginal rate.
///
/// `max` of `None` marks the open-ended top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { min, max, rate }
    }

    /// Portion of `taxable_income` that falls inside this bracket.
    pub fn taxable_portion(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= self.min {
            return Decimal::ZERO;
        }
        let upper = self
            .max
            .map_or(taxable_income, |max| max.min(taxable_income));
        upper - self.min
    }
}
