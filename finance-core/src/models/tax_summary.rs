use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Combined tax liability.
///
/// `total_tax` is only ever produced by [`TaxSummary::new`], so it is always
/// the exact sum of the three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxSummary {
    income_tax: Decimal,
    business_tax: Decimal,
    sst: Decimal,
    total_tax: Decimal,
}

impl TaxSummary {
    pub fn new(
        income_tax: Decimal,
        business_tax: Decimal,
        sst: Decimal,
    ) -> Self {
        Self {
            income_tax,
            business_tax,
            sst,
            total_tax: income_tax + business_tax + sst,
        }
    }

    pub fn income_tax(&self) -> Decimal {
        self.income_tax
    }

    pub fn business_tax(&self) -> Decimal {
        self.business_tax
    }

    pub fn sst(&self) -> Decimal {
        self.sst
    }

    pub fn total_tax(&self) -> Decimal {
        self.total_tax
    }
}

impl<'de> Deserialize<'de> for TaxSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The stored total is ignored and recomputed from the components.
        #[derive(Deserialize)]
        struct Components {
            income_tax: Decimal,
            business_tax: Decimal,
            sst: Decimal,
        }

        let c = Components::deserialize(deserializer)?;
        Ok(Self::new(c.income_tax, c.business_tax, c.sst))
    }
}
