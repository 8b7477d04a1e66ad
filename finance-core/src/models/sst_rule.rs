use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_schedule::ScheduleError;

/// Threshold-gated flat sales and service tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SstRule {
    pub rate: Decimal,
    pub threshold: Decimal,
}

impl SstRule {
    pub fn new(
        rate: Decimal,
        threshold: Decimal,
    ) -> Result<Self, ScheduleError> {
        let rule = Self { rate, threshold };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE {
            return Err(ScheduleError::InvalidRate(self.rate));
        }
        if self.threshold < Decimal::ZERO {
            return Err(ScheduleError::NegativeAmount(self.threshold));
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for SstRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            rate: Decimal,
            threshold: Decimal,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.rate, raw.threshold).map_err(serde::de::Error::custom)
    }
}
