use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_schedule::ScheduleError;

/// Two-tier business tax.
///
/// Income up to and including `tier_one_ceiling` is taxed at
/// `tier_one_rate`; only the excess above the ceiling is taxed at
/// `excess_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessTaxRule {
    pub tier_one_ceiling: Decimal,
    pub tier_one_rate: Decimal,
    pub excess_rate: Decimal,
}

impl BusinessTaxRule {
    pub fn new(
        tier_one_ceiling: Decimal,
        tier_one_rate: Decimal,
        excess_rate: Decimal,
    ) -> Result<Self, ScheduleError> {
        let rule = Self {
            tier_one_ceiling,
            tier_one_rate,
            excess_rate,
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        for rate in [self.tier_one_rate, self.excess_rate] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ScheduleError::InvalidRate(rate));
            }
        }
        if self.tier_one_ceiling < Decimal::ZERO {
            return Err(ScheduleError::NegativeAmount(self.tier_one_ceiling));
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for BusinessTaxRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            tier_one_ceiling: Decimal,
            tier_one_rate: Decimal,
            excess_rate: Decimal,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.tier_one_ceiling, raw.tier_one_rate, raw.excess_rate)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_rejects_rate_above_one() {
        assert_eq!(
            BusinessTaxRule::new(dec!(600000), dec!(0.17), dec!(1.24)),
            Err(ScheduleError::InvalidRate(dec!(1.24)))
        );
    }

    #[test]
    fn new_rejects_negative_ceiling() {
        assert_eq!(
            BusinessTaxRule::new(dec!(-1), dec!(0.17), dec!(0.24)),
            Err(ScheduleError::NegativeAmount(dec!(-1)))
        );
    }

    #[test]
    fn deserialize_accepts_valid_rule() {
        let rule: BusinessTaxRule = toml::from_str(
            r#"
            tier_one_ceiling = "600000"
            tier_one_rate = "0.17"
            excess_rate = "0.24"
            "#,
        )
        .unwrap();

        assert_eq!(rule, BusinessTaxRule::new(dec!(600000), dec!(0.17), dec!(0.24)).unwrap());
    }

    #[test]
    fn deserialize_rejects_out_of_range_rate() {
        let err = toml::from_str::<BusinessTaxRule>(
            r#"
            tier_one_ceiling = "600000"
            tier_one_rate = "1.15"
            excess_rate = "0.24"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("1.15"), "{err}");
    }

    #[test]
    fn deserialize_rejects_negative_ceiling() {
        let result = toml::from_str::<BusinessTaxRule>(
            r#"
            tier_one_ceiling = "-5"
            tier_one_rate = "0.17"
            excess_rate = "0.24"
            "#,
        );

        assert!(result.is_err());
    }
}
