use std::io::Read;

use finance_core::{ScheduleError, TaxBracket, TaxSchedule};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading an income tax schedule from CSV.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid tax schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// - `min`: lower bound of the bracket
/// - `max`: upper bound (empty for unlimited)
/// - `rate`: the marginal rate as a decimal (e.g., 0.01 for 1%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket::new(record.min, record.max, record.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for income tax brackets from CSV.
///
/// ```csv
/// min,max,rate
/// 0,5000,0
/// 5000,20000,0.01
/// 20000,,0.03
/// ```
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse a CSV reader straight into a validated [`TaxSchedule`].
    pub fn load<R: Read>(reader: R) -> Result<TaxSchedule, ScheduleLoaderError> {
        let brackets = Self::parse(reader)?
            .into_iter()
            .map(TaxBracket::from)
            .collect();

        Ok(TaxSchedule::new(brackets)?)
    }
}
