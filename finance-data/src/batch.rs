//! CSV loader for batch tax inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter. Every amount
//! column is optional and a blank, missing or malformed cell counts as zero.
//!
//! | Column            | Required | Type    |
//! |-------------------|----------|---------|
//! | `label`           | no       | string  |
//! | `income`          | no       | decimal |
//! | `deductions`      | no       | decimal |
//! | `business_income` | no       | decimal |
//! | `total_sales`     | no       | decimal |
//!
//! ```csv
//! label,income,deductions,business_income,total_sales
//! sole trader,"85,000.00",9000,250000,120000
//! shop,,,,500000
//! ```

use std::io::Read;

use finance_core::calculations::TaxCalculator;
use finance_core::input::parse_optional_money;
use finance_core::TaxSummary;
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    income: Option<String>,
    #[serde(default)]
    deductions: Option<String>,
    #[serde(default)]
    business_income: Option<String>,
    #[serde(default)]
    total_sales: Option<String>,
}

/// Errors that can occur while loading batch input.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    /// The underlying CSV deserialisation failed on the given 1-based row.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// One set of tax inputs, already sanitised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxInputRecord {
    pub label: String,
    pub income: Decimal,
    pub deductions: Decimal,
    pub business_income: Decimal,
    pub total_sales: Decimal,
}

impl TaxInputRecord {
    pub fn summarize(
        &self,
        calculator: &TaxCalculator<'_>,
    ) -> TaxSummary {
        calculator.summarize(
            self.income,
            self.deductions,
            self.business_income,
            self.total_sales,
        )
    }
}

/// Convert a single CSV row. `row_number` is 1-based and labels unnamed rows.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> TaxInputRecord {
    TaxInputRecord {
        label: row
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| format!("row {row_number}")),
        income: parse_optional_money(row.income.as_deref()),
        deductions: parse_optional_money(row.deductions.as_deref()),
        business_income: parse_optional_money(row.business_income.as_deref()),
        total_sales: parse_optional_money(row.total_sales.as_deref()),
    }
}

/// Loader for batch tax inputs.
pub struct TaxInputLoader;

impl TaxInputLoader {
    /// Reads every row of `reader`.
    ///
    /// Malformed amounts become zero; only structural CSV problems fail the
    /// load.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxInputRecord>, BatchLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(index, result)| {
                let row = index + 1;
                result
                    .map(|r| convert_row(r, row))
                    .map_err(|source| BatchLoadError::Parse { row, source })
            })
            .collect()
    }
}
