//! Subcommand implementations. Each returns the report text so it can be
//! printed by `main` or inspected in tests.

use std::convert::Infallible;
use std::fmt::Write;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finance_core::calculations::{self, TaxCalculator, income_tax};
use finance_core::input::parse_money;
use finance_core::{LoanInput, TaxTables};
use finance_data::{ScheduleLoader, TaxInputLoader, load_tables};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::display::{format_currency, render_loan_summary, render_schedule, render_tax_summary};

/// Argument parser for tax amounts.
///
/// Goes through [`parse_money`], so `1,234.56` is accepted and blank or
/// unparseable text (including `NaN`) becomes zero instead of an error.
pub fn parse_money_arg(s: &str) -> Result<Decimal, Infallible> {
    Ok(parse_money(s))
}

/// Tables from `tables_path` (TOML), optionally with the income schedule
/// replaced by `brackets_path` (CSV); the built-in tables otherwise.
pub fn resolve_tables(
    tables_path: Option<&Path>,
    brackets_path: Option<&Path>,
) -> Result<TaxTables> {
    let mut tables = match tables_path {
        Some(path) => load_tables(path)?,
        None => TaxTables::default(),
    };

    if let Some(path) = brackets_path {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        tables.income = ScheduleLoader::load(file)
            .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
        info!(path = %path.display(), "income schedule overridden from CSV");
    }

    Ok(tables)
}

pub fn run_tax(
    tables: &TaxTables,
    income: Decimal,
    deductions: Decimal,
    business_income: Decimal,
    total_sales: Decimal,
) -> String {
    let summary =
        TaxCalculator::new(tables).summarize(income, deductions, business_income, total_sales);
    let taxable = income_tax::taxable_income(income, deductions);
    let marginal = tables.income.marginal_rate(taxable) * Decimal::ONE_HUNDRED;

    let mut out = render_tax_summary(&summary);
    let _ = writeln!(out, "Marginal income tax rate: {}%", marginal.normalize());
    out
}

pub fn run_loan(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: i64,
    schedule: bool,
    start_date: Option<NaiveDate>,
) -> Result<String> {
    let input = LoanInput::new(principal, annual_rate_percent, term_months)?;
    let summary = calculations::loan::summarize(&input)?;
    let mut out = render_loan_summary(&summary);

    if schedule {
        let table = calculations::amortization_schedule(&input, start_date)?;
        debug!(rows = table.rows.len(), "amortization schedule built");
        out.push('\n');
        out.push_str(&render_schedule(&table));
    }

    Ok(out)
}

pub fn run_batch(
    tables: &TaxTables,
    path: &Path,
) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = TaxInputLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
    info!("Parsed {} records from CSV", records.len());

    let calculator = TaxCalculator::new(tables);
    let mut out = String::new();
    let mut grand_total = Decimal::ZERO;

    for record in &records {
        let summary = record.summarize(&calculator);
        grand_total += summary.total_tax();
        let _ = writeln!(out, "== {}", record.label);
        out.push_str(&render_tax_summary(&summary));
    }
    let _ = writeln!(out, "== {} records, total tax {}", records.len(), format_currency(grand_total));

    Ok(out)
}
