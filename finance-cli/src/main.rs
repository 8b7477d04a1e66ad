use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use finance_cli::{commands, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Income tax, business tax, SST and loan amortization calculator.
#[derive(Debug, Parser)]
#[command(name = "finance-calc", version, about, long_about = None)]
struct Cli {
    /// Tax tables TOML file (built-in tables when omitted).
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// CSV file replacing the income tax brackets (`min,max,rate`).
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Income tax, business tax and SST for one set of figures.
    Tax {
        /// Gross annual income.
        #[arg(
            long,
            default_value = "0",
            allow_hyphen_values = true,
            value_parser = commands::parse_money_arg
        )]
        income: Decimal,

        /// Total deductions and reliefs.
        #[arg(
            long,
            default_value = "0",
            allow_hyphen_values = true,
            value_parser = commands::parse_money_arg
        )]
        deductions: Decimal,

        /// Chargeable business income.
        #[arg(
            long,
            default_value = "0",
            allow_hyphen_values = true,
            value_parser = commands::parse_money_arg
        )]
        business_income: Decimal,

        /// Taxable sales for the period.
        #[arg(
            long,
            default_value = "0",
            allow_hyphen_values = true,
            value_parser = commands::parse_money_arg
        )]
        sales: Decimal,
    },

    /// Fixed monthly payment and totals for a loan.
    Loan {
        /// Amount borrowed.
        #[arg(long)]
        principal: Decimal,

        /// Annual interest rate in percent (e.g. `4.5`).
        #[arg(long, allow_hyphen_values = true)]
        rate: Decimal,

        /// Term in months.
        #[arg(long, allow_hyphen_values = true)]
        term: i64,

        /// Print the month-by-month table.
        #[arg(long, default_value_t = false)]
        schedule: bool,

        /// First period start date (YYYY-MM-DD) for due dates.
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Tax summaries for every row of a CSV file.
    Batch {
        /// CSV with `label,income,deductions,business_income,total_sales`.
        #[arg(short, long)]
        file: PathBuf,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;
    debug!(?cli, "parsed arguments");

    let report = match cli.command {
        Command::Tax {
            income,
            deductions,
            business_income,
            sales,
        } => {
            let tables = commands::resolve_tables(cli.tables.as_deref(), cli.brackets.as_deref())?;
            commands::run_tax(&tables, income, deductions, business_income, sales)
        }
        Command::Loan {
            principal,
            rate,
            term,
            schedule,
            start,
        } => commands::run_loan(principal, rate, term, schedule, start)?,
        Command::Batch { file } => {
            let tables = commands::resolve_tables(cli.tables.as_deref(), cli.brackets.as_deref())?;
            commands::run_batch(&tables, &file)?
        }
    };

    print!("{report}");
    Ok(())
}
