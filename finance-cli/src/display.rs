//! Plain-text rendering of calculator results.

use std::fmt::Write;

use finance_core::calculations::common::round_half_up;
use finance_core::{AmortizationSchedule, LoanSummary, TaxSummary};
use rust_decimal::Decimal;

const CURRENCY_SYMBOL: &str = "RM";

/// Formats an amount as `RM 1,234.56`; negatives as `-RM 1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}{CURRENCY_SYMBOL} {}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_tax_summary(summary: &TaxSummary) -> String {
    let rows = [
        ("Income tax", summary.income_tax()),
        ("Business tax", summary.business_tax()),
        ("SST", summary.sst()),
        ("Total tax", summary.total_tax()),
    ];
    render_pairs(&rows)
}

pub fn render_loan_summary(summary: &LoanSummary) -> String {
    let rows = [
        ("Monthly payment", summary.monthly_payment),
        ("Total repayment", summary.total_repayment),
        ("Total interest", summary.total_interest),
    ];
    render_pairs(&rows)
}

pub fn render_schedule(schedule: &AmortizationSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<10}  {:>16}  {:>16}  {:>16}  {:>18}",
        "#", "Due", "Payment", "Interest", "Principal", "Balance"
    );
    for row in &schedule.rows {
        let due = row
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>6}  {:<10}  {:>16}  {:>16}  {:>16}  {:>18}",
            row.period,
            due,
            format_currency(row.payment),
            format_currency(row.interest),
            format_currency(row.principal),
            format_currency(row.balance),
        );
    }
    out
}

fn render_pairs(rows: &[(&str, Decimal)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<width$}  {:>18}", format_currency(*value));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use finance_core::AmortizationRow;

    use super::*;

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.891)), "RM 1,234,567.89");
        assert_eq!(format_currency(dec!(123456)), "RM 123,456.00");
    }

    #[test]
    fn format_currency_small_values() {
        assert_eq!(format_currency(dec!(0)), "RM 0.00");
        assert_eq!(format_currency(dec!(0.5)), "RM 0.50");
        assert_eq!(format_currency(dec!(999.995)), "RM 1,000.00");
    }

    #[test]
    fn format_currency_negative() {
        assert_eq!(format_currency(dec!(-1500.25)), "-RM 1,500.25");
        assert_eq!(format_currency(dec!(-0.001)), "RM 0.00");
    }

    #[test]
    fn tax_summary_lists_each_component() {
        let summary = TaxSummary::new(dec!(150), dec!(102000.24), dec!(30000));

        let text = render_tax_summary(&summary);

        assert!(text.contains("Income tax"));
        assert!(text.contains("RM 102,000.24"));
        assert!(text.lines().last().unwrap().contains("RM 132,150.24"));
    }

    #[test]
    fn loan_summary_lists_totals() {
        let summary = LoanSummary {
            monthly_payment: dec!(1000),
            total_repayment: dec!(12000),
            total_interest: dec!(0),
        };

        let text = render_loan_summary(&summary);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("RM 12,000.00"));
    }

    #[test]
    fn schedule_without_due_dates_is_plain_ascii() {
        let schedule = AmortizationSchedule {
            rows: vec![AmortizationRow {
                period: 1,
                due_date: None,
                payment: dec!(1000),
                interest: dec!(0),
                principal: dec!(1000),
                balance: dec!(0),
            }],
        };

        let text = render_schedule(&schedule);
        let row = text.lines().nth(1).unwrap();

        assert!(text.is_ascii());
        assert_eq!(row.split_whitespace().nth(1), Some("-"));
    }
}
