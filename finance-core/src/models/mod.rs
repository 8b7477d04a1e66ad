mod business_tax_rule;
mod loan;
mod sst_rule;
mod tax_bracket;
mod tax_schedule;
mod tax_summary;

pub use business_tax_rule::BusinessTaxRule;
pub use loan::{
    AmortizationRow, AmortizationSchedule, LoanError, LoanInput, LoanSummary, MAX_TERM_MONTHS,
};
pub use sst_rule::SstRule;
pub use tax_bracket::TaxBracket;
pub use tax_schedule::{ScheduleError, TaxSchedule};
pub use tax_summary::TaxSummary;
