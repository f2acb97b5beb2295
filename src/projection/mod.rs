//! Deal projection: scenario terms, the two-pass engine, and output rows

mod cashflows;
mod engine;
mod terms;

pub use cashflows::{AnnualCashflow, CashflowResult, CashflowSummary, PeriodCashflow};
pub use engine::CashflowEngine;
pub use terms::{AcquisitionTerms, DealTerms, ExitTerms};
