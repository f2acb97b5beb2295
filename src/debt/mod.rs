//! Debt: loan terms and amortization schedules

pub mod amortization;
mod terms;

pub use amortization::{
    calculate_debt_service, calculate_dscr, calculate_loan_constant, calculate_payment,
    calculate_remaining_balance, calculate_total_interest, calculate_total_principal,
    generate_amortization_schedule, AmortizationRow,
};
pub use terms::LoanTerms;
