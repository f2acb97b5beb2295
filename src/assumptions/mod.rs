//! Deal assumptions: escalation conventions, revenue, and operating expenses

mod escalation;
mod expenses;
mod revenue;

pub use escalation::{
    annual_step_factor, continuous_monthly_factor, property_tax_step_factor, EscalationMethod,
};
pub use expenses::ExpenseAssumptions;
pub use revenue::RevenueAssumptions;
