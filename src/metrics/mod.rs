//! IRR/NPV solver and return metric bundles

pub mod irr;
mod returns;

pub use irr::{
    annual_to_monthly_irr, calculate_irr, calculate_irr_from, calculate_multiple, calculate_npv,
    calculate_profit, calculate_xirr, calculate_xirr_from, calculate_xnpv, monthly_to_annual_irr,
};
pub use returns::ReturnMetrics;
