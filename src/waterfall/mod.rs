//! LP/GP equity waterfall: configuration, engine, and distribution records

mod config;
mod distributions;
mod engine;

pub use config::{FinalSplit, WaterfallConfig};
pub use distributions::{
    calculate_waterfall_summary, extract_gp_cash_flows, extract_lp_cash_flows, DistributionRow,
    WaterfallSummary,
};
pub use engine::WaterfallEngine;
