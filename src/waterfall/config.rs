//! Waterfall structure configuration

use serde::{Deserialize, Serialize};

/// Residual profit split after preferred return and capital are satisfied.
/// Three-way: the GP promote is an incremental carry slice on top of the
/// GP's base share, not carved out of the LP's portion. Shares sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinalSplit {
    pub lp: f64,
    pub gp: f64,
    pub gp_promote: f64,
}

impl Default for FinalSplit {
    /// Post-hurdle economics: LP 75%, GP 10% base plus 15% promote
    fn default() -> Self {
        Self {
            lp: 0.75,
            gp: 0.10,
            gp_promote: 0.15,
        }
    }
}

impl FinalSplit {
    /// A straight pro-rata split with no promote
    pub fn pro_rata(lp_share: f64, gp_share: f64) -> Self {
        Self {
            lp: lp_share,
            gp: gp_share,
            gp_promote: 0.0,
        }
    }
}

/// LP/GP waterfall configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallConfig {
    /// LP's share of contributed equity
    pub lp_share: f64,

    /// GP's share of contributed equity
    pub gp_share: f64,

    /// Annual preferred return rate
    pub pref_return: f64,

    /// Compound the preferred return on the accrued unpaid balance instead
    /// of simple interest on original equity
    #[serde(default)]
    pub compound_monthly: bool,

    /// Residual profit split once pref and capital are paid
    #[serde(default)]
    pub final_split: FinalSplit,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            lp_share: 0.90,
            gp_share: 0.10,
            pref_return: 0.05,
            compound_monthly: false,
            final_split: FinalSplit::default(),
        }
    }
}
