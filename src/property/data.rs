//! Tenant data structures matching the rent roll format

use serde::{Deserialize, Serialize};

use crate::assumptions::continuous_monthly_factor;

/// A single tenant from the rent roll
///
/// All rent rates are annual $ per rentable square foot; computed rents are
/// monthly amounts in $000s. A tenant is read-only during a projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant / suite name
    pub name: String,

    /// Rentable area in square feet
    pub rsf: f64,

    /// Contract rent while the in-place lease runs ($/SF/year)
    pub in_place_rent_psf: f64,

    /// Market rent after rollover ($/SF/year)
    pub market_rent_psf: f64,

    /// Last month of the in-place lease (0-based offset from acquisition)
    pub lease_end_month: u32,

    /// Whether TI buildout downtime and free rent apply at rollover.
    /// Workbook column H: H=1 rolls straight to market, H=0 takes the costs.
    #[serde(default)]
    pub apply_rollover_costs: bool,

    /// Free rent granted to the replacement lease, in months
    #[serde(default)]
    pub free_rent_months: u32,

    /// Downtime between lease expiry and the replacement lease, in months
    #[serde(default)]
    pub ti_buildout_months: u32,
}

impl Tenant {
    /// Gross monthly rent and free-rent deduction for a period, in $000s.
    ///
    /// In-place rent applies through `lease_end_month`, market rent after.
    /// With rollover costs enabled, the months immediately after expiry are
    /// dark (TI buildout), then market rent accrues but is fully abated for
    /// the free-rent window (deduction = -gross, netting to zero collected),
    /// then full market rent resumes. A lease ending beyond the hold period
    /// simply never reaches the rollover branch.
    pub fn monthly_rent_detailed(&self, period: u32, rent_growth: f64) -> (f64, f64) {
        let factor = continuous_monthly_factor(rent_growth, period);

        if period <= self.lease_end_month {
            return (self.rsf * self.in_place_rent_psf * factor / 12.0 / 1000.0, 0.0);
        }

        let market = self.rsf * self.market_rent_psf * factor / 12.0 / 1000.0;

        if !self.apply_rollover_costs {
            // Rolls straight to market: no downtime, no abatement
            return (market, 0.0);
        }

        let buildout_end = self.lease_end_month + self.ti_buildout_months;
        let free_rent_end = buildout_end + self.free_rent_months;

        if period <= buildout_end {
            (0.0, 0.0)
        } else if period <= free_rent_end {
            (market, -market)
        } else {
            (market, 0.0)
        }
    }

    /// Gross monthly rent for a period, in $000s
    pub fn monthly_rent(&self, period: u32, rent_growth: f64) -> f64 {
        self.monthly_rent_detailed(period, rent_growth).0
    }

    /// Net monthly rent (gross less free-rent abatement), in $000s
    pub fn net_monthly_rent(&self, period: u32, rent_growth: f64) -> f64 {
        let (gross, free_rent) = self.monthly_rent_detailed(period, rent_growth);
        gross + free_rent
    }
}

/// Total net rent across a rent roll for a period, in $000s
pub fn total_monthly_rent(tenants: &[Tenant], period: u32, rent_growth: f64) -> f64 {
    tenants
        .iter()
        .map(|t| t.net_monthly_rent(period, rent_growth))
        .sum()
}
