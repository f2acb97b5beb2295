//! Revenue assumptions for a deal

use serde::{Deserialize, Serialize};

use crate::assumptions::continuous_monthly_factor;
use crate::property::{total_monthly_rent, Tenant};

/// Revenue-side assumptions: either a uniform SF/PSF pair or a tenant-level
/// rent roll, plus growth, vacancy, and the lease structure flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueAssumptions {
    /// Total rentable area in square feet
    pub total_sf: f64,

    /// Blended in-place rent ($/SF/year), used when no rent roll is supplied
    pub in_place_rent_psf: f64,

    /// Annual rent growth rate
    pub rent_growth: f64,

    /// Vacancy and collection loss rate
    pub vacancy_rate: f64,

    /// NNN lease structure: operating expenses are reimbursed as revenue
    #[serde(default)]
    pub nnn_lease: bool,

    /// Tenant-level rent roll; empty falls back to the uniform formula
    #[serde(default)]
    pub tenants: Vec<Tenant>,
}

impl RevenueAssumptions {
    /// Monthly base rent for a period in $000s: rent-roll total when tenants
    /// are configured, otherwise the uniform blended-PSF formula.
    pub fn monthly_base_rent(&self, period: u32) -> f64 {
        if self.tenants.is_empty() {
            let factor = continuous_monthly_factor(self.rent_growth, period);
            self.total_sf * self.in_place_rent_psf * factor / 12.0 / 1000.0
        } else {
            total_monthly_rent(&self.tenants, period, self.rent_growth)
        }
    }
}
