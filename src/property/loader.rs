//! Load a rent roll from CSV

use super::Tenant;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the rent roll export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Tenant")]
    name: String,
    #[serde(rename = "RSF")]
    rsf: f64,
    #[serde(rename = "InPlaceRentPSF")]
    in_place_rent_psf: f64,
    #[serde(rename = "MarketRentPSF")]
    market_rent_psf: f64,
    #[serde(rename = "LeaseEndMonth")]
    lease_end_month: u32,
    #[serde(rename = "RolloverCosts")]
    rollover_costs: u8,
    #[serde(rename = "FreeRentMonths")]
    free_rent_months: u32,
    #[serde(rename = "TIBuildoutMonths")]
    ti_buildout_months: u32,
}

impl CsvRow {
    fn to_tenant(self) -> Result<Tenant, Box<dyn Error>> {
        // Workbook column H convention: 1 = no rollover costs, 0 = costs apply
        let apply_rollover_costs = match self.rollover_costs {
            0 => true,
            1 => false,
            other => return Err(format!("Unknown RolloverCosts flag: {}", other).into()),
        };

        Ok(Tenant {
            name: self.name,
            rsf: self.rsf,
            in_place_rent_psf: self.in_place_rent_psf,
            market_rent_psf: self.market_rent_psf,
            lease_end_month: self.lease_end_month,
            apply_rollover_costs,
            free_rent_months: self.free_rent_months,
            ti_buildout_months: self.ti_buildout_months,
        })
    }
}

/// Load a rent roll from a CSV file
pub fn load_rent_roll<P: AsRef<Path>>(path: P) -> Result<Vec<Tenant>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut tenants = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        tenants.push(row.to_tenant()?);
    }

    Ok(tenants)
}

/// Load a rent roll from any reader (e.g., string buffer)
pub fn load_rent_roll_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<Tenant>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut tenants = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        tenants.push(row.to_tenant()?);
    }

    Ok(tenants)
}
