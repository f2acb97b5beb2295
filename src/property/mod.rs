//! Tenant rent roll and per-tenant rent model

mod data;
pub mod loader;

pub use data::{total_monthly_rent, Tenant};
pub use loader::{load_rent_roll, load_rent_roll_from_reader};
