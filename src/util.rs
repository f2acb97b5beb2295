//! Shared date and rounding helpers

use chrono::{Months, NaiveDate};

/// Round to cent precision (2 decimals).
///
/// Applied only when a value is stored into an output record; running
/// balances and intermediate arithmetic stay unrounded so rounding error
/// cannot compound across periods.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Step a calendar date forward by whole months, clamping the day of month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .expect("date arithmetic overflow")
}

/// Monthly date series: `start` plus each of 0..=num_months month offsets
pub fn generate_monthly_dates(start: NaiveDate, num_months: u32) -> Vec<NaiveDate> {
    (0..=num_months).map(|m| add_months(start, m)).collect()
}
