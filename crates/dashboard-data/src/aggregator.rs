//! Rental aggregation: scalar totals, the monthly trend and the hourly
//! working-day profile.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use dashboard_core::models::{RentalRecord, RentalTable};
use dashboard_core::time_utils::month_end;
use dashboard_core::{DashboardError, Result};
use serde::{Deserialize, Serialize};

/// Message shown in place of the hourly chart when the data is daily.
pub const HOURLY_UNAVAILABLE_MESSAGE: &str =
    "Column 'hr' not found. Please use the hour.csv data for main_data.csv";

// ── Totals ────────────────────────────────────────────────────────────────────

/// Rental sums across a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_cnt: u64,
    pub total_casual: u64,
    pub total_registered: u64,
}

impl Totals {
    /// Add a single record's counts to the running totals.
    pub fn add_record(&mut self, record: &RentalRecord) {
        self.total_cnt += record.cnt;
        self.total_casual += record.casual;
        self.total_registered += record.registered;
    }
}

// ── Monthly series ────────────────────────────────────────────────────────────

/// Total rentals within one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Last day of the month; the series key.
    pub month_end: NaiveDate,
    pub total_cnt: u64,
}

// ── Hourly profile ────────────────────────────────────────────────────────────

/// Mean rentals per row for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: u8,
    pub mean_casual: f64,
    pub mean_registered: f64,
}

/// Hourly working-day profile, or the signal that the data has no `hr`
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "points", rename_all = "lowercase")]
pub enum HourlyProfile {
    Available(Vec<HourlyPoint>),
    Unavailable,
}

impl HourlyProfile {
    /// The profile points, or [`DashboardError::FeatureUnavailable`].
    pub fn points(&self) -> Result<&[HourlyPoint]> {
        match self {
            Self::Available(points) => Ok(points),
            Self::Unavailable => Err(DashboardError::FeatureUnavailable(
                "column 'hr' not found".to_string(),
            )),
        }
    }
}

/// Running sums for one hour bucket.
#[derive(Debug, Clone, Copy, Default)]
struct HourBucket {
    casual: u64,
    registered: u64,
    rows: u64,
}

impl HourBucket {
    fn add_record(&mut self, record: &RentalRecord) {
        self.casual += record.casual;
        self.registered += record.registered;
        self.rows += 1;
    }

    /// Buckets only exist once a row was added, so `rows >= 1`.
    fn into_point(self, hour: u8) -> HourlyPoint {
        let rows = self.rows as f64;
        HourlyPoint {
            hour,
            mean_casual: self.casual as f64 / rows,
            mean_registered: self.registered as f64 / rows,
        }
    }
}

// ── RentalAggregator ──────────────────────────────────────────────────────────

/// Stateless helper computing the dashboard's views from a (filtered) table.
pub struct RentalAggregator;

impl RentalAggregator {
    /// Sum `cnt`, `casual` and `registered` across all rows.
    pub fn totals(table: &RentalTable) -> Totals {
        let mut totals = Totals::default();
        for record in table.records() {
            totals.add_record(record);
        }
        totals
    }

    /// Sum `cnt` per calendar month, keyed by the month's last day.
    ///
    /// Months without rows are absent; entries are strictly increasing.
    pub fn monthly_series(table: &RentalTable) -> Vec<MonthlyPoint> {
        // Keyed by (year, month) so iteration is chronological.
        let mut months: BTreeMap<(i32, u32), MonthlyPoint> = BTreeMap::new();

        for record in table.records() {
            let key = (record.date.year(), record.date.month());
            months
                .entry(key)
                .or_insert_with(|| MonthlyPoint {
                    month_end: month_end(record.date),
                    total_cnt: 0,
                })
                .total_cnt += record.cnt;
        }

        months.into_values().collect()
    }

    /// Mean `casual` / `registered` per hour over working-day rows.
    ///
    /// [`HourlyProfile::Unavailable`] iff the table's source had no `hr`
    /// column. Hours with no working-day rows are absent.
    pub fn hourly_profile(table: &RentalTable) -> HourlyProfile {
        if !table.has_hour() {
            return HourlyProfile::Unavailable;
        }

        let mut hours: BTreeMap<u8, HourBucket> = BTreeMap::new();
        for record in table.records().iter().filter(|r| r.is_working_day()) {
            if let Some(hour) = record.hour {
                hours.entry(hour).or_default().add_record(record);
            }
        }

        HourlyProfile::Available(
            hours
                .into_iter()
                .map(|(hour, bucket)| bucket.into_point(hour))
                .collect(),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
