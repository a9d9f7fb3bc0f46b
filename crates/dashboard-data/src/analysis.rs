//! Report assembly for the dashboard.
//!
//! Runs the range filter and all three aggregations over a loaded table and
//! returns a [`DashboardReport`] ready for the presentation layer.

use chrono::NaiveDate;
use dashboard_core::models::{DateRange, RentalTable};
use dashboard_core::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::{HourlyProfile, MonthlyPoint, RentalAggregator, Totals};
use crate::filter::filter_to_range;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the dashboard shows for one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// The selected range, `None` only for an empty source table.
    pub range: Option<DateRange>,
    /// Rows of the source table inside the range.
    pub rows: usize,
    pub totals: Totals,
    pub monthly: Vec<MonthlyPoint>,
    pub hourly: HourlyProfile,
}

impl DashboardReport {
    /// Report over the table's own date bounds.
    ///
    /// An empty table yields zero totals, an empty monthly series and an
    /// hourly profile that still reflects the table's schema.
    pub fn full(table: &RentalTable) -> Self {
        match table.date_bounds() {
            Some(bounds) => build_report(table, bounds),
            None => Self::from_subset(None, table),
        }
    }

    fn from_subset(range: Option<DateRange>, subset: &RentalTable) -> Self {
        Self {
            range,
            rows: subset.len(),
            totals: RentalAggregator::totals(subset),
            monthly: RentalAggregator::monthly_series(subset),
            hourly: RentalAggregator::hourly_profile(subset),
        }
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Filter `table` to `range` and compute every view.
pub fn build_report(table: &RentalTable, range: DateRange) -> DashboardReport {
    let subset = filter_to_range(table, &range);
    debug!(
        "Range {} selects {} of {} rows",
        range,
        subset.len(),
        table.len()
    );
    DashboardReport::from_subset(Some(range), &subset)
}

/// [`build_report`] for raw bounds; `start > end` is an error.
pub fn build_report_between(
    table: &RentalTable,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DashboardReport> {
    Ok(build_report(table, DateRange::new(start, end)?))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
