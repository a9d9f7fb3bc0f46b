//! Date-range selection over a rental table.

use chrono::NaiveDate;
use dashboard_core::models::{DateRange, RentalTable};
use dashboard_core::Result;

/// Rows whose date lies in `start..=end`, in their original order.
///
/// The bounds need not match any row. A range that excludes everything
/// yields an empty table; `start > end` is rejected as
/// [`dashboard_core::DashboardError::InvalidRange`].
pub fn filter_by_range(table: &RentalTable, start: NaiveDate, end: NaiveDate) -> Result<RentalTable> {
    let range = DateRange::new(start, end)?;
    Ok(filter_to_range(table, &range))
}

/// Same as [`filter_by_range`] for an already validated range.
pub fn filter_to_range(table: &RentalTable, range: &DateRange) -> RentalTable {
    table.subset(|record| range.contains(record.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::RentalRecord;
    use dashboard_core::DashboardError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_table() -> RentalTable {
        let rows = [
            (d(2011, 1, 1), 10),
            (d(2011, 1, 1), 11),
            (d(2011, 1, 15), 12),
            (d(2011, 2, 1), 13),
            (d(2011, 3, 31), 14),
        ];
        RentalTable::new(
            rows.iter()
                .map(|&(date, cnt)| RentalRecord {
                    date,
                    hour: Some(0),
                    workingday: 1,
                    casual: 0,
                    registered: cnt,
                    cnt,
                })
                .collect(),
            true,
        )
    }

    #[test]
    fn test_full_bounds_returns_whole_table() {
        let table = make_table();
        let bounds = table.date_bounds().unwrap();
        let filtered = filter_by_range(&table, bounds.start, bounds.end).unwrap();
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_inclusive_on_both_ends() {
        let table = make_table();
        let filtered = filter_by_range(&table, d(2011, 1, 15), d(2011, 2, 1)).unwrap();
        let counts: Vec<u64> = filtered.records().iter().map(|r| r.cnt).collect();
        assert_eq!(counts, vec![12, 13]);
    }

    #[test]
    fn test_duplicate_dates_all_kept() {
        let table = make_table();
        let filtered = filter_by_range(&table, d(2011, 1, 1), d(2011, 1, 1)).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_bounds_need_not_match_rows() {
        let table = make_table();
        let filtered = filter_by_range(&table, d(2010, 6, 1), d(2011, 1, 10)).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_range_before_all_rows_is_empty() {
        let table = make_table();
        let filtered = filter_by_range(&table, d(2009, 1, 1), d(2010, 12, 31)).unwrap();
        assert!(filtered.is_empty());
        assert!(filtered.has_hour());
    }

    #[test]
    fn test_range_after_all_rows_is_empty() {
        let table = make_table();
        let filtered = filter_by_range(&table, d(2011, 4, 1), d(2012, 1, 1)).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_inverted_range_is_error() {
        let table = make_table();
        let err = filter_by_range(&table, d(2011, 2, 1), d(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_input_table_not_mutated() {
        let table = make_table();
        let before = table.clone();
        let _ = filter_by_range(&table, d(2011, 1, 15), d(2011, 1, 15)).unwrap();
        assert_eq!(table, before);
    }
}
