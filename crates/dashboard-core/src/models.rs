use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// One row of the rental-events table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    /// Calendar date of the rentals (`dteday`).
    pub date: NaiveDate,
    /// Hour of day 0-23 (`hr`), only present in hour-granularity data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    /// 1 for a regular business day, 0 otherwise.
    pub workingday: u8,
    /// Rentals by unregistered users.
    pub casual: u64,
    /// Rentals by registered users.
    pub registered: u64,
    /// Total rentals, `casual + registered` for well-formed input.
    pub cnt: u64,
}

impl RentalRecord {
    /// `true` when the row is flagged as a working day.
    pub fn is_working_day(&self) -> bool {
        self.workingday == 1
    }
}

/// An ordered, immutable set of rental records.
///
/// The table remembers whether its source carried an `hr` column, and every
/// subset derived from it inherits that fact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalTable {
    records: Vec<RentalRecord>,
    has_hour: bool,
}

impl RentalTable {
    /// Wrap `records` read from a source with (`has_hour = true`) or without
    /// an `hr` column.
    pub fn new(records: Vec<RentalRecord>, has_hour: bool) -> Self {
        Self { records, has_hour }
    }

    /// All records in source order.
    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    /// Whether the source schema includes the `hr` column.
    pub fn has_hour(&self) -> bool {
        self.has_hour
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest `date` in the table, or `None` when empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let first = self.records.first()?.date;
        let (min, max) = self
            .records
            .iter()
            .fold((first, first), |(lo, hi), r| (lo.min(r.date), hi.max(r.date)));
        Some(DateRange { start: min, end: max })
    }

    /// Build a subset with the same schema from records matching `keep`.
    pub fn subset(&self, keep: impl Fn(&RentalRecord) -> bool) -> RentalTable {
        RentalTable {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            has_hour: self.has_hour,
        }
    }
}

/// A closed calendar interval `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Validate and build a range; `start` must not lie after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: NaiveDate, cnt: u64) -> RentalRecord {
        RentalRecord {
            date,
            hour: None,
            workingday: 1,
            casual: 0,
            registered: cnt,
            cnt,
        }
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let err = DateRange::new(d(2011, 2, 1), d(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_date_range_single_day() {
        let range = DateRange::new(d(2011, 1, 1), d(2011, 1, 1)).unwrap();
        assert!(range.contains(d(2011, 1, 1)));
        assert!(!range.contains(d(2011, 1, 2)));
        assert!(!range.contains(d(2010, 12, 31)));
    }

    #[test]
    fn test_date_range_inclusive_ends() {
        let range = DateRange::new(d(2011, 1, 1), d(2011, 1, 31)).unwrap();
        assert!(range.contains(d(2011, 1, 1)));
        assert!(range.contains(d(2011, 1, 31)));
        assert!(!range.contains(d(2010, 12, 31)));
        assert!(!range.contains(d(2011, 2, 1)));
    }

    #[test]
    fn test_date_bounds_unsorted_input() {
        let table = RentalTable::new(
            vec![rec(d(2011, 3, 1), 1), rec(d(2011, 1, 5), 2), rec(d(2011, 2, 9), 3)],
            false,
        );
        let bounds = table.date_bounds().unwrap();
        assert_eq!(bounds.start, d(2011, 1, 5));
        assert_eq!(bounds.end, d(2011, 3, 1));
    }

    #[test]
    fn test_date_bounds_empty() {
        assert!(RentalTable::default().date_bounds().is_none());
    }

    #[test]
    fn test_subset_keeps_schema_and_order() {
        let table = RentalTable::new(
            vec![rec(d(2011, 1, 1), 1), rec(d(2011, 1, 2), 2), rec(d(2011, 1, 3), 3)],
            true,
        );
        let sub = table.subset(|r| r.cnt != 2);
        assert!(sub.has_hour());
        let counts: Vec<u64> = sub.records().iter().map(|r| r.cnt).collect();
        assert_eq!(counts, vec![1, 3]);
        // Source untouched.
        assert_eq!(table.len(), 3);
    }
}
