use chrono::{Datelike, Months, NaiveDate};

use crate::models::DateRange;

/// Source date format of the `dteday` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DD` date string, ignoring surrounding whitespace.
///
/// Returns `None` for empty strings or anything chrono rejects.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

// ── Month arithmetic ──────────────────────────────────────────────────────────

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Move `date` by `months` calendar months, clamping the day to the target
/// month's length (Jan 31 + 1 month → Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Move `date` by `days` calendar days.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(chrono::Duration::days(days))
        .unwrap_or(date)
}

/// Clamp `date` into `bounds`.
pub fn clamp_date(date: NaiveDate, bounds: &DateRange) -> NaiveDate {
    date.clamp(bounds.start, bounds.end)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
