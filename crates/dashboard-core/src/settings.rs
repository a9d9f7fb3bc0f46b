use chrono::NaiveDate;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::DateRange;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Bike sharing rentals dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bike-dashboard",
    about = "Summary metrics and rental trends for bike sharing data",
    version
)]
pub struct Settings {
    /// Rental CSV (day.csv or hour.csv layout)
    #[arg(long, env = "BIKE_DASHBOARD_DATA", default_value = "main_data.csv")]
    pub data: PathBuf,

    /// First day of the range, YYYY-MM-DD (defaults to the earliest date in the data)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range, YYYY-MM-DD (defaults to the latest date in the data)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary", "json"])]
    pub view: String,

    /// Also write the report as JSON to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<OsString>) -> Self {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Combine `--start` / `--end` with the data's own bounds.
    ///
    /// A missing end falls back to the matching bound. With no bounds (empty
    /// table) a range only exists when both ends were given.
    pub fn resolve_range(&self, bounds: Option<DateRange>) -> Result<Option<DateRange>> {
        match (bounds, self.start, self.end) {
            (Some(b), start, end) => {
                DateRange::new(start.unwrap_or(b.start), end.unwrap_or(b.end)).map(Some)
            }
            (None, Some(start), Some(end)) => DateRange::new(start, end).map(Some),
            (None, _, _) => Ok(None),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
