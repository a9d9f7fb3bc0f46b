use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bike sharing dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The input file is missing, unreadable, or its header does not match
    /// the rental schema.
    #[error("Failed to load data from {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    /// A cell could not be converted to the type declared for its column.
    #[error("Invalid value {value:?} for column '{column}' on line {line}")]
    DataFormat {
        line: usize,
        column: String,
        value: String,
    },

    /// A view needs a column the source data does not carry.
    #[error("Data not supported: {0}")]
    FeatureUnavailable(String),

    /// A date range whose start lies after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The report file could not be created or fully written.
    #[error("Failed to write report to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Build a [`DashboardError::DataLoad`] for `path`.
    pub fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
