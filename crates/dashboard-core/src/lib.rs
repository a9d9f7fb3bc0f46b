//! Shared building blocks for the bike sharing dashboard.
//!
//! Holds the rental data model, the error taxonomy, date helpers, number
//! formatting and the command-line settings used by every other crate.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
