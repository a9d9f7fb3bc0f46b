//! Data layer for the bike sharing dashboard.
//!
//! Loads the rental CSV, selects a date range, computes the totals, monthly
//! and hourly views, and assembles them into a serializable report.

pub mod aggregator;
pub mod analysis;
pub mod export;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
