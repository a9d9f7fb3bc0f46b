//! Terminal UI layer for the bike sharing dashboard.
//!
//! Provides themes, the header and metric components, monthly and hourly
//! charts, the dashboard layout, a plain-text summary, and the interactive
//! event loop built on [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod dashboard_view;
pub mod summary;
pub mod themes;

pub use dashboard_core as core;
