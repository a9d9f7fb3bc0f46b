//! JSON export of a dashboard report.
//!
//! The JSON mirrors [`DashboardReport`]: `range`, `rows`, `totals`, `monthly`
//! and `hourly`, where `hourly.status` is `"available"` or `"unavailable"`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use dashboard_core::{DashboardError, Result};
use tracing::info;

use crate::analysis::DashboardReport;

/// Render `report` as pretty-printed JSON.
pub fn report_to_json(report: &DashboardReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write `report` as pretty-printed JSON to `path`.
///
/// The buffer is flushed before returning, so a short write surfaces as
/// [`DashboardError::Export`] instead of a truncated file.
pub fn write_report_json(path: &Path, report: &DashboardReport) -> Result<()> {
    let export_error = |source: io::Error| DashboardError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(export_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| {
        if e.is_io() {
            export_error(io::Error::from(e))
        } else {
            DashboardError::Json(e)
        }
    })?;
    writer.flush().map_err(export_error)?;

    info!("Wrote report to {}", path.display());
    Ok(())
}
