//! Plain-text rendering of a [`DashboardReport`] for `--view summary`.

use dashboard_core::formatting::{format_count, format_hour, format_number};
use dashboard_data::aggregator::{HourlyProfile, HOURLY_UNAVAILABLE_MESSAGE};
use dashboard_data::analysis::DashboardReport;

use crate::charts::NO_ROWS_MESSAGE;
use crate::components::header::{DESCRIPTION, SEPARATOR_WIDTH, TITLE};

/// Render the report as text, one line per entry, ending in a newline.
pub fn render_summary(report: &DashboardReport) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        "=".repeat(SEPARATOR_WIDTH),
        DESCRIPTION.to_string(),
        String::new(),
    ];

    match report.range {
        Some(range) => lines.push(format!("Date range: {} ({} rows)", range, report.rows)),
        None => lines.push("Date range: no data".to_string()),
    }
    lines.push(String::new());

    let totals = &report.totals;
    lines.push(format!("{:<15}{}", "Total Rentals", format_count(totals.total_cnt)));
    lines.push(format!("{:<15}{}", "Casual", format_count(totals.total_casual)));
    lines.push(format!("{:<15}{}", "Registered", format_count(totals.total_registered)));
    lines.push(String::new());

    lines.push("Monthly Rental Trend".to_string());
    lines.push("-".repeat(SEPARATOR_WIDTH));
    if report.monthly.is_empty() {
        lines.push(NO_ROWS_MESSAGE.to_string());
    } else {
        lines.push(format!("{:<10}{:>15}", "Month", "Total Count"));
        for point in &report.monthly {
            lines.push(format!(
                "{:<10}{:>15}",
                point.month_end.format("%Y-%m"),
                format_count(point.total_cnt)
            ));
        }
    }
    lines.push(String::new());

    lines.push("Hourly Rentals on Working Days (mean)".to_string());
    lines.push("-".repeat(SEPARATOR_WIDTH));
    match &report.hourly {
        HourlyProfile::Unavailable => lines.push(HOURLY_UNAVAILABLE_MESSAGE.to_string()),
        HourlyProfile::Available(points) if points.is_empty() => {
            lines.push(NO_ROWS_MESSAGE.to_string())
        }
        HourlyProfile::Available(points) => {
            lines.push(format!("{:<8}{:>12}{:>12}", "Hour", "Casual", "Registered"));
            for point in points {
                lines.push(format!(
                    "{:<8}{:>12}{:>12}",
                    format_hour(point.hour),
                    format_number(point.mean_casual, 1),
                    format_number(point.mean_registered, 1)
                ));
            }
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// ── Tests ─────────────────────────────────────────────────────────────────────
