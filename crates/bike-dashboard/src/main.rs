mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::analysis::{build_report, DashboardReport};
use dashboard_data::export::{report_to_json, write_report_json};
use dashboard_data::reader::load_rental_table;
use dashboard_ui::app::App;
use dashboard_ui::summary::render_summary;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!(
        "Bike Sharing Dashboard v{} starting",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let data_path = bootstrap::discover_data_path(&settings.data);
    let table = load_rental_table(&data_path)
        .with_context(|| format!("loading rental data from {}", data_path.display()))?;

    let range = settings
        .resolve_range(table.date_bounds())
        .context("resolving --start/--end")?;
    let report = match range {
        Some(range) => build_report(&table, range),
        None => DashboardReport::full(&table),
    };

    if let Some(export_path) = &settings.export {
        write_report_json(export_path, &report)
            .with_context(|| format!("exporting report to {}", export_path.display()))?;
    }

    match settings.view.as_str() {
        "summary" => print!("{}", render_summary(&report)),
        "json" => println!("{}", report_to_json(&report)?),
        _ => App::new(&settings.theme, table, range)
            .run_dashboard()
            .context("running the dashboard")?,
    }

    Ok(())
}
