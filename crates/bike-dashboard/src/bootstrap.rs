use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name looked up next to the executable when `--data` does not exist.
pub const DEFAULT_DATA_FILE: &str = "main_data.csv";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a Python-style level name to a tracing filter directive.
///
/// tracing has no level above `error`, so `CRITICAL` shares it.
/// Unrecognised names are passed through so `EnvFilter` can still parse
/// directives such as `dashboard_data=trace`.
fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, records are appended to that file without ANSI
/// colours; otherwise they go to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = file_layer
        .is_none()
        .then(|| fmt::layer().with_target(false).with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing the tracing subscriber")?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Resolve the CSV to load.
///
/// Returns `requested` if it exists, else [`DEFAULT_DATA_FILE`] next to the
/// running executable if that exists, else `requested` unchanged so the
/// loader reports the missing file.
pub fn discover_data_path(requested: &Path) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    discover_data_path_in(requested, exe_dir.as_deref())
}

fn discover_data_path_in(requested: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if requested.exists() {
        return requested.to_path_buf();
    }
    exe_dir
        .map(|dir| dir.join(DEFAULT_DATA_FILE))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| requested.to_path_buf())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
