//! CSV loading for the rental-events table.
//!
//! Reads a `day.csv` / `hour.csv` style file, checks its header against an
//! explicit column schema and converts every declared cell to its type.
//! Columns outside the schema (season, weather, temperature, ...) are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use dashboard_core::models::{RentalRecord, RentalTable};
use dashboard_core::time_utils;
use dashboard_core::{DashboardError, Result};
use tracing::{debug, info};

// ── Schema ────────────────────────────────────────────────────────────────────

/// Declared type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// `YYYY-MM-DD` calendar date.
    Date,
    /// Integer hour of day, 0-23.
    Hour,
    /// Integer flag, 0 or 1.
    Flag,
    /// Non-negative integer count.
    Count,
}

/// A cell converted according to its [`ColumnType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Date(NaiveDate),
    /// Hour or flag.
    Small(u8),
    Count(u64),
}

impl ColumnType {
    /// Convert one raw cell, or `None` when it falls outside this type's domain.
    pub fn parse(self, raw: &str) -> Option<CellValue> {
        match self {
            ColumnType::Date => time_utils::parse_date(raw).map(CellValue::Date),
            ColumnType::Hour => raw
                .parse::<u8>()
                .ok()
                .filter(|h| *h <= 23)
                .map(CellValue::Small),
            ColumnType::Flag => raw
                .parse::<u8>()
                .ok()
                .filter(|flag| *flag <= 1)
                .map(CellValue::Small),
            ColumnType::Count => raw.parse::<u64>().ok().map(CellValue::Count),
        }
    }
}

/// One column of the rental schema.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnType,
    pub required: bool,
}

pub const DATE_COLUMN: &str = "dteday";
pub const HOUR_COLUMN: &str = "hr";

/// The columns the dashboard reads, in no particular order.
pub const RENTAL_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec { name: DATE_COLUMN, kind: ColumnType::Date, required: true },
    ColumnSpec { name: HOUR_COLUMN, kind: ColumnType::Hour, required: false },
    ColumnSpec { name: "workingday", kind: ColumnType::Flag, required: true },
    ColumnSpec { name: "casual", kind: ColumnType::Count, required: true },
    ColumnSpec { name: "registered", kind: ColumnType::Count, required: true },
    ColumnSpec { name: "cnt", kind: ColumnType::Count, required: true },
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the rental table stored at `path`.
///
/// Fails with [`DashboardError::DataLoad`] when the file is missing,
/// unreadable, structurally broken or lacks a required column, and with
/// [`DashboardError::DataFormat`] when a cell does not match its column type.
pub fn load_rental_table(path: &Path) -> Result<RentalTable> {
    if !path.exists() {
        return Err(DashboardError::data_load(path, "file not found"));
    }
    if path.is_dir() {
        return Err(DashboardError::data_load(path, "expected a file, got a directory"));
    }

    let file = File::open(path)
        .map_err(|e| DashboardError::data_load(path, format!("cannot open file: {e}")))?;

    let table = read_rental_table(file, path)?;

    info!(
        "Loaded {} rental rows from {} (hourly data: {})",
        table.len(),
        path.display(),
        if table.has_hour() { "yes" } else { "no" }
    );
    if let Some(bounds) = table.date_bounds() {
        debug!("Data covers {}", bounds);
    }

    Ok(table)
}

/// Parse a rental table from any CSV byte stream.
///
/// `source` only labels load errors.
pub fn read_rental_table<R: Read>(reader: R, source: &Path) -> Result<RentalTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::data_load(source, format!("cannot read header: {e}")))?
        .clone();

    let columns = ColumnIndex::resolve(&headers)
        .map_err(|missing| DashboardError::data_load(source, missing))?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DashboardError::data_load(source, format!("malformed CSV: {e}")))?;
        // Header is line 1.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        records.push(columns.parse_row(&record, line)?);
    }

    Ok(RentalTable::new(records, columns.has_hour()))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Schema columns paired with their position in a concrete header.
///
/// Optional columns absent from the header are left out.
#[derive(Debug, Clone)]
struct ColumnIndex {
    columns: Vec<(ColumnSpec, usize)>,
}

impl ColumnIndex {
    /// Map every schema column to its header position.
    ///
    /// Returns a description of the missing columns on failure.
    fn resolve(headers: &StringRecord) -> std::result::Result<Self, String> {
        let header_map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let missing: Vec<&str> = RENTAL_SCHEMA
            .iter()
            .filter(|spec| spec.required && !header_map.contains_key(spec.name))
            .map(|spec| spec.name)
            .collect();
        if !missing.is_empty() {
            return Err(format!("missing required column(s): {}", missing.join(", ")));
        }

        let columns = RENTAL_SCHEMA
            .iter()
            .filter_map(|spec| header_map.get(spec.name).map(|idx| (*spec, *idx)))
            .collect();
        Ok(Self { columns })
    }

    fn has_hour(&self) -> bool {
        self.columns.iter().any(|(spec, _)| spec.name == HOUR_COLUMN)
    }

    fn parse_row(&self, record: &StringRecord, line: usize) -> Result<RentalRecord> {
        let mut date = None;
        let mut row = RentalRecord {
            date: NaiveDate::MIN,
            hour: None,
            workingday: 0,
            casual: 0,
            registered: 0,
            cnt: 0,
        };

        for (spec, idx) in &self.columns {
            let raw = cell(record, *idx);
            let value = spec
                .kind
                .parse(raw)
                .ok_or_else(|| format_error(line, spec.name, raw))?;
            match (spec.name, value) {
                (DATE_COLUMN, CellValue::Date(d)) => date = Some(d),
                (HOUR_COLUMN, CellValue::Small(h)) => row.hour = Some(h),
                ("workingday", CellValue::Small(flag)) => row.workingday = flag,
                ("casual", CellValue::Count(n)) => row.casual = n,
                ("registered", CellValue::Count(n)) => row.registered = n,
                ("cnt", CellValue::Count(n)) => row.cnt = n,
                _ => {}
            }
        }

        row.date = date.ok_or_else(|| format_error(line, DATE_COLUMN, ""))?;
        Ok(row)
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn format_error(line: usize, column: &str, value: &str) -> DashboardError {
    DashboardError::DataFormat {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Trim, lowercase and strip a UTF-8 BOM so spreadsheet exports still match.
fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
