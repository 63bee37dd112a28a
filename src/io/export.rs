//! Export the monthly projection table.
//!
//! The CSV layout matches the dashboard table (`State,January_Sales_kg`) so it
//! opens cleanly in spreadsheets; JSON is an array of objects with the same keys.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::domain::ExportFormat;
use crate::error::{AppError, ErrorKind};
use crate::views::MonthlyEstimate;

#[derive(Serialize)]
struct MonthlyRow<'a> {
    #[serde(rename = "State")]
    state: &'a str,
    #[serde(rename = "January_Sales_kg")]
    january_sales_kg: f64,
}

impl<'a> From<&'a MonthlyEstimate> for MonthlyRow<'a> {
    fn from(m: &'a MonthlyEstimate) -> Self {
        Self {
            state: &m.region,
            january_sales_kg: m.monthly_kg,
        }
    }
}

/// Write the table to `path` in the requested format.
pub fn write_monthly(path: &Path, rows: &[MonthlyEstimate], format: ExportFormat) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        export_error(format!("Failed to create export file '{}': {e}", path.display()))
    })?;

    match format {
        ExportFormat::Csv => write_monthly_csv(file, rows)?,
        ExportFormat::Json => write_monthly_json(file, rows)?,
    }

    info!(path = %path.display(), rows = rows.len(), ?format, "monthly table exported");
    Ok(())
}

pub fn write_monthly_csv<W: Write>(writer: W, rows: &[MonthlyEstimate]) -> Result<(), AppError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(MonthlyRow::from(row))
            .map_err(|e| export_error(format!("Failed to write export CSV row: {e}")))?;
    }
    if rows.is_empty() {
        // `serialize` emits the header with the first row; keep it for empty tables.
        csv.write_record(["State", "January_Sales_kg"])
            .map_err(|e| export_error(format!("Failed to write export CSV header: {e}")))?;
    }
    csv.flush()
        .map_err(|e| export_error(format!("Failed to flush export CSV: {e}")))
}

pub fn write_monthly_json<W: Write>(writer: W, rows: &[MonthlyEstimate]) -> Result<(), AppError> {
    let mut writer = BufWriter::new(writer);
    let rows: Vec<MonthlyRow<'_>> = rows.iter().map(MonthlyRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)
        .map_err(|e| export_error(format!("Failed to write export JSON: {e}")))?;
    writeln!(writer).map_err(|e| export_error(format!("Failed to write export JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| export_error(format!("Failed to flush export JSON: {e}")))
}

/// Default export file name, timestamped so repeated exports don't collide.
pub fn default_export_path(format: ExportFormat) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("january_sales_{ts}.{}", format.extension()))
}

fn export_error(message: String) -> AppError {
    AppError::new(ErrorKind::Export, message)
}
