//! Persistence for downloaded tables, cohorts and the run summary.
//!
//! Tables are written as headed CSV; the summary as pretty JSON.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::table::{Table, Value};

pub const ALL_PATIENTS_FILE: &str = "all_patients.csv";
pub const ALL_PATIENTS_SUBSET_FILE: &str = "all_patients_column_subset.csv";
pub const MEDICARE_FILE: &str = "medicare.csv";
pub const MEDICARE_SUBSET_FILE: &str = "medicare_column_subset.csv";
pub const SUMMARY_FILE: &str = "run_summary.json";

/// File name of one year's post-reconciliation dump.
pub fn raw_file_name(year: u16) -> String {
    format!("raw_{year}.csv")
}

/// Writes `table` to `path` as CSV with a header row, replacing any
/// existing file.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    debug!(path = %path.display(), rows = table.len(), "Writing CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(Value::to_string))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Saved");
    Ok(())
}

/// Reads a CSV written by [`write_table`]. Every cell comes back as text;
/// empty cells come back as `Null`.
pub fn load_table(path: &Path) -> Result<Table> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);

    for record in reader.records() {
        let record = record?;
        table.push_row(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        Value::Null
                    } else {
                        Value::from(cell)
                    }
                })
                .collect(),
        );
    }

    Ok(table)
}

/// Serializes `value` as pretty JSON to `path`.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    info!(path = %path.display(), "Saved");
    Ok(())
}

/// Joins `name` onto the output directory.
pub fn output_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(name)
}
