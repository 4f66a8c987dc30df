//! Writing result tables to CSV files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CutoverError, Result};
use crate::reconcile::ReconcileOutcome;
use crate::table::Table;

/// Write `table` as CSV: a header row, then one record per row.
///
/// Missing cells are written as empty fields. The header is written even when
/// the table has no rows.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.values().iter().map(|v| v.to_string()))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `table` to `path`, creating parent directories if needed.
pub fn save_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |e| CutoverError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let file = File::create(path).map_err(io_err)?;
    write_csv(table, BufWriter::new(file))?;

    debug!(table = table.name(), path = %path.display(), rows = table.row_count(), "wrote csv");
    Ok(())
}

/// Write the per-country tables of `outcome` into `dir`, one `<name>.csv` per
/// country, plus the difference report when the family produced differences.
///
/// Returns the written paths in country order, report last.
pub fn write_outcome(
    outcome: &ReconcileOutcome,
    dir: impl AsRef<Path>,
    housekeeping: usize,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::new();

    for table in outcome.export_partitions(housekeeping)?.values() {
        let path = dir.join(format!("{}.csv", table.name()));
        save_csv(table, &path)?;
        written.push(path);
    }

    if let Some(report) = outcome.differences_table()? {
        if !report.is_empty() {
            let path = dir.join(format!("{}.csv", report.name()));
            save_csv(&report, &path)?;
            written.push(path);
        }
    }
    Ok(written)
}
