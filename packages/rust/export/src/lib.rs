//! Tabular exporter.
//!
//! Writes [`LeadRow`]s to a CSV file with the fixed [`LEAD_COLUMNS`] header.
//! An empty row set never touches the filesystem.

use std::path::{Path, PathBuf};

use leadgen_shared::{LEAD_COLUMNS, LeadGenError, LeadRow, Result};
use tracing::{info, instrument, warn};

/// What [`export`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to write; the destination was left alone.
    Skipped,
    /// Header plus `rows` records were written to `path`.
    Written { path: PathBuf, rows: usize },
}

/// Write `rows` to `destination`, replacing any existing file.
///
/// Missing parent directories are created.
#[instrument(skip_all, fields(path = %destination.display(), rows = rows.len()))]
pub fn export(rows: &[LeadRow], destination: &Path) -> Result<ExportOutcome> {
    if rows.is_empty() {
        warn!("no lead rows to export, skipping write");
        return Ok(ExportOutcome::Skipped);
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LeadGenError::io(parent, e))?;
    }

    let io_err = |e: csv::Error| LeadGenError::io(destination, e.into());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(destination)
        .map_err(io_err)?;

    writer.write_record(LEAD_COLUMNS).map_err(io_err)?;
    for row in rows {
        writer.serialize(row).map_err(io_err)?;
    }
    writer
        .flush()
        .map_err(|e| LeadGenError::io(destination, e))?;

    info!("lead rows exported");

    Ok(ExportOutcome::Written {
        path: destination.to_path_buf(),
        rows: rows.len(),
    })
}
