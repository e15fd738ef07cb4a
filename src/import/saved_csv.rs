//! Previously exported datasets, read back for accumulation.

use crate::errors::{AppError, AppResult};
use crate::models::row::COLUMNS;
use crate::models::{Dataset, TimesheetRow};
use std::fs;
use std::path::Path;
use tracing::info;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load a dataset CSV written by `export`.
pub fn read_saved_dataset(path: &Path) -> AppResult<Dataset> {
    let bytes = fs::read(path)?;
    let dataset = parse_saved_dataset(&bytes).map_err(|e| AppError::SavedDataset {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(file = %path.display(), rows = dataset.len(), "saved dataset loaded");
    Ok(dataset)
}

/// Parse dataset CSV content; a leading UTF-8 BOM is ignored.
/// Every column of the export schema must be present (surrounding spaces
/// in header names are ignored), extra columns are ignored.
pub fn parse_saved_dataset(bytes: &[u8]) -> AppResult<Dataset> {
    let data = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    // serde matches header names exactly, so "月 " must become "月" first
    let headers: csv::StringRecord = rdr.headers()?.iter().map(str::trim).collect();
    if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(AppError::Other(format!("missing column '{missing}'")));
    }
    rdr.set_headers(headers);

    let mut rows = Vec::new();
    for record in rdr.deserialize::<TimesheetRow>() {
        rows.push(record?);
    }

    Ok(Dataset::from_rows(rows))
}
