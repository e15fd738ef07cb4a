// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::models::Dataset;
use crate::ui::messages::warning;
use std::path::Path;

/// Worksheet name used for XLSX exports.
pub const XLSX_SHEET_NAME: &str = "工数データ";

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `dataset` to `file`.
    ///
    /// - `format`: csv | json | xlsx
    /// - `force`: overwrite an existing file without asking
    ///
    /// An empty dataset is still written (header only / empty array) so the
    /// file can be re-imported later; a warning is shown.
    pub fn export(dataset: &Dataset, format: ExportFormat, file: &Path, force: bool) -> AppResult<()> {
        ensure_writable(file, force)?;

        if dataset.is_empty() {
            warning("No rows match the current selection.");
        }

        tracing::debug!(format = format.as_str(), rows = dataset.len(), "exporting dataset");

        match format {
            ExportFormat::Csv => export_csv(dataset, file)?,
            ExportFormat::Json => export_json(dataset, file)?,
            ExportFormat::Xlsx => export_xlsx(dataset, file, XLSX_SHEET_NAME)?,
        }

        Ok(())
    }
}
