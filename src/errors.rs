//! Unified application error type.
//! All modules (config, core, import, export, cli) return AppError so the
//! error handling stays consistent. Per-file extraction problems use the
//! narrower ExtractError, which the batch layer collects instead of
//! propagating.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Saved dataset {path}: {reason}")]
    SavedDataset { path: PathBuf, reason: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {0}")]
    ConfigLoad(PathBuf),

    #[error("Failed to save configuration to {0}")]
    ConfigSave(PathBuf),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single workbook. Never aborts a batch.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot read file: {0}")]
    Read(#[from] io::Error),

    #[error("cannot open workbook: {0}")]
    Workbook(String),

    #[error("worksheet '{0}' not found")]
    SheetNotFound(String),
}

impl From<calamine::Error> for ExtractError {
    fn from(e: calamine::Error) -> Self {
        ExtractError::Workbook(e.to_string())
    }
}
