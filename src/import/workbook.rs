//! Timesheet workbooks read through calamine.

use crate::core::extractor::{SheetRecordExtractor, SheetSource};
use crate::errors::ExtractError;
use crate::models::{CellValue, TimesheetRow};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// A calamine worksheet range seen through `SheetSource`.
pub struct CalamineSheet {
    range: Range<Data>,
}

impl CalamineSheet {
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }
}

impl SheetSource for CalamineSheet {
    fn cell(&self, row: u32, col: u32) -> CellValue {
        self.range
            .get_value((row, col))
            .map(to_cell_value)
            .unwrap_or_default()
    }

    fn last_row(&self) -> Option<u32> {
        self.range.end().map(|(row, _)| row)
    }
}

/// Convert a calamine cell into the pipeline's cell type.
pub fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// Extract one workbook held in memory.
pub fn extract_bytes(
    bytes: Vec<u8>,
    extractor: &SheetRecordExtractor<'_>,
) -> Result<Vec<TimesheetRow>, ExtractError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = extractor.layout().sheet_name.as_str();
    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Err(ExtractError::SheetNotFound(sheet_name.to_string()));
    }

    let range = workbook.worksheet_range(sheet_name)?;
    debug!(sheet = sheet_name, end = ?range.end(), "worksheet loaded");

    Ok(extractor.extract(&CalamineSheet::new(range)))
}

/// Read a workbook fully into memory, then extract it.
pub fn extract_file(
    path: &Path,
    extractor: &SheetRecordExtractor<'_>,
) -> Result<Vec<TimesheetRow>, ExtractError> {
    let bytes = fs::read(path)?;
    info!(file = %path.display(), size = bytes.len(), "reading workbook");
    extract_bytes(bytes, extractor)
}
