//! Fixed geometry of the timesheet template.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Where the extractor finds things inside a timesheet workbook.
/// Cells and columns use spreadsheet notation ("H2", "AN").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub month_cell: String,
    pub staff_cell: String,
    /// Rows skipped above the data block.
    pub skip_rows: u32,
    /// work_category, work_description, work_category_source, hours
    pub columns: [String; 4],
    pub max_rows: u32,
    /// Block rows from this index on need a non-blank work_category.
    pub blank_row_threshold: usize,
    pub reference_marker: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "①個人記入欄".to_string(),
            month_cell: "H2".to_string(),
            staff_cell: "F1".to_string(),
            skip_rows: 6,
            columns: [
                "D".to_string(),
                "E".to_string(),
                "H".to_string(),
                "AN".to_string(),
            ],
            max_rows: 130,
            blank_row_threshold: 46,
            reference_marker: "参考行".to_string(),
        }
    }
}

/// Layout with every reference resolved to 0-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub month: (u32, u32),
    pub staff: (u32, u32),
    pub first_row: u32,
    pub columns: [u32; 4],
    pub max_rows: u32,
}

impl SheetLayout {
    pub fn resolve(&self) -> AppResult<ResolvedLayout> {
        let mut columns = [0u32; 4];
        for (slot, letters) in columns.iter_mut().zip(self.columns.iter()) {
            *slot = column_index(letters)?;
        }

        Ok(ResolvedLayout {
            month: parse_cell_ref(&self.month_cell)?,
            staff: parse_cell_ref(&self.staff_cell)?,
            first_row: self.skip_rows,
            columns,
            max_rows: self.max_rows,
        })
    }
}

/// "A" → 0, "Z" → 25, "AA" → 26, "AN" → 39.
pub fn column_index(letters: &str) -> AppResult<u32> {
    let letters = letters.trim();
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidCellRef(letters.to_string()));
    }

    let mut idx: u32 = 0;
    for c in letters.chars() {
        let v = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        idx = idx
            .checked_mul(26)
            .and_then(|n| n.checked_add(v))
            .ok_or_else(|| AppError::InvalidCellRef(letters.to_string()))?;
    }

    Ok(idx - 1)
}

/// "H2" → (row 1, col 7).
pub fn parse_cell_ref(cell: &str) -> AppResult<(u32, u32)> {
    let cell = cell.trim();
    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| AppError::InvalidCellRef(cell.to_string()))?;
    let (letters, digits) = cell.split_at(split);

    let col = column_index(letters)?;
    let row: u32 = digits
        .parse()
        .map_err(|_| AppError::InvalidCellRef(cell.to_string()))?;

    if row == 0 {
        return Err(AppError::InvalidCellRef(cell.to_string()));
    }

    Ok((row - 1, col))
}
