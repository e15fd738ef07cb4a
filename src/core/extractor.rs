//! Sheet record extraction.
//!
//! A timesheet worksheet has two header cells (reporting month, staff id)
//! and a fixed block of entry lines below them. The template pads the block
//! with blank lines and embeds instructional lines marked "参考行"; both are
//! filtered out here before any value is normalized.

use crate::core::catalog::Catalog;
use crate::core::cell_parser::extract_number;
use crate::core::layout::{ResolvedLayout, SheetLayout};
use crate::core::month::normalize_month;
use crate::errors::AppResult;
use crate::models::{CellValue, TimesheetRow};
use tracing::debug;

/// Read access to one worksheet, independent of the workbook library.
pub trait SheetSource {
    /// Cell at absolute 0-based (row, col); `Empty` outside the used area.
    fn cell(&self, row: u32, col: u32) -> CellValue;

    /// Last used row (0-based), `None` for an empty sheet.
    fn last_row(&self) -> Option<u32>;
}

/// Values shared by every row of one workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHeader {
    pub month: String,
    pub staff_id: String,
    pub branch: String,
}

/// The four source cells of one candidate line, in layout column order.
pub type RawLine = [CellValue; 4];

pub struct SheetRecordExtractor<'a> {
    layout: &'a SheetLayout,
    resolved: ResolvedLayout,
    catalog: &'a Catalog,
}

impl<'a> SheetRecordExtractor<'a> {
    pub fn new(layout: &'a SheetLayout, catalog: &'a Catalog) -> AppResult<Self> {
        let resolved = layout.resolve()?;
        Ok(Self {
            layout,
            resolved,
            catalog,
        })
    }

    pub fn layout(&self) -> &SheetLayout {
        self.layout
    }

    /// Month, staff id and branch read from the header cells.
    pub fn header<S: SheetSource + ?Sized>(&self, sheet: &S) -> SheetHeader {
        let (mr, mc) = self.resolved.month;
        let (sr, sc) = self.resolved.staff;

        let month = normalize_month(&sheet.cell(mr, mc));
        let staff_id = sheet.cell(sr, sc).as_text();
        let branch = self.catalog.branch_of(&staff_id);

        SheetHeader {
            month,
            staff_id,
            branch,
        }
    }

    /// Every line of the data block, before validity rules.
    /// The block stops at the sheet's last used row.
    pub fn candidate_lines<S: SheetSource + ?Sized>(&self, sheet: &S) -> Vec<RawLine> {
        let first = self.resolved.first_row;
        let Some(last_used) = sheet.last_row() else {
            return Vec::new();
        };
        if last_used < first || self.resolved.max_rows == 0 {
            return Vec::new();
        }

        let last = last_used.min(first.saturating_add(self.resolved.max_rows - 1));
        let cols = self.resolved.columns;

        (first..=last)
            .map(|r| {
                [
                    sheet.cell(r, cols[0]),
                    sheet.cell(r, cols[1]),
                    sheet.cell(r, cols[2]),
                    sheet.cell(r, cols[3]),
                ]
            })
            .collect()
    }

    /// Row validity: lines past the blank-row threshold need a work
    /// category, and reference lines are never data.
    pub fn is_retained(&self, index: usize, line: &RawLine) -> bool {
        if index >= self.layout.blank_row_threshold && !line[0].is_present() {
            return false;
        }

        !self.is_reference_line(line)
    }

    pub fn is_reference_line(&self, line: &RawLine) -> bool {
        let marker = self.layout.reference_marker.as_str();
        if marker.is_empty() {
            return false;
        }
        line.iter().any(|c| c.as_text().starts_with(marker))
    }

    /// Normalized records of one worksheet.
    pub fn extract<S: SheetSource + ?Sized>(&self, sheet: &S) -> Vec<TimesheetRow> {
        let header = self.header(sheet);
        let lines = self.candidate_lines(sheet);
        let candidates = lines.len();

        let rows: Vec<TimesheetRow> = lines
            .into_iter()
            .enumerate()
            .filter(|(i, line)| self.is_retained(*i, line))
            .map(|(_, line)| self.build_row(line, &header))
            .collect();

        debug!(
            month = %header.month,
            staff = %header.staff_id,
            candidates,
            retained = rows.len(),
            "worksheet extracted"
        );

        rows
    }

    fn build_row(&self, line: RawLine, header: &SheetHeader) -> TimesheetRow {
        let [category, description, source, hours] = line;
        let work_description = description.as_text();

        TimesheetRow {
            work_category: category.as_text(),
            work_description_class: self.catalog.classify(&work_description),
            work_description,
            work_category_source: source.as_text(),
            hours: extract_number(&hours),
            month: header.month.clone(),
            staff_id: header.staff_id.clone(),
            branch: header.branch.clone(),
        }
    }
}
