// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::Dataset;
use crate::models::row::COLUMNS;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Index of the hours column inside `COLUMNS`.
const HOURS_COL: usize = 3;

/// Export XLSX with styling and auto column widths.
pub(crate) fn export_xlsx(dataset: &Dataset, path: &Path, sheet_name: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    // ---------------------------
    // Empty dataset
    // ---------------------------
    if dataset.is_empty() {
        worksheet.write(0, 0, "No data available")?;
        workbook.save(path)?;
        notify_export_success("XLSX (empty dataset)", 0, path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = COLUMNS
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, record) in dataset.iter().enumerate() {
        let row = u32::try_from(row_index + 1)
            .map_err(|_| AppError::Export("too many rows for XLSX".into()))?;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in record.to_cells().iter().enumerate() {
            if col == HOURS_COL {
                write_hours_cell(worksheet, row, col as u16, record.hours, band)?;
            } else {
                let fmt = cell_format(band);
                worksheet.write_with_format(row, col as u16, value.as_str(), &fmt)?;
            }

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // ---------------------------
    // Column widths
    // ---------------------------
    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook.save(path)?;

    notify_export_success("XLSX", dataset.len(), path);
    Ok(())
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Hours are written as numbers; missing hours stay blank.
fn write_hours_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    hours: Option<f64>,
    bg: Color,
) -> AppResult<()> {
    let fmt = cell_format(bg).set_align(FormatAlign::Right);

    match hours {
        Some(h) => worksheet.write_with_format(row, col, h, &fmt)?,
        None => worksheet.write_blank(row, col, &fmt)?,
    };

    Ok(())
}
