// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::Dataset;
use crate::models::row::COLUMNS;
use crate::ui::messages::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(dataset: &Dataset, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(dataset.rows())?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", dataset.len(), path);
    Ok(())
}

/// Export CSV (UTF-8 with BOM so spreadsheet apps detect the encoding).
pub(crate) fn export_csv(dataset: &Dataset, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let file = File::create(path)?;
    write_csv(dataset, BufWriter::new(file))?;

    notify_export_success("CSV", dataset.len(), path);
    Ok(())
}

/// Write the dataset as CSV into any writer.
pub fn write_csv<W: Write>(dataset: &Dataset, mut out: W) -> AppResult<()> {
    out.write_all("\u{FEFF}".as_bytes())?;

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(COLUMNS)?;

    for row in dataset {
        wtr.write_record(row.to_cells())?;
    }

    wtr.flush()?;
    Ok(())
}
