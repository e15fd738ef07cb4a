// src/import/mod.rs

pub mod saved_csv;
pub mod workbook;

pub use saved_csv::{parse_saved_dataset, read_saved_dataset};
pub use workbook::{CalamineSheet, extract_bytes, extract_file};
