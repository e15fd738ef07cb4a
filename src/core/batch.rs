use crate::core::extractor::SheetRecordExtractor;
use crate::errors::ExtractError;
use crate::import::workbook::extract_file;
use crate::models::{Dataset, TimesheetRow};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of extracting one workbook.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Vec<TimesheetRow>, ExtractError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        Self { outcomes }
    }

    /// Records of every successful file, concatenated in input order.
    pub fn records(&self) -> Dataset {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flat_map(|rows| rows.iter().cloned())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ExtractError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }
}

/// Extract every workbook independently; a failing file is recorded and
/// the remaining files are still processed.
pub fn extract_batch<P: AsRef<Path>>(
    paths: &[P],
    extractor: &SheetRecordExtractor<'_>,
) -> BatchReport {
    let outcomes: Vec<FileOutcome> = paths
        .iter()
        .map(|p| {
            let path = p.as_ref();
            let result = extract_file(path, extractor);

            match &result {
                Ok(rows) => info!(file = %path.display(), rows = rows.len(), "workbook extracted"),
                Err(e) => warn!(file = %path.display(), error = %e, "workbook skipped"),
            }

            FileOutcome {
                path: path.to_path_buf(),
                result,
            }
        })
        .collect();

    BatchReport::from_outcomes(outcomes)
}
