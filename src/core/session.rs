//! Session-scoped state: the merged dataset and the active selection.
//! Each CLI invocation builds one `Session`; nothing is kept globally.

use crate::config::Config;
use crate::core::accumulator::merge;
use crate::core::aggregate::{self, CrossTab, Share, Total};
use crate::core::batch::extract_batch;
use crate::core::catalog::Catalog;
use crate::core::extractor::SheetRecordExtractor;
use crate::core::filter::{Dimension, Facets, Selection};
use crate::errors::AppResult;
use crate::import::read_saved_dataset;
use crate::models::Dataset;
use std::path::{Path, PathBuf};

/// An input that contributed nothing, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    dataset: Dataset,
    selection: Selection,
    failures: Vec<InputFailure>,
}

impl Session {
    /// Extract `workbooks`, merge in the optional saved CSV and select the
    /// default filter state. Unreadable inputs are recorded, not fatal.
    pub fn open<P: AsRef<Path>>(
        workbooks: &[P],
        saved: Option<&Path>,
        cfg: &Config,
    ) -> AppResult<Self> {
        let catalog = Catalog::from_config(cfg);
        let extractor = SheetRecordExtractor::new(&cfg.sheet, &catalog)?;

        let report = extract_batch(workbooks, &extractor);
        let mut failures: Vec<InputFailure> = report
            .failures()
            .map(|(path, e)| InputFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
            .collect();
        let fresh = report.records();

        let saved_dataset = match saved {
            Some(path) => match read_saved_dataset(path) {
                Ok(ds) => Some(ds),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "saved dataset skipped");
                    failures.push(InputFailure {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        let dataset = merge(saved_dataset, fresh);
        let mut session = Self::from_dataset(dataset, catalog);
        session.failures = failures;
        Ok(session)
    }

    /// Session over an already built dataset.
    pub fn from_dataset(dataset: Dataset, catalog: Catalog) -> Self {
        let facets = Facets::from_rows(dataset.rows(), &catalog);
        let selection = Selection::default_for(dataset.rows(), &facets);

        Self {
            catalog,
            dataset,
            selection,
            failures: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn failures(&self) -> &[InputFailure] {
        &self.failures
    }

    pub fn facets(&self) -> Facets {
        Facets::from_rows(self.dataset.rows(), &self.catalog)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Rows matching the active selection.
    pub fn filtered(&self) -> Dataset {
        self.selection.apply(self.dataset.rows())
    }

    // ---------------------------
    // Aggregations over the filtered rows
    // ---------------------------

    pub fn work_content_totals(&self) -> Vec<Total> {
        aggregate::by_work_content(self.filtered().rows(), self.catalog.labels())
    }

    pub fn work_content_shares(&self) -> Vec<Share> {
        aggregate::nonzero_shares(&self.work_content_totals())
    }

    pub fn staff_totals_for(&self, label: &str) -> Vec<Total> {
        aggregate::by_staff_for_content(self.filtered().rows(), label)
    }

    pub fn content_totals_for(&self, staff_id: &str) -> Vec<Total> {
        aggregate::by_content_for_staff(self.filtered().rows(), staff_id, self.catalog.labels())
    }

    pub fn totals_by(&self, dim: Dimension) -> Vec<Total> {
        aggregate::totals_by(self.filtered().rows(), dim)
    }

    pub fn crosstab(&self, dim: Dimension) -> CrossTab {
        aggregate::crosstab(self.filtered().rows(), self.catalog.labels(), dim)
    }
}
