use crate::core::aggregate::sum_hours;
use crate::core::catalog::Catalog;
use crate::models::{Dataset, TimesheetRow};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;

/// Categorical columns a dataset can be grouped or cross-tabulated by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Staff,
    Branch,
    Month,
}

impl Dimension {
    pub fn value<'r>(&self, row: &'r TimesheetRow) -> &'r str {
        match self {
            Dimension::Staff => &row.staff_id,
            Dimension::Branch => &row.branch,
            Dimension::Month => &row.month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Staff => "staff",
            Dimension::Branch => "branch",
            Dimension::Month => "month",
        }
    }

    /// Column header used in exports and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Staff => "担当者",
            Dimension::Branch => "支店",
            Dimension::Month => "月",
        }
    }
}

/// Candidate values for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub months: Vec<String>,
    pub staff: Vec<String>,
    pub branches: Vec<String>,
    pub contents: Vec<String>,
}

impl Facets {
    /// Sorted distinct months, staff ids and branches, plus the label list.
    pub fn from_rows(rows: &[TimesheetRow], catalog: &Catalog) -> Self {
        let distinct = |dim: Dimension| -> Vec<String> {
            rows.iter()
                .map(|r| dim.value(r).to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Self {
            months: distinct(Dimension::Month),
            staff: distinct(Dimension::Staff),
            branches: distinct(Dimension::Branch),
            contents: catalog.labels().to_vec(),
        }
    }
}

/// Selected values per dimension; a row passes when all four match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub months: BTreeSet<String>,
    pub staff: BTreeSet<String>,
    pub branches: BTreeSet<String>,
    pub contents: BTreeSet<String>,
}

impl Selection {
    pub fn all(facets: &Facets) -> Self {
        let set = |v: &[String]| v.iter().cloned().collect::<BTreeSet<_>>();
        Self {
            months: set(&facets.months),
            staff: set(&facets.staff),
            branches: set(&facets.branches),
            contents: set(&facets.contents),
        }
    }

    /// Everything selected except work contents with no recorded hours.
    pub fn default_for(rows: &[TimesheetRow], facets: &Facets) -> Self {
        let mut sel = Self::all(facets);
        sel.contents.retain(|label| {
            sum_hours(rows.iter().filter(|r| &r.work_description_class == label)) != 0.0
        });
        sel
    }

    pub fn matches(&self, row: &TimesheetRow) -> bool {
        self.months.contains(&row.month)
            && self.staff.contains(&row.staff_id)
            && self.branches.contains(&row.branch)
            && self.contents.contains(&row.work_description_class)
    }

    pub fn apply(&self, rows: &[TimesheetRow]) -> Dataset {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
