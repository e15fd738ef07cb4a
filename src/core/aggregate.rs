//! Hour totals for the summary views.
//!
//! Missing hours never count as zero at row level: they are skipped, and a
//! group whose hours are all missing totals 0.

use crate::core::filter::Dimension;
use crate::models::TimesheetRow;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Total {
    pub key: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub key: String,
    pub hours: f64,
    pub percent: f64,
}

/// Sum of the present hours.
pub fn sum_hours<'a>(rows: impl IntoIterator<Item = &'a TimesheetRow>) -> f64 {
    rows.into_iter().filter_map(|r| r.hours).sum()
}

fn group_sums<'a, F>(rows: impl IntoIterator<Item = &'a TimesheetRow>, key: F) -> BTreeMap<String, f64>
where
    F: Fn(&TimesheetRow) -> &str,
{
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for r in rows {
        let entry = sums.entry(key(r).to_string()).or_insert(0.0);
        if let Some(h) = r.hours {
            *entry += h;
        }
    }
    sums
}

fn reindex(sums: &BTreeMap<String, f64>, labels: &[String]) -> Vec<Total> {
    labels
        .iter()
        .map(|l| Total {
            key: l.clone(),
            hours: sums.get(l).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Hours per work-content class, one entry per label in label order.
pub fn by_work_content(rows: &[TimesheetRow], labels: &[String]) -> Vec<Total> {
    let sums = group_sums(rows, |r| &r.work_description_class);
    reindex(&sums, labels)
}

/// Positive entries with their percentage of the positive total.
pub fn nonzero_shares(totals: &[Total]) -> Vec<Share> {
    let positive: Vec<&Total> = totals.iter().filter(|t| t.hours > 0.0).collect();
    let grand: f64 = positive.iter().map(|t| t.hours).sum();

    positive
        .into_iter()
        .map(|t| Share {
            key: t.key.clone(),
            hours: t.hours,
            percent: if grand > 0.0 {
                t.hours / grand * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Hours per staff id for one work-content class, ascending.
pub fn by_staff_for_content(rows: &[TimesheetRow], label: &str) -> Vec<Total> {
    let sums = group_sums(
        rows.iter().filter(|r| r.work_description_class == label),
        |r| &r.staff_id,
    );

    let mut totals: Vec<Total> = sums
        .into_iter()
        .map(|(key, hours)| Total { key, hours })
        .collect();
    totals.sort_by(|a, b| a.hours.total_cmp(&b.hours));
    totals
}

/// Hours per work-content class for one staff id, label order,
/// classes without hours left out.
pub fn by_content_for_staff(rows: &[TimesheetRow], staff_id: &str, labels: &[String]) -> Vec<Total> {
    let sums = group_sums(
        rows.iter().filter(|r| r.staff_id == staff_id),
        |r| &r.work_description_class,
    );

    reindex(&sums, labels)
        .into_iter()
        .filter(|t| t.hours > 0.0)
        .collect()
}

/// Hours per value of a dimension, sorted by value.
pub fn totals_by(rows: &[TimesheetRow], dim: Dimension) -> Vec<Total> {
    group_sums(rows, |r| dim.value(r))
        .into_iter()
        .map(|(key, hours)| Total { key, hours })
        .collect()
}

/// Work-content class × dimension matrix of hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub dimension: Dimension,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl CrossTab {
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.cells[r][c])
    }

    pub fn row_totals(&self) -> Vec<f64> {
        self.cells.iter().map(|r| r.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<f64> {
        (0..self.columns.len())
            .map(|c| self.cells.iter().map(|r| r[c]).sum())
            .collect()
    }
}

/// Rows are the labels (label order), columns the sorted dimension values.
pub fn crosstab(rows: &[TimesheetRow], labels: &[String], dim: Dimension) -> CrossTab {
    let columns: Vec<String> = rows
        .iter()
        .map(|r| dim.value(r).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut cells = vec![vec![0.0; columns.len()]; labels.len()];
    for r in rows {
        let Some(h) = r.hours else { continue };
        let Some(ri) = labels.iter().position(|l| *l == r.work_description_class) else {
            continue;
        };
        if let Ok(ci) = columns.binary_search_by(|c| c.as_str().cmp(dim.value(r))) {
            cells[ri][ci] += h;
        }
    }

    CrossTab {
        dimension: dim,
        rows: labels.to_vec(),
        columns,
        cells,
    }
}
