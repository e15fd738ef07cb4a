use super::row::TimesheetRow;
use std::collections::HashSet;

/// Ordered collection of timesheet rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<TimesheetRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<TimesheetRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TimesheetRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TimesheetRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimesheetRow> {
        self.rows.iter()
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = TimesheetRow>) {
        self.rows.extend(rows);
    }

    /// Removes exact full-row duplicates, keeping the first occurrence.
    /// Returns how many rows were dropped.
    pub fn dedup(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<TimesheetRow> = HashSet::with_capacity(before);
        self.rows.retain(|r| seen.insert(r.clone()));
        before - self.rows.len()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TimesheetRow;
    type IntoIter = std::slice::Iter<'a, TimesheetRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<TimesheetRow> for Dataset {
    fn from_iter<I: IntoIterator<Item = TimesheetRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
