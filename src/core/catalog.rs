use crate::config::Config;
use std::collections::BTreeMap;

/// Lookup tables loaded from configuration: known work-content labels and
/// the staff → branch map.
#[derive(Debug, Clone)]
pub struct Catalog {
    labels: Vec<String>,
    fallback: String,
    staff_branches: BTreeMap<String, String>,
}

impl Catalog {
    /// The fallback label is appended to `labels` when it is not already
    /// listed, so every classified row lands on a known label.
    pub fn new(
        labels: Vec<String>,
        fallback: impl Into<String>,
        staff_branches: BTreeMap<String, String>,
    ) -> Self {
        let fallback = fallback.into();
        let mut labels = labels;
        if !labels.contains(&fallback) {
            labels.push(fallback.clone());
        }

        Self {
            labels,
            fallback,
            staff_branches,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.work_contents.clone(),
            cfg.fallback_content.clone(),
            cfg.staff_branches.clone(),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn is_known(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Known labels map to themselves, everything else to the fallback.
    pub fn classify(&self, description: &str) -> String {
        if self.is_known(description) {
            description.to_string()
        } else {
            self.fallback.clone()
        }
    }

    /// Branch of a staff id, empty when unknown.
    pub fn branch_of(&self, staff_id: &str) -> String {
        self.staff_branches
            .get(staff_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
