use crate::core::cell_parser::coerce_hours;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

/// One retained timesheet line.
///
/// The serde names are the column headers of the exported dataset, so a
/// CSV written by `export` can be fed back through `--saved`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetRow {
    #[serde(rename = "作業分類", default)]
    pub work_category: String,

    #[serde(rename = "作業内容", default)]
    pub work_description: String,

    #[serde(rename = "作業分類元", default)]
    pub work_category_source: String,

    #[serde(rename = "工数 [h]", default, deserialize_with = "lenient_hours")]
    pub hours: Option<f64>,

    #[serde(rename = "作業内容_分類", default)]
    pub work_description_class: String,

    #[serde(rename = "月", default)]
    pub month: String,

    #[serde(rename = "担当者", default)]
    pub staff_id: String,

    #[serde(rename = "支店", default)]
    pub branch: String,
}

/// Column order shared by every export format.
pub const COLUMNS: [&str; 8] = [
    "作業分類",
    "作業内容",
    "作業分類元",
    "工数 [h]",
    "作業内容_分類",
    "月",
    "担当者",
    "支店",
];

impl TimesheetRow {
    /// Values in `COLUMNS` order, hours rendered like the CSV export.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.work_category.clone(),
            self.work_description.clone(),
            self.work_category_source.clone(),
            self.hours
                .map(crate::models::cell::format_float)
                .unwrap_or_default(),
            self.work_description_class.clone(),
            self.month.clone(),
            self.staff_id.clone(),
            self.branch.clone(),
        ]
    }

    // -0.0 and 0.0 must compare equal for dedup
    fn hours_bits(&self) -> Option<u64> {
        self.hours.map(|h| (h + 0.0).to_bits())
    }
}

/// Hours read back from text: numbers, annotated numbers, or nothing.
fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(coerce_hours))
}

impl PartialEq for TimesheetRow {
    fn eq(&self, other: &Self) -> bool {
        self.work_category == other.work_category
            && self.work_description == other.work_description
            && self.work_category_source == other.work_category_source
            && self.hours_bits() == other.hours_bits()
            && self.work_description_class == other.work_description_class
            && self.month == other.month
            && self.staff_id == other.staff_id
            && self.branch == other.branch
    }
}

impl Eq for TimesheetRow {}

impl Hash for TimesheetRow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.work_category.hash(state);
        self.work_description.hash(state);
        self.work_category_source.hash(state);
        self.hours_bits().hash(state);
        self.work_description_class.hash(state);
        self.month.hash(state);
        self.staff_id.hash(state);
        self.branch.hash(state);
    }
}
