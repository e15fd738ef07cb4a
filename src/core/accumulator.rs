use crate::models::Dataset;
use tracing::debug;

/// Merge a previously exported dataset with freshly extracted rows.
///
/// - both sides → saved rows first, then fresh ones, exact duplicates removed
/// - one side → that side unchanged
/// - neither → empty
pub fn merge(saved: Option<Dataset>, fresh: Dataset) -> Dataset {
    match saved {
        Some(mut saved) if !fresh.is_empty() => {
            let total = saved.len() + fresh.len();
            saved.extend(fresh.into_rows());
            let dropped = saved.dedup();
            debug!(total, dropped, kept = saved.len(), "datasets merged");
            saved
        }
        Some(saved) => saved,
        None => fresh,
    }
}
