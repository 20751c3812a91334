// src/pipeline/filter.rs

//! Filter/search engine.

use std::borrow::Borrow;

use crate::models::{FilterState, Record, Selection};

/// Compute the filtered view from the full collection.
///
/// Always starts from `all`. With no active predicate the whole collection is
/// returned without a per-record scan; for shared records (`Arc<Record>`)
/// that copies handles only.
pub fn apply_filters<R>(all: &[R], filter: &FilterState) -> Vec<R>
where
    R: Borrow<Record> + Clone,
{
    if filter.is_default() {
        return all.to_vec();
    }
    all.iter()
        .filter(|record| matches(Borrow::<Record>::borrow(*record), filter))
        .cloned()
        .collect()
}

/// Whether a record satisfies all three predicates.
pub fn matches(record: &Record, filter: &FilterState) -> bool {
    let category_ok = match &filter.category {
        Selection::All => true,
        Selection::Only(key) => record.category_key() == key,
    };
    let status_ok = match &filter.status {
        Selection::All => true,
        Selection::Only(part) => record
            .value(crate::models::Field::Status)
            .to_lowercase()
            .contains(part.as_str()),
    };
    let search_ok = filter.search_term.is_empty()
        || record
            .values()
            .iter()
            .any(|value| value.to_lowercase().contains(&filter.search_term));

    category_ok && status_ok && search_ok
}

/// Human-readable result count for the current filter.
pub fn result_summary(count: usize, filter: &FilterState) -> String {
    if filter.is_default() {
        let noun = if count == 1 { "record" } else { "records" };
        return format!("Showing all {count} {noun}");
    }

    let noun = if count == 1 { "result" } else { "results" };
    let mut summary = format!("Found {count} {noun}");
    if !filter.search_term.is_empty() {
        summary.push_str(&format!(" for \"{}\"", filter.search_term));
    }
    if let Some(category) = filter.category.value() {
        summary.push_str(&format!(" in category \"{category}\""));
    }
    if let Some(status) = filter.status.value() {
        summary.push_str(&format!(" with status \"{status}\""));
    }
    summary
}
