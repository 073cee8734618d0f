//! Filter & sort engine over the canonical practitioner list.
//!
//! Stages run in a fixed order: search → consultation → specialty → sort.
//! Stages are ANDed; specialty matching is OR within its stage.
//! Nothing here mutates the input list.

use crate::models::{FilterSpec, Practitioner, SortBy};

/// Case-insensitive substring match of `query` against the practitioner name.
pub fn matches_search(practitioner: &Practitioner, query: &str) -> bool {
    practitioner
        .name
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Derive the ordered subset selected by `spec`.
pub fn apply(practitioners: &[Practitioner], spec: &FilterSpec) -> Vec<Practitioner> {
    let search = spec.effective_search();

    let mut selected: Vec<Practitioner> = practitioners
        .iter()
        .filter(|p| search.map_or(true, |q| matches_search(p, q)))
        .filter(|p| spec.consultation_type.map_or(true, |mode| p.offers(mode)))
        .filter(|p| {
            spec.specialties.is_empty()
                || p.specialties.iter().any(|s| spec.specialties.contains(s))
        })
        .cloned()
        .collect();

    // `sort_by_key` is stable, so ties keep their filtered order.
    match spec.sort_by {
        Some(SortBy::Fees) => selected.sort_by_key(|p| p.fee),
        Some(SortBy::Experience) => {
            selected.sort_by_key(|p| std::cmp::Reverse(p.experience_years))
        }
        None => {}
    }

    selected
}

/// First `limit` name matches in list order. Blank queries suggest nothing.
pub fn suggestions(practitioners: &[Practitioner], query: &str, limit: usize) -> Vec<Practitioner> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    practitioners
        .iter()
        .filter(|p| matches_search(p, query))
        .take(limit)
        .cloned()
        .collect()
}
