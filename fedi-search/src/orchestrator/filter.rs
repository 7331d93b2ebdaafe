//! Narrowing a ranked result list for display.
//!
//! Filters borrow their input and return new lists; callers re-rank the
//! filtered list with [`super::ranking::rank`] if the order matters.

use std::collections::HashSet;

use crate::types::SearchResult;

/// Keep results whose content or user contains `needle`, ignoring case.
///
/// A blank `needle` keeps everything.
pub fn filter_by_text(results: &[SearchResult], needle: &str) -> Vec<SearchResult> {
    if needle.trim().is_empty() {
        return results.to_vec();
    }
    let needle = needle.to_lowercase();
    results
        .iter()
        .filter(|r| {
            r.content.to_lowercase().contains(&needle) || r.user.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Keep results produced by one of `servers`. An empty set keeps everything.
pub fn filter_by_servers(results: &[SearchResult], servers: &HashSet<String>) -> Vec<SearchResult> {
    if servers.is_empty() {
        return results.to_vec();
    }
    results
        .iter()
        .filter(|r| servers.contains(&r.server))
        .cloned()
        .collect()
}

/// Distinct servers present in `results`, in first-seen order.
pub fn available_servers(results: &[SearchResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .filter(|r| seen.insert(r.server.as_str()))
        .map(|r| r.server.clone())
        .collect()
}
