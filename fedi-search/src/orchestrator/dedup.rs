//! Result deduplication by exact permalink.
//!
//! The first result seen for a URL wins. Results with an empty or blank
//! URL are never considered duplicates of anything. URLs are compared as
//! exact, case-sensitive strings with no normalisation.

use std::collections::HashSet;

use crate::types::SearchResult;

/// Drop results whose non-empty `url` has already been seen.
///
/// Keeps the relative order of the surviving results.
pub fn dedupe(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    let mut kept = Vec::with_capacity(results.len());

    for result in results {
        if result.url.trim().is_empty() {
            kept.push(result);
            continue;
        }
        if seen.insert(result.url.clone()) {
            kept.push(result);
        }
    }

    kept
}
