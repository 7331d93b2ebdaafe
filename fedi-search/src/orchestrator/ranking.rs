//! Ranking strategies for merged results.
//!
//! Every strategy returns a reordered copy and leaves the input untouched.
//! All sorts are stable: results that compare equal keep their input order.
//!
//! Relevance scoring:
//!
//! ```text
//! score = match_count * 100 + (match_count / content_length) * 1000
//! ```
//!
//! where `match_count` sums case-insensitive matches of every query term
//! and `content_length` is the character count, floored at 1. Results with
//! no match score 0.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use crate::types::{RankingStrategy, SearchResult};

/// Reward per raw term match.
pub const MATCH_COUNT_WEIGHT: f64 = 100.0;

/// Reward for match density (matches per character).
pub const DENSITY_WEIGHT: f64 = 1000.0;

/// Return `results` reordered by `strategy`.
///
/// `query` is only used by [`RankingStrategy::Relevance`]; when it is
/// absent or blank, relevance falls back to date ordering.
pub fn rank(
    results: &[SearchResult],
    strategy: RankingStrategy,
    query: Option<&str>,
) -> Vec<SearchResult> {
    let mut ranked = results.to_vec();
    match strategy {
        RankingStrategy::Date => sort_by_date(&mut ranked),
        RankingStrategy::Engagement => {
            ranked.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
        }
        RankingStrategy::Relevance => match query.filter(|q| !q.trim().is_empty()) {
            Some(query) => return sort_by_relevance(ranked, query),
            None => sort_by_date(&mut ranked),
        },
    }
    ranked
}

fn sort_by_date(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn sort_by_relevance(results: Vec<SearchResult>, query: &str) -> Vec<SearchResult> {
    let terms = compile_terms(query);
    let mut scored: Vec<(f64, SearchResult)> = results
        .into_iter()
        .map(|result| (score_with(&terms, &result.content), result))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, result)| result).collect()
}

/// Compile each whitespace-separated, lower-cased query term.
///
/// Terms are regular expressions matched case-insensitively; a term that is
/// not a valid pattern is matched literally.
fn compile_terms(query: &str) -> Vec<Regex> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter_map(|term| {
            RegexBuilder::new(term)
                .case_insensitive(true)
                .build()
                .or_else(|_| {
                    RegexBuilder::new(&regex::escape(term))
                        .case_insensitive(true)
                        .build()
                })
                .map_err(|err| tracing::debug!(term, error = %err, "skipping query term"))
                .ok()
        })
        .collect()
}

fn score_with(terms: &[Regex], content: &str) -> f64 {
    let match_count: usize = terms.iter().map(|re| re.find_iter(content).count()).sum();
    if match_count == 0 {
        return 0.0;
    }

    let content_length = content.chars().count().max(1);
    let matches = match_count as f64;
    matches * MATCH_COUNT_WEIGHT + (matches / content_length as f64) * DENSITY_WEIGHT
}

/// Relevance score of `content` for `query`. Blank queries score 0.
pub fn relevance_score(content: &str, query: &str) -> f64 {
    score_with(&compile_terms(query), content)
}
