//! Plain-text rendering of a ranked result list.
//!
//! The view is computed in two steps: [`apply_view`] narrows and re-ranks
//! the list the way the user asked, and [`render_list`] turns it into the
//! text printed to stdout.

use std::collections::HashSet;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use fedi_search::orchestrator::filter::{filter_by_servers, filter_by_text};
use fedi_search::orchestrator::ranking::rank;
use fedi_search::{RankingStrategy, SearchResult};

/// Characters of content shown on a list line before truncation.
const PREVIEW_CHARS: usize = 60;

/// What the user asked to see.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub query: String,
    pub strategy: RankingStrategy,
    pub text_filter: Option<String>,
    pub servers: HashSet<String>,
    pub limit: Option<usize>,
}

/// Filter, re-rank and truncate `results` according to `options`.
pub fn apply_view(results: &[SearchResult], options: &ViewOptions) -> Vec<SearchResult> {
    let mut view = match options.text_filter.as_deref() {
        Some(needle) => filter_by_text(results, needle),
        None => results.to_vec(),
    };
    view = filter_by_servers(&view, &options.servers);
    let mut view = rank(&view, options.strategy, Some(&options.query));
    if let Some(limit) = options.limit {
        view.truncate(limit);
    }
    view
}

/// Render the header line and one block per result.
pub fn render_list(options: &ViewOptions, results: &[SearchResult]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "Search: \"{}\" | {} results | Rank: {}",
        options.query,
        results.len(),
        options.strategy
    );
    if let Some(filter) = options.text_filter.as_deref().filter(|f| !f.is_empty()) {
        let _ = write!(out, " | Filter: \"{filter}\"");
    }
    if !options.servers.is_empty() {
        let _ = write!(out, " | Servers: {}", options.servers.len());
    }
    out.push('\n');

    if results.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }

    for (index, result) in results.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_result(index + 1, result));
    }
    out
}

fn render_result(position: usize, result: &SearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{position}. @{}: {}",
        short_handle(&result.user),
        truncate_content(&result.content, PREVIEW_CHARS)
    );
    let _ = writeln!(out, "   @{}", result.user);
    let _ = writeln!(out, "   Posted: {}", format_timestamp(&result.created_at));
    let _ = writeln!(out, "   Server: {}", result.server);
    if result.boosts > 0 || result.favorites > 0 {
        let _ = writeln!(
            out,
            "   {} boosts  {} favorites",
            result.boosts, result.favorites
        );
    }
    if !result.url.is_empty() {
        let _ = writeln!(out, "   {}", result.url);
    }
    out
}

/// The local part of a handle: `alice@mastodon.social` → `alice`.
fn short_handle(user: &str) -> &str {
    user.split('@').next().unwrap_or(user)
}

/// Cut `content` to `max_chars` characters, marking the cut with `...`.
fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &content[..byte_index]),
        None => content.to_string(),
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
