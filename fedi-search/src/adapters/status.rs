//! The `/api/v2/search` status payload shared by Mastodon-compatible servers.
//!
//! Both current adapters speak this shape. A future variant with a
//! different payload gets its own module instead of changing this one.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::http::strip_markup;
use crate::types::SearchResult;

/// Results requested per server. Only a single page is fetched.
pub const PAGE_SIZE: u32 = 20;

/// Result-type filter sent with every search.
pub const RESULT_TYPE: &str = "statuses";

/// Handle used when a status has no account information.
pub const UNKNOWN_USER: &str = "unknown";

/// Build the search endpoint for `server`.
///
/// Returns `None` if `server` does not form a valid URL (for example a
/// hostname containing spaces).
pub fn search_endpoint(scheme: &str, server: &str, query: &str) -> Option<String> {
    let endpoint = format!(
        "{scheme}://{server}/api/v2/search?q={}&type={RESULT_TYPE}&limit={PAGE_SIZE}",
        urlencoding::encode(query)
    );
    match Url::parse(&endpoint) {
        Ok(_) => Some(endpoint),
        Err(err) => {
            tracing::warn!(server, error = %err, "cannot build search URL");
            None
        }
    }
}

/// Top-level search response body.
#[derive(Debug, Deserialize)]
pub struct StatusSearchResponse {
    pub statuses: Vec<Status>,
}

/// Status ids are strings in Mastodon, but some servers send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StatusId {
    Text(String),
    Number(i64),
}

impl StatusId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Account {
    pub acct: Option<String>,
}

/// One status as returned by the provider. Everything but `id` is optional.
#[derive(Debug, Deserialize)]
pub struct Status {
    pub id: StatusId,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub reblogs_count: Option<i64>,
    #[serde(default)]
    pub favourites_count: Option<i64>,
}

impl Status {
    /// Normalise into a [`SearchResult`] attributed to `server`.
    ///
    /// `fetched_at` stands in for a missing or unparseable `created_at`.
    pub fn into_result(self, server: &str, fetched_at: DateTime<Utc>) -> SearchResult {
        let user = self
            .account
            .and_then(|a| a.acct)
            .filter(|acct| !acct.is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        let created_at = self
            .created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map_or(fetched_at, |ts| ts.with_timezone(&Utc));

        SearchResult {
            id: self.id.into_string(),
            server: server.to_string(),
            user,
            content: strip_markup(self.content.as_deref().unwrap_or_default()),
            url: self.url.unwrap_or_default(),
            created_at,
            boosts: count(self.reblogs_count),
            favorites: count(self.favourites_count),
        }
    }
}

fn count(value: Option<i64>) -> u64 {
    value.and_then(|n| u64::try_from(n).ok()).unwrap_or(0)
}

/// Map a whole response body into results for `server`.
pub fn into_results(
    response: StatusSearchResponse,
    server: &str,
    fetched_at: DateTime<Utc>,
) -> Vec<SearchResult> {
    response
        .statuses
        .into_iter()
        .map(|status| status.into_result(server, fetched_at))
        .collect()
}
