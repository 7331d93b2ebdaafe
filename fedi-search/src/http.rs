//! Shared HTTP plumbing for server adapters.
//!
//! Provides the [`reqwest::Client`] used by every adapter, a soft-failing
//! JSON fetch, and the markup stripper applied to post content.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// User-Agent sent when the configuration does not set one.
const DEFAULT_USER_AGENT: &str = concat!("fedi-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for provider API requests.
///
/// The timeout and User-Agent come from `config`. The client is cheap to
/// clone and is shared by all adapters of one orchestrator.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and decode the JSON body, returning `None` on any failure.
///
/// Always sends `Accept: application/json`; sends `Authorization: Bearer`
/// only when `token` is given and non-empty. Non-2xx statuses, transport errors and
/// undecodable bodies are logged at warn level and reported as `None`,
/// which callers treat exactly like an empty result set.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
) -> Option<T> {
    match request_json(client, url, token).await {
        Ok(body) => Some(body),
        Err(err) => {
            tracing::warn!(url, error = %err, "provider fetch failed");
            None
        }
    }
}

async fn request_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
) -> Result<T, SearchError> {
    let mut request = client.get(url).header(ACCEPT, "application/json");
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Http(format!("HTTP {}", status.as_u16())));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SearchError::Parse(format!("invalid response body: {e}")))
}

fn markup_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").ok()).as_ref()
}

/// Remove every `<...>` tag from `text`.
///
/// This is a tag filter, not an HTML parser: entities such as `&amp;` are
/// left encoded and whitespace is not touched.
pub fn strip_markup(text: &str) -> String {
    match markup_pattern() {
        Some(pattern) => pattern.replace_all(text, "").into_owned(),
        None => text.to_owned(),
    }
}
