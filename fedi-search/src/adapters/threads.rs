//! Threads adapter: unauthenticated search on the federation endpoint.
//!
//! Threads currently exposes the same `/api/v2/search` shape as Mastodon,
//! so the payload mapping is shared. No credential is attached.

use async_trait::async_trait;
use chrono::Utc;

use crate::adapter::ServerAdapter;
use crate::http;
use crate::types::{SearchResult, ServerType};

use super::status::{into_results, search_endpoint, StatusSearchResponse};

/// Threads server adapter.
pub struct ThreadsAdapter {
    client: reqwest::Client,
    scheme: String,
}

impl ThreadsAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            scheme: "https".to_string(),
        }
    }

    /// Override the URL scheme (`https` by default).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }
}

#[async_trait]
impl ServerAdapter for ThreadsAdapter {
    async fn search(&self, server: &str, query: &str) -> Vec<SearchResult> {
        let Some(url) = search_endpoint(&self.scheme, server, query) else {
            return Vec::new();
        };

        tracing::trace!(server, query, "Threads search");
        let fetched_at = Utc::now();
        let Some(body) = http::fetch_json::<StatusSearchResponse>(&self.client, &url, None).await
        else {
            return Vec::new();
        };

        let results = into_results(body, server, fetched_at);
        tracing::debug!(server, count = results.len(), "Threads results received");
        results
    }

    fn server_type(&self) -> ServerType {
        ServerType::Threads
    }
}
