//! Mastodon adapter: authenticated search against `/api/v2/search`.
//!
//! Mastodon only returns status results to authenticated callers, so the
//! adapter skips any server it holds no bearer token for instead of
//! making a request that would come back empty.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::adapter::ServerAdapter;
use crate::credentials::{credential_env_key, CredentialLookup};
use crate::http;
use crate::types::{SearchResult, ServerType};

use super::status::{into_results, search_endpoint, StatusSearchResponse};

/// Mastodon-compatible server adapter.
pub struct MastodonAdapter {
    client: reqwest::Client,
    credentials: Arc<dyn CredentialLookup>,
    scheme: String,
}

impl MastodonAdapter {
    pub fn new(client: reqwest::Client, credentials: Arc<dyn CredentialLookup>) -> Self {
        Self {
            client,
            credentials,
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
impl ServerAdapter for MastodonAdapter {
    async fn search(&self, server: &str, query: &str) -> Vec<SearchResult> {
        let token = self
            .credentials
            .lookup(server)
            .filter(|token| !token.is_empty());
        let Some(token) = token else {
            tracing::info!(
                server,
                credential = %credential_env_key(server),
                "skipping server: no authentication credentials found"
            );
            return Vec::new();
        };

        let Some(url) = search_endpoint(&self.scheme, server, query) else {
            return Vec::new();
        };

        tracing::trace!(server, query, "Mastodon search");
        let fetched_at = Utc::now();
        let Some(body) =
            http::fetch_json::<StatusSearchResponse>(&self.client, &url, Some(&token)).await
        else {
            return Vec::new();
        };

        let results = into_results(body, server, fetched_at);
        tracing::debug!(server, count = results.len(), "Mastodon results received");
        results
    }

    fn server_type(&self) -> ServerType {
        ServerType::Mastodon
    }
}
