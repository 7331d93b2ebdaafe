//! Core search orchestrator: concurrent per-server fan-out, dedup, rank.
//!
//! Holds one adapter per [`ServerType`] and never names a concrete adapter
//! in the search path, so adding a protocol variant only means registering
//! another [`ServerAdapter`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::adapter::ServerAdapter;
use crate::adapters::{MastodonAdapter, ThreadsAdapter};
use crate::config::SearchConfig;
use crate::credentials::CredentialLookup;
use crate::error::SearchError;
use crate::http;
use crate::types::{RankingStrategy, SearchResult, ServerConfig, ServerType};

use super::dedup::dedupe;
use super::ranking::rank;

/// Fans one query out to many servers and merges the answers.
#[derive(Clone, Default)]
pub struct SearchOrchestrator {
    adapters: HashMap<ServerType, Arc<dyn ServerAdapter>>,
}

impl SearchOrchestrator {
    /// An orchestrator with no adapters registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard registry: Mastodon and Threads adapters sharing
    /// one HTTP client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &SearchConfig,
        credentials: Arc<dyn CredentialLookup>,
    ) -> Result<Self, SearchError> {
        let client = http::build_client(config)?;
        Ok(Self::new()
            .with_adapter(Arc::new(MastodonAdapter::new(client.clone(), credentials)))
            .with_adapter(Arc::new(ThreadsAdapter::new(client))))
    }

    /// Register `adapter` for its [`ServerType`], replacing any previous one.
    pub fn with_adapter(mut self, adapter: Arc<dyn ServerAdapter>) -> Self {
        self.adapters.insert(adapter.server_type(), adapter);
        self
    }

    /// The adapter registered for `server_type`, if any.
    pub fn adapter_for(&self, server_type: ServerType) -> Option<&Arc<dyn ServerAdapter>> {
        self.adapters.get(&server_type)
    }

    /// Search every server in `servers` for `query` and return one
    /// deduplicated list ordered by `strategy`.
    ///
    /// # Pipeline
    ///
    /// 1. Blank query or no servers: return empty without calling any adapter
    /// 2. Fan out to every server's adapter concurrently with
    ///    [`futures::future::join_all`] and wait for all of them
    /// 3. Concatenate in server declaration order
    /// 4. Drop later copies of already-seen URLs
    /// 5. Rank by `strategy` using the original query
    ///
    /// Adapters never fail, so one unreachable server only means fewer
    /// results.
    pub async fn search(
        &self,
        query: &str,
        servers: &[ServerConfig],
        strategy: RankingStrategy,
    ) -> Vec<SearchResult> {
        if query.trim().is_empty() || servers.is_empty() {
            return Vec::new();
        }

        tracing::debug!(query, servers = servers.len(), %strategy, "starting federated search");

        let searches = servers.iter().map(|server| self.search_server(server, query));
        let per_server = futures::future::join_all(searches).await;

        let merged: Vec<SearchResult> = per_server.into_iter().flatten().collect();
        let merged_count = merged.len();
        let deduped = dedupe(merged);
        tracing::debug!(
            merged = merged_count,
            unique = deduped.len(),
            "merged server results"
        );

        rank(&deduped, strategy, Some(query))
    }

    async fn search_server(&self, server: &ServerConfig, query: &str) -> Vec<SearchResult> {
        match self.adapter_for(server.server_type) {
            Some(adapter) => adapter.search(&server.name, query).await,
            None => {
                tracing::warn!(
                    server = %server.name,
                    server_type = %server.server_type,
                    "no adapter registered for server type"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn make_result(id: &str, server: &str, url: &str, day: u32) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            server: server.to_string(),
            user: "user".to_string(),
            content: format!("post {id}"),
            url: url.to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
                .single()
                .expect("valid date"),
            boosts: 0,
            favorites: 0,
        }
    }

    /// Returns canned results per server name and records every call.
    struct MockAdapter {
        server_type: ServerType,
        results: HashMap<String, Vec<SearchResult>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl MockAdapter {
        fn new(server_type: ServerType) -> Self {
            Self {
                server_type,
                results: HashMap::new(),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn with_results(mut self, server: &str, results: Vec<SearchResult>) -> Self {
            self.results.insert(server.to_string(), results);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ServerAdapter for MockAdapter {
        async fn search(&self, server: &str, query: &str) -> Vec<SearchResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut seen) = self.seen.lock() {
                seen.push((server.to_string(), query.to_string()));
            }
            self.results.get(server).cloned().unwrap_or_default()
        }

        fn server_type(&self) -> ServerType {
            self.server_type
        }
    }

    /// Blocks until every sibling has started, proving the calls overlap.
    struct RendezvousAdapter {
        barrier: Arc<Barrier>,
    }

    #[async_trait]
    impl ServerAdapter for RendezvousAdapter {
        async fn search(&self, server: &str, _query: &str) -> Vec<SearchResult> {
            self.barrier.wait().await;
            vec![make_result(server, server, "", 1)]
        }

        fn server_type(&self) -> ServerType {
            ServerType::Mastodon
        }
    }

    fn servers(entries: &[(&str, ServerType)]) -> Vec<ServerConfig> {
        entries
            .iter()
            .map(|(name, t)| ServerConfig::new(*name, *t))
            .collect()
    }

    #[tokio::test]
    async fn blank_query_makes_no_calls() {
        let mastodon = Arc::new(MockAdapter::new(ServerType::Mastodon));
        let orchestrator = SearchOrchestrator::new().with_adapter(mastodon.clone());
        let list = servers(&[("mastodon.social", ServerType::Mastodon)]);

        assert!(orchestrator.search("", &list, RankingStrategy::Date).await.is_empty());
        assert!(orchestrator.search("   ", &list, RankingStrategy::Date).await.is_empty());
        assert_eq!(mastodon.calls(), 0);
    }

    #[tokio::test]
    async fn empty_server_list_makes_no_calls() {
        let mastodon = Arc::new(MockAdapter::new(ServerType::Mastodon));
        let orchestrator = SearchOrchestrator::new().with_adapter(mastodon.clone());

        let results = orchestrator.search("rust", &[], RankingStrategy::Date).await;
        assert!(results.is_empty());
        assert_eq!(mastodon.calls(), 0);
    }

    #[tokio::test]
    async fn dispatches_by_server_type() {
        let from_mastodon = vec![make_result("1", "mastodon.social", "https://m/1", 1)];
        let from_threads = vec![make_result("2", "threads.net", "https://t/2", 2)];
        let mastodon = Arc::new(
            MockAdapter::new(ServerType::Mastodon).with_results("mastodon.social", from_mastodon),
        );
        let threads = Arc::new(
            MockAdapter::new(ServerType::Threads).with_results("threads.net", from_threads),
        );
        let orchestrator = SearchOrchestrator::new()
            .with_adapter(mastodon.clone())
            .with_adapter(threads.clone());

        let list = servers(&[
            ("mastodon.social", ServerType::Mastodon),
            ("threads.net", ServerType::Threads),
        ]);
        let results = orchestrator.search("test query", &list, RankingStrategy::Date).await;

        assert_eq!(results.len(), 2);
        assert_eq!(mastodon.calls(), 1);
        assert_eq!(threads.calls(), 1);
        let seen = mastodon.seen.lock().expect("lock").clone();
        assert_eq!(seen, vec![("mastodon.social".to_string(), "test query".to_string())]);
    }

    #[tokio::test]
    async fn duplicate_url_keeps_first_declared_server() {
        let shared = "https://example.com/same";
        let mastodon = Arc::new(
            MockAdapter::new(ServerType::Mastodon)
                .with_results(
                    "mastodon.social",
                    vec![make_result("1", "mastodon.social", shared, 1)],
                )
                .with_results("hachyderm.io", vec![make_result("2", "hachyderm.io", shared, 1)]),
        );
        let orchestrator = SearchOrchestrator::new().with_adapter(mastodon);

        let list = servers(&[
            ("mastodon.social", ServerType::Mastodon),
            ("hachyderm.io", ServerType::Mastodon),
        ]);
        let results = orchestrator.search("test", &list, RankingStrategy::Date).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].server, "mastodon.social");

        let reversed: Vec<ServerConfig> = list.into_iter().rev().collect();
        let results = orchestrator.search("test", &reversed, RankingStrategy::Date).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].server, "hachyderm.io");
    }

    #[tokio::test]
    async fn applies_ranking_strategy() {
        let mastodon = Arc::new(
            MockAdapter::new(ServerType::Mastodon)
                .with_results("a.social", vec![make_result("old", "a.social", "https://a/1", 1)])
                .with_results("b.social", vec![make_result("new", "b.social", "https://b/1", 2)]),
        );
        let orchestrator = SearchOrchestrator::new().with_adapter(mastodon);
        let list = servers(&[
            ("a.social", ServerType::Mastodon),
            ("b.social", ServerType::Mastodon),
        ]);

        let results = orchestrator.search("post", &list, RankingStrategy::Date).await;
        assert_eq!(results[0].id, "new");
        assert_eq!(results[1].id, "old");
    }

    #[tokio::test]
    async fn unregistered_type_contributes_nothing() {
        let mastodon = Arc::new(
            MockAdapter::new(ServerType::Mastodon)
                .with_results("mastodon.social", vec![make_result("1", "mastodon.social", "", 1)]),
        );
        let orchestrator = SearchOrchestrator::new().with_adapter(mastodon);
        let list = servers(&[
            ("threads.net", ServerType::Threads),
            ("mastodon.social", ServerType::Mastodon),
        ]);

        let results = orchestrator.search("q", &list, RankingStrategy::Date).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].server, "mastodon.social");
    }

    #[tokio::test]
    async fn empty_server_does_not_block_others() {
        let mastodon = Arc::new(
            MockAdapter::new(ServerType::Mastodon)
                .with_results("up.social", vec![make_result("1", "up.social", "https://up/1", 1)]),
        );
        let orchestrator = SearchOrchestrator::new().with_adapter(mastodon.clone());
        let list = servers(&[
            ("down.social", ServerType::Mastodon),
            ("up.social", ServerType::Mastodon),
        ]);

        let results = orchestrator.search("q", &list, RankingStrategy::Engagement).await;
        assert_eq!(results.len(), 1);
        assert_eq!(mastodon.calls(), 2);
    }

    #[tokio::test]
    async fn adapters_run_concurrently() {
        let barrier = Arc::new(Barrier::new(3));
        let orchestrator = SearchOrchestrator::new().with_adapter(Arc::new(RendezvousAdapter {
            barrier: barrier.clone(),
        }));
        let list = servers(&[
            ("a", ServerType::Mastodon),
            ("b", ServerType::Mastodon),
            ("c", ServerType::Mastodon),
        ]);

        let results = tokio::time::timeout(
            Duration::from_secs(5),
            orchestrator.search("q", &list, RankingStrategy::Date),
        )
        .await
        .expect("all adapter calls should be in flight together");
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn from_config_registers_both_variants() {
        let orchestrator = SearchOrchestrator::from_config(
            &SearchConfig::default(),
            Arc::new(crate::credentials::StaticCredentials::new()),
        )
        .expect("orchestrator");
        assert!(orchestrator.adapter_for(ServerType::Mastodon).is_some());
        assert!(orchestrator.adapter_for(ServerType::Threads).is_some());
    }
}
