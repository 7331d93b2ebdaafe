//! Trait definition for pluggable server protocol adapters.
//!
//! Each federated protocol variant implements [`ServerAdapter`] to provide
//! a uniform search interface. The orchestrator only ever sees
//! `Arc<dyn ServerAdapter>`, so a new variant with a different response
//! shape is added by writing one more implementation and registering it.

use async_trait::async_trait;

use crate::types::{SearchResult, ServerType};

/// A pluggable protocol adapter for one kind of federated server.
///
/// Implementors handle, for their protocol:
///
/// - credential resolution (and skipping when a required one is missing)
/// - endpoint URL construction with query encoding
/// - the HTTP request via [`crate::http::fetch_json`]
/// - mapping provider items into [`SearchResult`] values
///
/// `search` is infallible by contract: every failure is logged and
/// reported as an empty list, so one unreachable server never affects
/// the others. All implementations must be `Send + Sync` for concurrent
/// fan-out.
#[async_trait]
pub trait ServerAdapter: Send + Sync {
    /// Search `server` for `query` and return its normalised results.
    async fn search(&self, server: &str, query: &str) -> Vec<SearchResult>;

    /// Returns which [`ServerType`] this adapter speaks.
    fn server_type(&self) -> ServerType;
}
