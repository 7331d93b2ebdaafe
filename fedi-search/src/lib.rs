//! # fedi-search
//!
//! Federated social search for fedi.
//!
//! One query is sent to many independent servers at once, each through the
//! adapter for the protocol it speaks. The answers are merged into a single
//! list, posts seen under the same permalink are dropped after their first
//! appearance, and the list is ranked by date, engagement or relevance.
//!
//! ## Design
//!
//! - One [`ServerAdapter`] per protocol variant (Mastodon, Threads)
//! - All servers queried concurrently; the search waits for every one
//! - A failing server contributes no results instead of failing the search
//! - Bearer credentials come from an injected [`CredentialLookup`]
//! - Post content has markup tags stripped
//!
//! ## Security
//!
//! - Credentials are only ever sent to the server they are named after
//! - Queries are logged only at trace/debug level
//! - No credentials appear in log lines or error messages

pub mod adapter;
pub mod adapters;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod types;

use std::sync::Arc;

pub use adapter::ServerAdapter;
pub use config::SearchConfig;
pub use credentials::{CredentialLookup, EnvCredentials, StaticCredentials};
pub use error::{Result, SearchError};
pub use orchestrator::SearchOrchestrator;
pub use types::{RankingStrategy, SearchResult, ServerConfig, ServerType};

/// Search every server in `config` and return one ranked list.
///
/// Credentials are read from the process environment. Servers that fail
/// or are skipped simply contribute no results.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::Http`] if the HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> fedi_search::Result<()> {
/// use fedi_search::{RankingStrategy, SearchConfig};
///
/// let config = SearchConfig::default();
/// let results = fedi_search::search("open source", &config, RankingStrategy::Date).await?;
/// for result in &results {
///     println!("@{}: {}", result.user, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    config: &SearchConfig,
    strategy: RankingStrategy,
) -> Result<Vec<SearchResult>> {
    config.validate()?;
    let orchestrator = SearchOrchestrator::from_config(config, Arc::new(EnvCredentials))?;
    Ok(orchestrator.search(query, &config.servers, strategy).await)
}
