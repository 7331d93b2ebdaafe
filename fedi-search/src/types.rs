//! Core types for search results, server descriptors and ranking strategies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// A single post returned by one federated server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider-assigned status id (unique per server, not globally).
    pub id: String,
    /// Hostname of the server that returned this post.
    pub server: String,
    /// Account handle of the author, or `"unknown"`.
    pub user: String,
    /// Post text with markup tags stripped.
    pub content: String,
    /// Canonical permalink. May be empty; only non-empty values are deduplicated.
    pub url: String,
    /// When the post was created. Falls back to fetch time if the provider omitted it.
    pub created_at: DateTime<Utc>,
    /// Boost (repost) count.
    pub boosts: u64,
    /// Favourite (like) count.
    pub favorites: u64,
}

impl SearchResult {
    /// Total engagement: boosts plus favourites.
    pub fn engagement(&self) -> u64 {
        self.boosts.saturating_add(self.favorites)
    }
}

/// Protocol variant spoken by a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ServerType {
    /// Mastodon-compatible API; requires a bearer token for search.
    Mastodon,
    /// Threads federation endpoint; queried without credentials.
    Threads,
}

impl ServerType {
    /// Returns the configuration token for this variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mastodon => "mastodon",
            Self::Threads => "threads",
        }
    }

    /// Returns all known variants.
    pub fn all() -> &'static [ServerType] {
        &[Self::Mastodon, Self::Threads]
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServerType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::all().iter().map(ServerType::name).collect();
                SearchError::Config(format!(
                    "invalid server type \"{s}\", must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for ServerType {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One queryable server: its hostname and the protocol it speaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hostname, e.g. `mastodon.social`.
    pub name: String,
    /// Which adapter handles this server.
    #[serde(rename = "type")]
    pub server_type: ServerType,
}

impl ServerConfig {
    pub fn new(name: impl Into<String>, server_type: ServerType) -> Self {
        Self {
            name: name.into(),
            server_type,
        }
    }
}

/// How the merged result list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingStrategy {
    /// Newest first.
    #[default]
    Date,
    /// Most boosts + favourites first.
    Engagement,
    /// Best keyword match against the query first.
    Relevance,
}

impl RankingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Engagement => "engagement",
            Self::Relevance => "relevance",
        }
    }

    /// The strategy after this one in the date → engagement → relevance cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Engagement,
            Self::Engagement => Self::Relevance,
            Self::Relevance => Self::Date,
        }
    }
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankingStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "engagement" => Ok(Self::Engagement),
            "relevance" => Ok(Self::Relevance),
            other => Err(SearchError::Config(format!(
                "invalid ranking strategy \"{other}\", must be one of: date, engagement, relevance"
            ))),
        }
    }
}
