//! Search configuration: which servers to query and how to reach them.
//!
//! [`SearchConfig`] can be built in code, taken from [`Default`], or loaded
//! from a JSON or TOML file. Loaded files are validated before use.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{ServerConfig, ServerType};

/// Default path the CLI reads when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Configuration for a federated search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Servers to query, in declaration order. Order decides which copy of a
    /// duplicated post survives deduplication.
    pub servers: Vec<ServerConfig>,
    /// Per-request HTTP timeout in seconds, enforced by the HTTP client.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, a crate-identifying agent is sent.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            servers: vec![
                ServerConfig::new("mastodon.social", ServerType::Mastodon),
                ServerConfig::new("hachyderm.io", ServerType::Mastodon),
                ServerConfig::new("mastodon.art", ServerType::Mastodon),
                ServerConfig::new("pixelfed.social", ServerType::Mastodon),
            ],
            timeout_seconds: default_timeout_seconds(),
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - every server has a non-blank name
    /// - `timeout_seconds` must be greater than 0
    ///
    /// An empty server list is allowed; searching it yields no results.
    pub fn validate(&self) -> Result<(), SearchError> {
        for (index, server) in self.servers.iter().enumerate() {
            if server.name.trim().is_empty() {
                return Err(SearchError::Config(format!(
                    "server at index {index} must have a name"
                )));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON; anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the file cannot be read, does not
    /// parse, names an unknown server type, or fails [`validate`](Self::validate).
    pub fn from_file(path: &Path) -> Result<Self, SearchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("cannot read {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: SearchConfig = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| SearchError::Config(format!("invalid JSON in config file: {e}")))?
        } else {
            toml::from_str(&content)
                .map_err(|e| SearchError::Config(format!("invalid TOML in config file: {e}")))?
        };

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            servers = config.servers.len(),
            "loaded search config"
        );
        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) when the file exists.
    pub fn load_or_default(path: &Path) -> Result<Self, SearchError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
