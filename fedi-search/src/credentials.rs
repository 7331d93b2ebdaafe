//! Bearer credential lookup for servers that require authenticated search.
//!
//! Credentials are located by a name derived from the server hostname:
//! `mastodon.social` → `MASTODON_SOCIAL_ACCESS_TOKEN`. Adapters receive a
//! [`CredentialLookup`] rather than reading the environment themselves, so
//! tests and embedders can substitute their own source.

use std::collections::HashMap;

/// Suffix appended to the normalised hostname to form the credential name.
pub const CREDENTIAL_SUFFIX: &str = "_ACCESS_TOKEN";

/// Derive the credential variable name for `server`.
///
/// Upper-cases the hostname, replaces `.` with `_` and appends
/// [`CREDENTIAL_SUFFIX`]. Other characters are left as they are.
pub fn credential_env_key(server: &str) -> String {
    let mut key = server.to_uppercase().replace('.', "_");
    key.push_str(CREDENTIAL_SUFFIX);
    key
}

/// A source of bearer tokens keyed by server hostname.
pub trait CredentialLookup: Send + Sync {
    /// Returns the token for `server`, or `None` if no credential is configured.
    fn lookup(&self, server: &str) -> Option<String>;
}

/// Reads credentials from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialLookup for EnvCredentials {
    fn lookup(&self, server: &str) -> Option<String> {
        let key = credential_env_key(server);
        match std::env::var(&key) {
            Ok(token) if !token.is_empty() => Some(token),
            _ => {
                tracing::trace!(key, "no credential in environment");
                None
            }
        }
    }
}

/// Fixed in-memory credentials, keyed by hostname.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    tokens: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token for `server`, replacing any previous one.
    pub fn with_token(mut self, server: impl Into<String>, token: impl Into<String>) -> Self {
        self.tokens.insert(server.into(), token.into());
        self
    }
}

impl CredentialLookup for StaticCredentials {
    fn lookup(&self, server: &str) -> Option<String> {
        self.tokens.get(server).cloned()
    }
}
