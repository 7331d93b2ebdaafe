//! Server adapter implementations.
//!
//! Each module provides a struct implementing [`crate::adapter::ServerAdapter`]
//! for one federated protocol variant.

pub mod mastodon;
pub mod status;
pub mod threads;

pub use mastodon::MastodonAdapter;
pub use threads::ThreadsAdapter;
