//! Search orchestrator: concurrent fan-out, dedup, ranking, filtering.
//!
//! This module fans a query out to every configured server concurrently,
//! drops results whose permalink was already seen, and orders the merged
//! list by the requested strategy. The filters let a display layer narrow
//! the list afterwards.

pub mod dedup;
pub mod filter;
pub mod ranking;
pub mod search;

pub use search::SearchOrchestrator;
