//! Query cache/coordinator for search fetches.
//!
//! Owns the mapping from (query, page) keys to fetch outcomes and applies
//! request-superseding and stale-while-revalidate rules for the active key.
//!
//! # Modules
//!
//! - [`cache`]: The [`QueryCache`] coordinator
//! - [`status`]: The [`FetchStatus`] of the active key

pub mod cache;
pub mod status;

pub use cache::{QueryCache, Resolution};
pub use status::FetchStatus;
