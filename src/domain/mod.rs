//! Domain layer for the MovieFinder plugin.
//!
//! Core types independent of Zellij APIs and of the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie model and result pages
//! - [`search`]: Query text, page numbers, and the (query, page) key
//!
//! # Examples
//!
//! ```
//! use moviefinder::domain::{PageNumber, QueryKey, SearchQuery};
//!
//! let key = QueryKey::new(SearchQuery::new(" alien "), PageNumber::FIRST).unwrap();
//! assert_eq!(key.query().as_str(), "alien");
//! ```

pub mod error;
pub mod movie;
pub mod search;

pub use error::{FetchFailure, MovieFinderError, Result};
pub use movie::{Movie, ResultPage};
pub use search::{PageNumber, QueryKey, SearchQuery};
