//! Search identity types: the query text, the page number, and the key pair.
//!
//! A [`QueryKey`] identifies one fetchable result set. It can only be built from
//! a non-empty [`SearchQuery`], which keeps "no active search" out of the cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// User-entered search text, trimmed of surrounding whitespace.
///
/// The empty query is the distinguished "no active search" value.
///
/// # Examples
///
/// ```
/// use moviefinder::domain::SearchQuery;
///
/// let query = SearchQuery::new("  inception  ");
/// assert_eq!(query.as_str(), "inception");
/// assert!(SearchQuery::new("   ").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a query from raw input, trimming leading and trailing whitespace.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    /// Returns the trimmed query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the "no active search" value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 1-based result page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a page number, returning `None` for zero.
    #[must_use]
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    /// Returns the page as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Clamps the page into `1..=total_pages`.
    ///
    /// A `total_pages` of zero means there is nothing to clamp against and the
    /// page is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviefinder::domain::PageNumber;
    ///
    /// let page = PageNumber::new(7).unwrap();
    /// assert_eq!(page.clamp_to(5).get(), 5);
    /// assert_eq!(page.clamp_to(0).get(), 7);
    /// ```
    #[must_use]
    pub fn clamp_to(self, total_pages: u32) -> Self {
        match NonZeroU32::new(total_pages) {
            Some(last) if self.0 > last => Self(last),
            _ => self,
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The (query, page) pair identifying one fetchable result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    query: SearchQuery,
    page: PageNumber,
}

impl QueryKey {
    /// Builds a key, returning `None` when the query is empty.
    #[must_use]
    pub fn new(query: SearchQuery, page: PageNumber) -> Option<Self> {
        if query.is_empty() {
            None
        } else {
            Some(Self { query, page })
        }
    }

    /// Returns the query half of the key.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Returns the page half of the key.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Returns `true` if both keys search for the same text.
    #[must_use]
    pub fn same_query(&self, other: &Self) -> bool {
        self.query == other.query
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" p{}", self.query, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        assert_eq!(SearchQuery::new("\t the matrix \n").as_str(), "the matrix");
    }

    #[test]
    fn empty_query_has_no_key() {
        assert!(QueryKey::new(SearchQuery::new("  "), PageNumber::FIRST).is_none());
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(PageNumber::new(0).is_none());
        assert_eq!(PageNumber::default(), PageNumber::FIRST);
    }

    #[test]
    fn clamp_keeps_pages_in_range() {
        let three = PageNumber::new(3).unwrap();
        assert_eq!(three.clamp_to(10), three);
        assert_eq!(three.clamp_to(2).get(), 2);
    }

    #[test]
    fn keys_compare_queries() {
        let one = QueryKey::new(SearchQuery::new("matrix"), PageNumber::FIRST).unwrap();
        let two = QueryKey::new(SearchQuery::new("matrix"), PageNumber::new(2).unwrap()).unwrap();
        let other = QueryKey::new(SearchQuery::new("alien"), PageNumber::FIRST).unwrap();
        assert!(one.same_query(&two));
        assert!(!one.same_query(&other));
        assert_eq!(two.to_string(), "\"matrix\" p2");
    }
}
