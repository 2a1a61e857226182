//! Movie domain model and result pages.
//!
//! [`Movie`] mirrors the fields the TMDB search endpoint returns for each
//! result. [`ResultPage`] is one page of results for a single query key and is
//! never mutated after it is decoded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base URL for poster and backdrop images.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// A single movie search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Creates a movie with only an id and title set.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
        }
    }

    /// Parses the release date. TMDB sends an empty string for unknown dates.
    #[must_use]
    pub fn released_on(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }

    /// Returns the release year as a display string, or `"----"` when unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviefinder::domain::Movie;
    ///
    /// let mut movie = Movie::new(27205, "Inception");
    /// assert_eq!(movie.release_year(), "----");
    /// movie.release_date = Some("2010-07-15".to_string());
    /// assert_eq!(movie.release_year(), "2010");
    /// ```
    #[must_use]
    pub fn release_year(&self) -> String {
        self.released_on()
            .map_or_else(|| "----".to_string(), |date| date.format("%Y").to_string())
    }

    /// Returns the release date in long form, e.g. `July 15, 2010`.
    #[must_use]
    pub fn release_date_long(&self) -> Option<String> {
        self.released_on()
            .map(|date| date.format("%B %-d, %Y").to_string())
    }

    /// Returns the rating as `7.4/10`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }

    /// Returns the full poster URL at the given TMDB size (e.g. `w500`).
    #[must_use]
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{IMAGE_BASE_URL}/{size}{path}"))
    }

    /// Returns the full backdrop URL, falling back to the poster.
    #[must_use]
    pub fn backdrop_url(&self, size: &str) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| format!("{IMAGE_BASE_URL}/{size}{path}"))
            .or_else(|| self.poster_url(size))
    }
}

/// One page of results for a (query, page) key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultPage {
    /// Movies in the order the API returned them.
    pub items: Vec<Movie>,

    /// Number of pages available for the query.
    pub total_pages: u32,

    /// Number of matching movies across all pages.
    pub total_results: u64,
}

impl ResultPage {
    /// Returns `true` if the page has no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_release_date_is_tolerated() {
        let mut movie = Movie::new(1, "Untitled");
        movie.release_date = Some(String::new());
        assert!(movie.released_on().is_none());
        assert!(movie.release_date_long().is_none());

        movie.release_date = Some("1999-03-31".to_string());
        assert_eq!(movie.release_date_long().as_deref(), Some("March 31, 1999"));
    }

    #[test]
    fn image_urls_prefer_backdrop() {
        let mut movie = Movie::new(603, "The Matrix");
        movie.poster_path = Some("/poster.jpg".to_string());
        assert_eq!(
            movie.backdrop_url("w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        movie.backdrop_path = Some("/backdrop.jpg".to_string());
        assert_eq!(
            movie.backdrop_url("original").as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg")
        );
    }

    #[test]
    fn rating_has_one_decimal() {
        let mut movie = Movie::new(1, "x");
        movie.vote_average = 8.369;
        assert_eq!(movie.rating_label(), "8.4/10");
    }
}
