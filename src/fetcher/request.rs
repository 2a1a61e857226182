//! Outgoing search requests and their round-trip context.
//!
//! The host's `web_request` call is fire-and-forget: the response comes back
//! later as a separate event carrying the context map that was attached to the
//! request. [`FetchRequest::to_context`] and [`FetchRequest::from_context`]
//! carry the query key and request id through that round trip so responses can
//! be matched (or superseded) by the coordinator.

use crate::domain::{PageNumber, QueryKey, SearchQuery};
use std::collections::BTreeMap;

/// Context value identifying responses that belong to this plugin.
pub const CONTEXT_SOURCE: &str = "moviefinder";

/// Default TMDB API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Connection settings for the TMDB API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root without a trailing slash.
    pub base_url: String,

    /// Read access token sent as a bearer token.
    pub token: Option<String>,

    /// Result language, e.g. `en-US`.
    pub language: String,

    /// Whether adult titles are included in results.
    pub include_adult: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            language: "en-US".to_string(),
            include_adult: false,
        }
    }
}

/// One search request issued by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The (query, page) pair being fetched.
    pub key: QueryKey,

    /// Monotonic id distinguishing successive fetches of the same key.
    pub request_id: u64,
}

impl FetchRequest {
    /// Builds the search URL with the query percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviefinder::domain::{PageNumber, QueryKey, SearchQuery};
    /// use moviefinder::fetcher::{ApiConfig, FetchRequest};
    ///
    /// let key = QueryKey::new(SearchQuery::new("star wars"), PageNumber::FIRST).unwrap();
    /// let request = FetchRequest { key, request_id: 1 };
    /// assert_eq!(
    ///     request.url(&ApiConfig::default()),
    ///     "https://api.themoviedb.org/3/search/movie?query=star%20wars&include_adult=false&language=en-US&page=1"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, api: &ApiConfig) -> String {
        format!(
            "{}/search/movie?query={}&include_adult={}&language={}&page={}",
            api.base_url.trim_end_matches('/'),
            urlencoding::encode(self.key.query().as_str()),
            api.include_adult,
            urlencoding::encode(&api.language),
            self.key.page(),
        )
    }

    /// Builds request headers, including the bearer token when configured.
    #[must_use]
    pub fn headers(api: &ApiConfig) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());
        if let Some(token) = api.token.as_deref().filter(|t| !t.is_empty()) {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        headers
    }

    /// Encodes the key and request id into the host request context.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert("source".to_string(), CONTEXT_SOURCE.to_string());
        context.insert("query".to_string(), self.key.query().as_str().to_string());
        context.insert("page".to_string(), self.key.page().to_string());
        context.insert("request_id".to_string(), self.request_id.to_string());
        context
    }

    /// Recovers a request from a response context.
    ///
    /// Returns `None` for contexts that were not produced by [`Self::to_context`].
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get("source").map(String::as_str) != Some(CONTEXT_SOURCE) {
            return None;
        }

        let query = SearchQuery::new(context.get("query")?);
        let page = context
            .get("page")
            .and_then(|p| p.parse::<u32>().ok())
            .and_then(PageNumber::new)?;
        let request_id = context.get("request_id")?.parse::<u64>().ok()?;

        Some(Self {
            key: QueryKey::new(query, page)?,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str, page: u32, request_id: u64) -> FetchRequest {
        let key = QueryKey::new(SearchQuery::new(query), PageNumber::new(page).unwrap()).unwrap();
        FetchRequest { key, request_id }
    }

    #[test]
    fn url_encodes_reserved_characters() {
        let api = ApiConfig {
            base_url: "http://localhost:9000/3/".to_string(),
            include_adult: true,
            ..ApiConfig::default()
        };
        let url = request("fast & furious #9", 3, 7).url(&api);
        assert_eq!(
            url,
            "http://localhost:9000/3/search/movie?query=fast%20%26%20furious%20%239&include_adult=true&language=en-US&page=3"
        );
    }

    #[test]
    fn token_is_sent_as_bearer() {
        let api = ApiConfig {
            token: Some("abc123".to_string()),
            ..ApiConfig::default()
        };
        let headers = FetchRequest::headers(&api);
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc123"));

        let headers = FetchRequest::headers(&ApiConfig::default());
        assert!(!headers.contains_key("Authorization"));
    }

    #[test]
    fn context_survives_the_host() {
        let original = request("the thing", 4, 42);
        let restored = FetchRequest::from_context(&original.to_context());
        assert_eq!(restored, Some(original));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = request("alien", 1, 1).to_context();
        context.insert("source".to_string(), "other-plugin".to_string());
        assert!(FetchRequest::from_context(&context).is_none());

        let mut context = request("alien", 1, 1).to_context();
        context.insert("page".to_string(), "0".to_string());
        assert!(FetchRequest::from_context(&context).is_none());
    }
}
