//! Decoding of TMDB search responses.

use crate::domain::{FetchFailure, Movie, ResultPage};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Movie>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: String,
}

/// Turns a host web response into a result page or the single failure kind.
///
/// Any status outside `200..300` fails. For TMDB error bodies the
/// `status_message` becomes the failure message; otherwise the raw body text is
/// used. A 2xx body that does not decode also fails.
///
/// # Errors
///
/// Returns [`FetchFailure`] for non-2xx statuses and malformed bodies.
///
/// # Examples
///
/// ```
/// use moviefinder::fetcher::decode_response;
///
/// let body = br#"{"page":1,"results":[{"id":603,"title":"The Matrix"}],"total_pages":1,"total_results":1}"#;
/// let page = decode_response(200, body).unwrap();
/// assert_eq!(page.items[0].title, "The Matrix");
///
/// assert!(decode_response(401, b"{}").is_err());
/// ```
pub fn decode_response(status: u16, body: &[u8]) -> Result<ResultPage, FetchFailure> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body).map_or_else(
            |_| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    "no response body".to_string()
                } else {
                    text
                }
            },
            |error| error.status_message,
        );
        tracing::debug!(status, message = %message, "search request failed");
        return Err(FetchFailure::new(status, message));
    }

    let response: SearchResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(status, error = %e, "malformed search response");
        FetchFailure::new(status, format!("malformed response: {e}"))
    })?;

    Ok(ResultPage {
        items: response.results,
        total_pages: response.total_pages,
        total_results: response.total_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_movie_records() {
        let body = br#"{
            "page": 2,
            "results": [
                {"id": 27205, "title": "Inception", "overview": "A thief...", "poster_path": "/p.jpg",
                 "backdrop_path": null, "release_date": "2010-07-15", "vote_average": 8.4, "adult": false},
                {"id": 1, "title": "Untitled"}
            ],
            "total_pages": 5,
            "total_results": 97
        }"#;
        let page = decode_response(200, body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_results, 97);
        assert_eq!(page.items[0].release_year(), "2010");
        assert!(page.items[1].poster_path.is_none());
    }

    #[test]
    fn record_without_title_does_not_fail_the_page() {
        let body = br#"{"results": [{"id": 7}, {"id": 8, "title": "Heat"}], "total_pages": 1, "total_results": 2}"#;
        let page = decode_response(200, body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "");
        assert_eq!(page.items[1].title, "Heat");
    }

    #[test]
    fn api_error_message_is_surfaced() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        let failure = decode_response(401, body).unwrap_err();
        assert_eq!(failure.status, 401);
        assert!(failure.message.starts_with("Invalid API key"));
    }

    #[test]
    fn transport_failures_keep_body_text() {
        let failure = decode_response(400, b"connection refused").unwrap_err();
        assert_eq!(failure.message, "connection refused");

        let failure = decode_response(503, b"").unwrap_err();
        assert_eq!(failure.message, "no response body");
    }

    #[test]
    fn malformed_success_body_fails() {
        let failure = decode_response(200, b"<html>").unwrap_err();
        assert_eq!(failure.status, 200);
        assert!(failure.message.starts_with("malformed response"));
    }
}
