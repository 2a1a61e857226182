//! MovieFinder: a Zellij plugin for searching The Movie Database.
//!
//! Type a title, browse paginated results, open a movie for its details.
//!
//! - Debounce-free search: a query is submitted on Enter and always starts at page 1
//! - Paginated results with a page strip and first/previous/next/last stepping
//! - Cached pages: revisiting a (query, page) pair renders instantly and revalidates
//! - Out-of-order responses are matched by request id and never overwrite newer state
//! - A detail modal and toast notifications (one per empty result)

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  keys, web_request, set_timeout, hide_self          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling / action dispatching              │
//! │  - Empty-result rule and toasts                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Fetcher       │
//! │ (ui/)         │   │ (query/)      │   │ (fetcher/)    │
//! │ - Components  │   │ - Cache       │   │ - URL/headers │
//! │ - Pagination  │   │ - Superseding │   │ - Decoding    │
//! │ - Theming     │   │ - Status      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - SearchQuery, PageNumber, QueryKey                │
//! │  - Movie, ResultPage, errors                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/moviefinder.wasm" {
//!         api_token "eyJhbGciOi..."
//!         language "en-US"
//!         include_adult "false"
//!         toast_duration_ms "2000"
//!         initial_query "blade runner"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use moviefinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "alien".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_render, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), moviefinder::MovieFinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetcher;
pub mod infrastructure;
pub mod query;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{FetchFailure, Movie, MovieFinderError, PageNumber, QueryKey, Result, ResultPage, SearchQuery};
pub use fetcher::{ApiConfig, FetchRequest};
pub use ui::Theme;

use fetcher::DEFAULT_API_BASE_URL;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default lifetime of a toast notification, in milliseconds.
const DEFAULT_TOAST_DURATION_MS: u64 = 2000;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB API read access token. Requests are sent without one when unset.
    pub api_token: Option<String>,

    /// TMDB API root. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// Result language. Default: `en-US`
    pub language: String,

    /// Whether adult titles are included. Default: `false`
    pub include_adult: bool,

    /// How long each toast stays on screen. Default: `2000`
    pub toast_duration_ms: u64,

    /// Query submitted as soon as web access is granted.
    pub initial_query: Option<String>,

    /// Built-in theme name.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level filter. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            language: "en-US".to_string(),
            include_adult: false,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            initial_query: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparsable values fall back to their defaults; blank strings count as
    /// unset.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use moviefinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_token".to_string(), "secret".to_string());
    /// map.insert("include_adult".to_string(), "true".to_string());
    /// map.insert("toast_duration_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_token.as_deref(), Some("secret"));
    /// assert!(config.include_adult);
    /// assert_eq!(config.toast_duration_ms, 2000);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            api_token: text("api_token"),
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            language: text("language").unwrap_or(defaults.language),
            include_adult: text("include_adult")
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.include_adult),
            toast_duration_ms: text("toast_duration_ms")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.toast_duration_ms),
            initial_query: text("initial_query"),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Connection settings handed to the fetcher.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_base_url.trim_end_matches('/').to_string(),
            token: self.api_token.clone(),
            language: self.language.clone(),
            include_adult: self.include_adult,
        }
    }

    /// Checks the settings a search cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`MovieFinderError::Config`] if no API token is set or the base
    /// URL is not an `http(s)` URL.
    pub fn validate(&self) -> Result<()> {
        if self.api_token.is_none() {
            return Err(MovieFinderError::Config("api_token is not set".to_string()));
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://")) {
            return Err(MovieFinderError::Config(format!(
                "api_base_url must start with http:// or https://, got {:?}",
                self.api_base_url
            )));
        }
        Ok(())
    }
}

/// Builds the initial `AppState` from configuration.
///
/// Theme resolution order is `theme_file`, then `theme`, then the default
/// (`catppuccin-mocha`). A theme that fails to load is logged and skipped.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing moviefinder plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme).with_toast_duration(Duration::from_millis(config.toast_duration_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let mut map = BTreeMap::new();
        map.insert("api_token".to_string(), "  ".to_string());
        map.insert("language".to_string(), String::new());
        map.insert("include_adult".to_string(), "yes".to_string());

        assert_eq!(Config::from_zellij(&map), Config::default());
    }

    #[test]
    fn validate_reports_missing_token_and_bad_url() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(MovieFinderError::Config(_))));

        config.api_token = Some("token".to_string());
        assert!(config.validate().is_ok());

        config.api_base_url = "api.themoviedb.org/3".to_string();
        assert!(matches!(config.validate(), Err(MovieFinderError::Config(_))));
    }

    #[test]
    fn api_config_strips_trailing_slash() {
        let config = Config {
            api_base_url: "http://localhost:8080/3/".to_string(),
            language: "fr-FR".to_string(),
            ..Config::default()
        };

        let api = config.api_config();
        assert_eq!(api.base_url, "http://localhost:8080/3");
        assert_eq!(api.language, "fr-FR");
        assert_eq!(api.token, None);
    }

    #[test]
    fn initialize_applies_toast_duration_and_falls_back_on_unknown_theme() {
        let config = Config {
            toast_duration_ms: 500,
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.toast_duration, Duration::from_millis(500));
        assert_eq!(state.input_mode, InputMode::Search);
    }
}
