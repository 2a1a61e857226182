//! Result fetcher for the TMDB search endpoint.
//!
//! The fetcher is split at the host boundary: [`request`] builds what the plugin
//! shim hands to Zellij's `web_request`, and [`response`] decodes what comes back
//! in the `WebRequestResult` event. No network I/O happens in this module, which
//! keeps the whole search core testable without a Zellij host.
//!
//! # Architecture
//!
//! ```text
//! QueryCache ──FetchRequest──► main.rs ──web_request──► TMDB
//!     ▲                                                   │
//!     └── decode_response ◄── WebRequestResult(context) ◄─┘
//! ```

pub mod request;
pub mod response;

pub use request::{ApiConfig, FetchRequest, CONTEXT_SOURCE, DEFAULT_API_BASE_URL};
pub use response::decode_response;
