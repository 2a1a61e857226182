//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` after
//! each event and the shim in `main.rs` executes them in order: issuing web
//! requests, scheduling toast expiry, or hiding the plugin.
//!
//! # Example
//!
//! ```
//! use moviefinder::app::Action;
//! use std::time::Duration;
//!
//! let action = Action::Notify {
//!     message: "No movies found for your request.".to_string(),
//!     duration: Duration::from_millis(2000),
//! };
//! assert!(matches!(action, Action::Notify { .. }));
//! ```

use crate::fetcher::FetchRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues a search request through the host.
    ///
    /// The request carries its key and id through the host context so the
    /// response can be matched when it comes back.
    Fetch(FetchRequest),

    /// Shows a toast notification.
    ///
    /// The shim schedules a host timer for `duration` and feeds
    /// `Event::ToastExpired` back when it fires.
    Notify {
        /// Text to display.
        message: String,
        /// How long the toast stays visible.
        duration: Duration,
    },
}
