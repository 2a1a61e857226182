//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain/query layers.
//!
//! # Architecture
//!
//! ```text
//! Key / WebRequestResult / Timer → Event → handle_event → AppState → Actions
//!                                                            ↓
//!                                       web_request / set_timeout / hide_self
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Input mode
//! - [`notify`]: Empty-result notification rule and toast queue
//! - [`state`]: Search state controller and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notify;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
