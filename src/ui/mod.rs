//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`pagination`]: Page stepping and page strip layout
//! - [`helpers`]: Shared rendering utilities (highlighting, text fitting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod pagination;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use pagination::{PageItem, PageStep};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BodyState, DisplayItem, EmptyState, ErrorInfo, FooterInfo, HeaderInfo, ModalInfo,
    PaginationInfo, SearchBarInfo, UIViewModel,
};
