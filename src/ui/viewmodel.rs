//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel()` and
//! consumed by the renderer. They carry display-ready strings and flags only;
//! every decision about what to show has already been made.
//!
//! # Example
//!
//! ```
//! use moviefinder::ui::viewmodel::{BodyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " MovieFinder ".to_string() },
//!     search_bar: SearchBarInfo { text: String::new(), is_editing: true },
//!     body: BodyState::Loading,
//!     pagination: None,
//!     modal: None,
//!     toasts: vec![],
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.modal.is_none());
//! ```

use super::pagination::PageItem;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, result count).
    pub header: HeaderInfo,

    /// Search box contents.
    pub search_bar: SearchBarInfo,

    /// What the area below the search box shows.
    pub body: BodyState,

    /// Page strip, present once a result page is displayed.
    pub pagination: Option<PaginationInfo>,

    /// Detail modal, present while a movie is selected.
    pub modal: Option<ModalInfo>,

    /// Toast messages, oldest first.
    pub toasts: Vec<String>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Content of the result area.
#[derive(Debug, Clone)]
pub enum BodyState {
    /// No search has been submitted.
    Idle(EmptyState),

    /// The first page of a query is loading and nothing can be shown yet.
    Loading,

    /// The active fetch failed.
    Error(ErrorInfo),

    /// The search succeeded with no results.
    NoResults(EmptyState),

    /// A page of results.
    Results {
        /// Visible rows of the table.
        rows: Vec<DisplayItem>,
        /// Index of the highlighted row within `rows`.
        selected_index: usize,
        /// `true` while the rows belong to the previous page of a loading key.
        is_stale: bool,
    },
}

/// Display information for a single movie row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Title, truncated to the column width.
    pub title: String,

    /// Release year or `----`.
    pub year: String,

    /// Rating label, e.g. `7.4/10`.
    pub rating: String,

    /// Whether the grid cursor is on this row.
    pub is_selected: bool,

    /// Character ranges of the title matching the query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Failed fetch display information.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Headline, e.g. `Something went wrong`.
    pub message: String,

    /// Failure detail from the fetcher.
    pub detail: String,
}

/// Search box display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Draft text while editing, otherwise the submitted query.
    pub text: String,

    /// Whether the search box has focus.
    pub is_editing: bool,
}

/// Page strip display information.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    /// Page numbers and breaks, left to right.
    pub items: Vec<PageItem>,

    /// Requested page.
    pub current: u32,

    /// Pages available for the query.
    pub total: u32,

    /// Whether the requested page is still loading.
    pub is_loading: bool,
}

/// Detail modal display information.
#[derive(Debug, Clone)]
pub struct ModalInfo {
    pub title: String,
    pub release_date: String,
    pub rating: String,
    pub overview: String,
    pub image_url: Option<String>,
}
