//! Fetch status for the active query key.

/// Lifecycle of the active (query, page) key.
///
/// ```text
/// Idle ──activate──► Loading ──resolve──► Success | Error
///                       ▲                      │
///                       └── re-select/invalidate
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No active search.
    #[default]
    Idle,
    /// A fetch for the active key is in flight.
    Loading,
    /// The active key resolved with a page.
    Success,
    /// The active key failed; nothing is displayed.
    Error,
}

impl FetchStatus {
    /// Returns `true` for [`FetchStatus::Loading`].
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}
