//! Input mode state for the application.
//!
//! The plugin is either navigating results ([`InputMode::Normal`]) or editing the
//! search box ([`InputMode::Search`]). The mode decides how the shim interprets
//! key presses and which hints the footer shows. While a movie is selected the
//! detail modal captures input regardless of mode.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Result navigation and pagination.
    ///
    /// Available keybindings: j/k (move), h/l or [/] (page), g/G (first/last page),
    /// enter (details), / (edit search), r (retry), q (quit).
    Normal,

    /// The search box has focus.
    ///
    /// Printable keys edit the draft; enter submits it, esc discards it.
    #[default]
    Search,
}

impl InputMode {
    /// Returns `true` while the search box has focus.
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Search)
    }
}
