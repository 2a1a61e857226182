//! Error message component renderer.

use crate::ui::helpers::{position_cursor, print_centered, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ErrorInfo;

/// Longest detail shown; API messages can be whole paragraphs.
const MAX_DETAIL_LINES: usize = 3;

/// Renders the failure headline and its wrapped detail starting at `row`.
pub fn render_error(row: usize, error: &ErrorInfo, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print_centered(&error.message, cols);
    print!("{}", Theme::reset());

    let detail_width = cols.saturating_sub(8);
    for (offset, line) in wrap_text(&error.detail, detail_width)
        .iter()
        .take(MAX_DETAIL_LINES)
        .enumerate()
    {
        position_cursor(row + 1 + offset, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print_centered(line, cols);
        print!("{}", Theme::reset());
    }
}
