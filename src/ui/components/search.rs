//! Search bar component renderer.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PLACEHOLDER: &str = "Search for a movie...";

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: matrix█  │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// The border is highlighted and a block cursor is drawn while editing. An
/// empty, unfocused box shows a dimmed placeholder.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let (text, text_color) = if search.text.is_empty() && !search.is_editing {
        (PLACEHOLDER.to_string(), &theme.colors.text_dim)
    } else if search.is_editing {
        (format!("{}█", search.text), &theme.colors.text_normal)
    } else {
        (search.text.clone(), &theme.colors.text_normal)
    };
    let search_text = truncate(&format!(" Search: {text}"), inner_width);
    let padding = inner_width.saturating_sub(width(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(text_color));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
