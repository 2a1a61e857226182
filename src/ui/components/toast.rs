//! Toast notifications, stacked at the top centre of the pane.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;

/// Toasts shown at once; newer ones wait for older ones to expire.
const MAX_VISIBLE: usize = 3;

pub fn render_toasts(toasts: &[String], theme: &Theme, cols: usize) {
    for (offset, message) in toasts.iter().take(MAX_VISIBLE).enumerate() {
        let text = truncate(&format!("  {message}  "), cols);
        let left = cols.saturating_sub(width(&text)) / 2 + 1;

        position_cursor(1 + offset, left);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.toast_fg));
        print!("{}", Theme::bg(&theme.colors.toast_bg));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}
