//! Loading indicator.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;

pub fn render_loader(row: usize, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::italic());
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered("Loading movies...", cols);
    print!("{}", Theme::reset());
}
