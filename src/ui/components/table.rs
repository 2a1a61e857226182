//! Result table component renderer.
//!
//! One movie per row in three columns: TITLE (fills the width), YEAR and
//! RATING. The cursor row is drawn with selection colors; rows that belong to
//! the previous page while the next one loads are dimmed.

use crate::ui::helpers::{self, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const YEAR_WIDTH: usize = 6;
const RATING_WIDTH: usize = 8;
const MARGIN: usize = 2;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(YEAR_WIDTH + RATING_WIDTH + MARGIN * 2)
}

/// Renders the column headers at `row` and returns the next row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:margin$}{:<title$}{:<year$}{:>rating$}",
        "",
        "TITLE",
        "YEAR",
        "RATING",
        margin = MARGIN,
        title = title_width(cols),
        year = YEAR_WIDTH,
        rating = RATING_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], is_stale: bool, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, is_stale, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, is_stale: bool, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = || {
        if item.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if is_stale {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    };

    base();
    print!("{}", " ".repeat(MARGIN));
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected || is_stale);
    print!("{}", " ".repeat(title_width(cols).saturating_sub(width(&item.title))));
    print!("{:<w$}", item.year, w = YEAR_WIDTH);

    if !item.is_selected && !is_stale {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print!("{:>w$}", item.rating, w = RATING_WIDTH);
    base();
    print!("{}", " ".repeat(MARGIN));

    print!("{}", Theme::reset());
    row + 1
}
