//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with result count
//! - [`search`]: Search input box
//! - [`table`]: Result rows (TITLE, YEAR, RATING)
//! - [`loader`], [`error`], [`empty`]: Body states without rows
//! - [`pagination`]: Page strip
//! - [`footer`]: Keybinding hints
//! - [`modal`], [`toast`]: Overlays drawn last
//!
//! # Layout
//!
//! ```text
//! [blank line / toasts]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Table Headers | loader | error | empty state]
//! [Table Rows]
//! [Page strip]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod error;
mod footer;
mod header;
mod loader;
mod modal;
mod pagination;
mod search;
mod table;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyState, UIViewModel};

use empty::render_empty_state;
use error::render_error;
use footer::render_footer;
use header::render_header;
use loader::render_loader;
use modal::render_modal;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};
use toast::render_toasts;

/// Rows below the column headers where body messages start.
const MESSAGE_OFFSET: usize = 2;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout, then overlays the modal and toasts.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Row 1 is reserved for toasts

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    match &vm.body {
        BodyState::Idle(empty) | BodyState::NoResults(empty) => {
            render_empty_state(current_row + MESSAGE_OFFSET, empty, theme, cols);
        }
        BodyState::Loading => render_loader(current_row + MESSAGE_OFFSET, theme, cols),
        BodyState::Error(error) => render_error(current_row + MESSAGE_OFFSET, error, theme, cols),
        BodyState::Results { rows: items, is_stale, .. } => {
            current_row = render_table_headers(current_row, theme, cols);
            let _current_row = render_table_rows(current_row, items, *is_stale, theme, cols);
        }
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, cols, rows);
    }
    render_toasts(&vm.toasts, theme, cols);
}
