//! Page strip renderer.
//!
//! ```text
//! ←  1  …  4  5 [6] 7  8  …  20  →
//! ```

use crate::ui::helpers::{position_cursor, width};
use crate::ui::pagination::PageItem;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

enum Segment {
    Arrow(&'static str, bool),
    Page(u32, bool),
    Break,
    Note(&'static str),
}

impl Segment {
    fn text(&self) -> String {
        match self {
            Self::Arrow(arrow, _) => format!(" {arrow} "),
            Self::Page(page, _) => format!(" {page} "),
            Self::Break => " … ".to_string(),
            Self::Note(note) => format!("  {note}"),
        }
    }
}

/// Renders the page strip centred at `row`.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) {
    let mut segments = vec![Segment::Arrow("←", pagination.current > 1)];
    segments.extend(pagination.items.iter().map(|item| match item {
        PageItem::Page(page) => Segment::Page(*page, *page == pagination.current),
        PageItem::Break => Segment::Break,
    }));
    segments.push(Segment::Arrow("→", pagination.current < pagination.total));
    if pagination.is_loading {
        segments.push(Segment::Note("loading..."));
    }

    let strip_width: usize = segments.iter().map(|segment| width(&segment.text())).sum();
    let padding = cols.saturating_sub(strip_width) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));

    for segment in &segments {
        match segment {
            Segment::Page(_, true) => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.page_active_fg));
                print!("{}", Theme::bg(&theme.colors.page_active_bg));
            }
            Segment::Arrow(_, false) | Segment::Break => {
                print!("{}", Theme::fg(&theme.colors.border));
            }
            Segment::Note(_) => {
                print!("{}", Theme::italic());
                print!("{}", Theme::fg(&theme.colors.text_dim));
            }
            Segment::Arrow(_, true) | Segment::Page(_, false) => {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
        }
        print!("{}", segment.text());
        print!("{}", Theme::reset());
    }

    print!("{}", " ".repeat(cols.saturating_sub(padding + strip_width)));
}
