//! Movie detail modal renderer.
//!
//! Drawn last, over the table, as a bordered box centred in the pane:
//!
//! ```text
//! ╭─ The Matrix ──────────────────────────╮
//! │ March 31, 1999 · 8.2/10               │
//! │                                       │
//! │ Set in the 22nd century, The Matrix   │
//! │ tells the story of a computer hacker… │
//! │                                       │
//! │ https://image.tmdb.org/t/p/original/… │
//! ╰───────────────────────────── esc ─────╯
//! ```

use crate::ui::helpers::{position_cursor, truncate, width, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const MAX_MODAL_WIDTH: usize = 72;
const HORIZONTAL_MARGIN: usize = 4;

/// Renders the modal centred in a `cols` x `rows` pane.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, cols: usize, rows: usize) {
    let box_width = cols.saturating_sub(HORIZONTAL_MARGIN * 2).min(MAX_MODAL_WIDTH);
    if box_width < 10 || rows < 6 {
        return;
    }
    let inner_width = box_width - 4;

    // Title, meta line and blank spacers are fixed; the overview takes the rest.
    let max_overview_lines = rows.saturating_sub(10).max(1);
    let mut overview = wrap_text(&modal.overview, inner_width);
    if overview.len() > max_overview_lines {
        overview.truncate(max_overview_lines);
        if let Some(last) = overview.last_mut() {
            *last = truncate(&format!("{last}..."), inner_width);
        }
    }

    let mut body: Vec<(String, &str)> = vec![
        (format!("{} · {}", modal.release_date, modal.rating), theme.colors.rating_fg.as_str()),
        (String::new(), theme.colors.text_normal.as_str()),
    ];
    body.extend(overview.into_iter().map(|line| (line, theme.colors.text_normal.as_str())));
    if let Some(url) = &modal.image_url {
        body.push((String::new(), theme.colors.text_normal.as_str()));
        body.push((truncate(url, inner_width), theme.colors.text_dim.as_str()));
    }

    let box_height = body.len() + 2;
    let top = rows.saturating_sub(box_height) / 2 + 1;
    let left = (cols - box_width) / 2 + 1;

    let title = truncate(&format!(" {} ", modal.title), box_width.saturating_sub(6));
    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.modal_border));
    print!("╭─");
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}{}", Theme::reset(), Theme::fg(&theme.colors.modal_border));
    print!("{}╮", "─".repeat(box_width.saturating_sub(3 + width(&title))));

    for (offset, (line, color)) in body.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{}", Theme::fg(&theme.colors.modal_border));
        print!("│ ");
        print!("{}", Theme::fg(color));
        print!("{line}");
        print!("{}", " ".repeat(inner_width.saturating_sub(width(line))));
        print!("{}", Theme::fg(&theme.colors.modal_border));
        print!(" │");
    }

    let hint = " esc ";
    position_cursor(top + box_height - 1, left);
    print!("{}", Theme::fg(&theme.colors.modal_border));
    print!("╰{}", "─".repeat(box_width.saturating_sub(3 + hint.len())));
    print!("{}{hint}{}", Theme::fg(&theme.colors.text_dim), Theme::fg(&theme.colors.modal_border));
    print!("─╯");
    print!("{}", Theme::reset());
}
