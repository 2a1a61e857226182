//! Shared rendering utilities.
//!
//! Cursor positioning, fuzzy match highlighting and character-aware text
//! fitting. Widths are counted in characters, not bytes, so titles in any
//! script never split inside a code point.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Returns the character count of `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max_width` characters, ending in `...` when cut.
///
/// # Example
///
/// ```
/// use moviefinder::ui::helpers::truncate;
///
/// assert_eq!(truncate("Amélie", 10), "Amélie");
/// assert_eq!(truncate("The Lord of the Rings", 10), "The Lor...");
/// ```
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if width(text) <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }

    let mut shortened: String = text.chars().take(max_width - 3).collect();
    shortened.push_str("...");
    shortened
}

/// Greedily wraps `text` into lines of at most `max_width` characters.
///
/// Words longer than a line are split.
///
/// # Example
///
/// ```
/// use moviefinder::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("a thief who steals secrets", 12), vec!["a thief who", "steals", "secrets"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max_width).collect());
        }

        let needed = if line.is_empty() { word.len() } else { width(&line) + 1 + word.len() };
        if needed > max_width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Prints `text` centred in `cols` columns, padding both sides.
pub fn print_centered(text: &str, cols: usize) {
    let text_len = width(text).min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    print!("{}", " ".repeat(padding));
    print!("{}", truncate(text, cols));
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with an exclusive end. When
/// `is_selected` is `true` the selection colors win and nothing is highlighted.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    print!("{remaining}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("Crouching Tiger 卧虎藏龙", 18), "Crouching Tiger...");
        assert_eq!(truncate("卧虎藏龙", 3), "卧虎藏");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap_text("supercalifragilistic fun", 8), vec!["supercal", "ifragili", "stic fun"]);
        assert!(wrap_text("   ", 10).is_empty());
        assert!(wrap_text("anything", 0).is_empty());
    }
}
