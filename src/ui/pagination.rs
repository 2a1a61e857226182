//! Pagination control: page stepping and the visible page-number strip.
//!
//! The strip shows up to [`PAGE_RANGE`] pages around the current one plus
//! [`MARGIN_PAGES`] pages pinned at each end, with a break marker standing in
//! for every gap:
//!
//! ```text
//! ← 1 … 4 5 [6] 7 8 … 20 →
//! ```

use crate::domain::PageNumber;

/// Pages shown around the current page.
pub const PAGE_RANGE: u32 = 5;

/// Pages pinned at each end of the strip.
pub const MARGIN_PAGES: u32 = 1;

/// One slot in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A selectable page number.
    Page(u32),
    /// A gap between page numbers.
    Break,
}

/// A step requested through the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    First,
    Previous,
    Next,
    Last,
}

impl PageStep {
    /// Returns the page this step lands on, clamped to `1..=total_pages`.
    ///
    /// Returns `None` when there are no pages or the step would not change the
    /// page.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviefinder::domain::PageNumber;
    /// use moviefinder::ui::pagination::PageStep;
    ///
    /// let third = PageNumber::new(3).unwrap();
    /// assert_eq!(PageStep::Next.target(third, 5), PageNumber::new(4));
    /// assert_eq!(PageStep::Last.target(third, 5), PageNumber::new(5));
    /// assert_eq!(PageStep::Next.target(PageNumber::new(5).unwrap(), 5), None);
    /// ```
    #[must_use]
    pub fn target(self, current: PageNumber, total_pages: u32) -> Option<PageNumber> {
        if total_pages == 0 {
            return None;
        }

        let current = current.get();
        let target = match self {
            Self::First => 1,
            Self::Previous => current.saturating_sub(1),
            Self::Next => current.saturating_add(1),
            Self::Last => total_pages,
        }
        .clamp(1, total_pages);

        if target == current {
            None
        } else {
            PageNumber::new(target)
        }
    }
}

/// Lays out the page strip for `current` out of `total_pages`.
///
/// The window around the current page is [`PAGE_RANGE`] wide and shifts
/// toward whichever end it would otherwise run past. Consecutive hidden pages
/// collapse into a single [`PageItem::Break`].
#[must_use]
pub fn page_items(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= PAGE_RANGE {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    // Half-page offsets are kept exact by working in doubled units.
    let range = i64::from(PAGE_RANGE);
    let total = i64::from(total_pages);
    let selected = i64::from(current.clamp(1, total_pages)) - 1;

    let (left, right) = if 2 * selected > 2 * total - range {
        let right = 2 * (total - selected);
        (2 * range - right, right)
    } else if 2 * selected < range {
        let left = 2 * selected;
        (left, 2 * range - left)
    } else {
        (range, range)
    };
    let right = if selected == 0 { right - 2 } else { right };

    let mut items = Vec::new();
    for index in 0..total {
        let page = index + 1;
        let pinned = page <= i64::from(MARGIN_PAGES) || page > total - i64::from(MARGIN_PAGES);
        let in_window = 2 * index >= 2 * selected - left && 2 * index <= 2 * selected + right;

        if pinned || in_window {
            items.push(PageItem::Page(u32::try_from(page).unwrap_or(u32::MAX)));
        } else if items.last().is_some_and(|item| *item != PageItem::Break) {
            items.push(PageItem::Break);
        }
    }
    items
}
