//! Application state management and view model computation.
//!
//! [`AppState`] is the search state controller. It owns the submitted query,
//! the page number, the selected movie and the transient UI state (search box
//! draft, grid cursor, toasts), plus the [`QueryCache`] that decides what is
//! fetched and what is displayed.
//!
//! # Transition rules
//!
//! - Submitting a query trims it, resets the page to 1, clears the selection
//!   and activates the new key. Resubmitting the same text fetches again.
//! - Selecting a page keeps the query and activates the new key; the previous
//!   page stays visible until the new one resolves.
//! - Selecting and closing a movie change nothing but the selection. The modal
//!   is visible exactly when a movie is selected.
//!
//! Operations that need a fetch return the [`FetchRequest`] to issue; the
//! event handler turns it into an [`Action::Fetch`](super::Action::Fetch).
//!
//! # Example
//!
//! ```
//! use moviefinder::app::AppState;
//! use moviefinder::query::FetchStatus;
//! use moviefinder::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let request = state.submit_query("  inception  ").unwrap();
//! assert_eq!(state.query.as_str(), "inception");
//! assert_eq!(request.key.page().get(), 1);
//! assert_eq!(state.status(), FetchStatus::Loading);
//! ```

use super::modes::InputMode;
use super::notify::{EmptyResultRule, ToastQueue};
use crate::domain::{FetchFailure, Movie, MovieFinderError, PageNumber, QueryKey, ResultPage, SearchQuery};
use crate::fetcher::FetchRequest;
use crate::query::{FetchStatus, QueryCache, Resolution};
use crate::ui::helpers::truncate;
use crate::ui::pagination::{page_items, PageStep};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyState, DisplayItem, EmptyState, ErrorInfo, FooterInfo, HeaderInfo, ModalInfo,
    PaginationInfo, SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Default lifetime of a toast notification.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Rows taken by everything except table rows: blank line, header, two
/// borders, search box (3), column headers, page strip and footer.
const CHROME_ROWS: usize = 10;

const YEAR_COLUMN_WIDTH: usize = 6;
const RATING_COLUMN_WIDTH: usize = 8;
const ROW_MARGIN: usize = 2;

/// What a completed fetch changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Whether the display changed.
    pub changed_view: bool,

    /// Set when an empty result should be announced.
    pub notify_empty: bool,

    /// Follow-up fetch, issued when the requested page no longer exists.
    pub follow_up: Option<FetchRequest>,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Submitted search text; empty means no active search.
    pub query: SearchQuery,

    /// Requested page of the current query.
    pub page: PageNumber,

    /// Page count of the last successful page of the current query.
    ///
    /// Survives a failed page so the user can still page away from it.
    pub known_pages: u32,

    /// Movie shown in the detail modal.
    pub selection: Option<Movie>,

    /// Zero-based grid cursor within the displayed page.
    pub cursor: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Search box contents while editing.
    pub draft: String,

    /// Fetch cache and request coordinator.
    pub cache: QueryCache,

    /// Edge-triggered "no results" notifier.
    pub empty_rule: EmptyResultRule,

    /// Toasts currently on screen.
    pub toasts: ToastQueue,

    /// How long each toast stays visible.
    pub toast_duration: Duration,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an idle state with the search box focused.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            query: SearchQuery::default(),
            page: PageNumber::FIRST,
            known_pages: 0,
            selection: None,
            cursor: 0,
            input_mode: InputMode::Search,
            draft: String::new(),
            cache: QueryCache::new(),
            empty_rule: EmptyResultRule::new(),
            toasts: ToastQueue::default(),
            toast_duration: DEFAULT_TOAST_DURATION,
            theme,
        }
    }

    /// Sets how long toasts stay visible.
    #[must_use]
    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    /// Returns the (query, page) key of the current search, if any.
    #[must_use]
    pub fn active_key(&self) -> Option<QueryKey> {
        QueryKey::new(self.query.clone(), self.page)
    }

    /// Returns the status of the active key.
    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.cache.status()
    }

    /// Returns the page currently displayed, which may be the previous page of
    /// the same query while the requested one loads.
    #[must_use]
    pub fn results(&self) -> Option<&ResultPage> {
        self.cache.current_page()
    }

    /// Returns the number of pages known for the current query.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.results().map_or(self.known_pages, |page| page.total_pages)
    }

    /// Returns `true` while the detail modal is shown.
    #[must_use]
    pub const fn modal_visible(&self) -> bool {
        self.selection.is_some()
    }

    /// Submits search text and starts a fresh search at page 1.
    ///
    /// Whitespace-only text clears the search: nothing is fetched and the
    /// cache goes idle.
    pub fn submit_query(&mut self, text: &str) -> Option<FetchRequest> {
        let _span = tracing::debug_span!("submit_query", raw_len = text.len()).entered();

        self.query = SearchQuery::new(text);
        self.page = PageNumber::FIRST;
        self.known_pages = 0;
        self.selection = None;
        self.cursor = 0;

        tracing::debug!(query = %self.query, "query submitted");
        self.cache.activate(self.active_key())
    }

    /// Moves to another page of the current query.
    pub fn select_page(&mut self, page: PageNumber) -> Option<FetchRequest> {
        tracing::debug!(from = %self.page, to = %page, "page selected");

        self.page = page;
        self.cursor = 0;
        self.cache.activate(self.active_key())
    }

    /// Applies a pagination step. Returns `None` if the page does not change.
    pub fn step_page(&mut self, step: PageStep) -> Option<Option<FetchRequest>> {
        let target = step.target(self.page, self.total_pages())?;
        Some(self.select_page(target))
    }

    /// Opens the detail modal for `movie`.
    pub fn select_movie(&mut self, movie: Movie) {
        tracing::debug!(movie_id = movie.id, title = %movie.title, "movie selected");
        self.selection = Some(movie);
    }

    /// Closes the detail modal.
    pub fn close_selection(&mut self) {
        self.selection = None;
    }

    /// Returns the movie under the grid cursor.
    #[must_use]
    pub fn highlighted_movie(&self) -> Option<&Movie> {
        self.results().and_then(|page| page.items.get(self.cursor))
    }

    /// Selects the movie under the grid cursor. Returns `false` if there is none.
    pub fn open_highlighted(&mut self) -> bool {
        match self.highlighted_movie().cloned() {
            Some(movie) => {
                self.select_movie(movie);
                true
            }
            None => false,
        }
    }

    /// Focuses the search box, seeding the draft with the current query.
    pub fn begin_editing(&mut self) {
        self.input_mode = InputMode::Search;
        self.draft = self.query.as_str().to_string();
    }

    /// Appends a character to the draft.
    pub fn edit(&mut self, c: char) {
        self.draft.push(c);
        tracing::trace!(draft = %self.draft, "draft updated");
    }

    /// Removes the last character of the draft.
    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    /// Leaves the search box without submitting.
    pub fn cancel_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.draft.clear();
    }

    /// Submits the draft and returns focus to the results.
    pub fn submit_draft(&mut self) -> Option<FetchRequest> {
        self.input_mode = InputMode::Normal;
        let text = std::mem::take(&mut self.draft);
        self.submit_query(&text)
    }

    /// Refetches the active key, unless a fetch for it is already in flight.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let key = self.active_key()?;
        tracing::debug!(key = %key, "retry requested");
        self.cache.invalidate(&key)
    }

    /// Moves the grid cursor down by one row, wrapping to the top.
    pub fn cursor_down(&mut self) {
        let len = self.results().map_or(0, |page| page.items.len());
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the grid cursor up by one row, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        let len = self.results().map_or(0, |page| page.items.len());
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Feeds a fetch result to the cache and applies its consequences.
    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        outcome: Result<ResultPage, FetchFailure>,
    ) -> FetchOutcome {
        let resolution = self.cache.resolve(request, outcome);
        tracing::debug!(key = %request.key, request_id = request.request_id, resolution = ?resolution, "fetch completed");

        let mut result = FetchOutcome {
            changed_view: matches!(resolution, Resolution::Applied(_)),
            notify_empty: false,
            follow_up: None,
        };

        match resolution {
            Resolution::Applied(FetchStatus::Success) => {
                let Some(page) = self.cache.current_page() else {
                    return result;
                };

                let total_pages = page.total_pages;
                self.known_pages = total_pages;
                if total_pages > 0 && self.page.get() > total_pages {
                    tracing::debug!(page = %self.page, total_pages, "requested page out of range");
                    result.follow_up = self.select_page(self.page.clamp_to(total_pages));
                    return result;
                }

                self.cursor = self.cursor.min(page.items.len().saturating_sub(1));
                result.notify_empty = self.empty_rule.on_success(request, page);
            }
            Resolution::Applied(_) => self.cursor = 0,
            Resolution::Superseded | Resolution::Discarded => {}
        }

        result
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// The table window keeps the cursor roughly centred, like a scrolling list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            body: self.compute_body(rows, cols),
            pagination: self.compute_pagination(),
            modal: self.compute_modal(),
            toasts: self.toasts.iter().map(|toast| toast.message.clone()).collect(),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> BodyState {
        let status = self.status();

        if status == FetchStatus::Error {
            let detail = self
                .cache
                .error()
                .map_or_else(String::new, |failure| MovieFinderError::from(failure.clone()).to_string());
            return BodyState::Error(ErrorInfo {
                message: "Something went wrong. Press r to retry.".to_string(),
                detail,
            });
        }

        let Some(page) = self.results() else {
            return match status {
                FetchStatus::Idle => BodyState::Idle(EmptyState {
                    message: "Search for a movie".to_string(),
                    subtitle: "Type a title and press Enter".to_string(),
                }),
                _ => BodyState::Loading,
            };
        };

        if page.is_empty() {
            return BodyState::NoResults(EmptyState {
                message: "No movies found".to_string(),
                subtitle: format!("Nothing matches \"{}\". Press / to search again.", self.query),
            });
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let cursor = self.cursor.min(page.items.len() - 1);

        let mut visible_start = cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(page.items.len());
        if visible_end - visible_start < available_rows && page.items.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = SkimMatcherV2::default();
        let title_width =
            cols.saturating_sub(YEAR_COLUMN_WIDTH + RATING_COLUMN_WIDTH + ROW_MARGIN * 2);

        let rows = page.items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, movie)| {
                let is_selected = visible_start + relative_idx == cursor;
                self.compute_display_item(movie, is_selected, title_width, &matcher)
            })
            .collect();

        BodyState::Results {
            rows,
            selected_index: cursor - visible_start,
            is_stale: status.is_loading(),
        }
    }

    fn compute_display_item(
        &self,
        movie: &Movie,
        is_selected: bool,
        title_width: usize,
        matcher: &SkimMatcherV2,
    ) -> DisplayItem {
        let title = truncate(&movie.title, title_width);
        let visible_chars = title.chars().count();

        let highlight_ranges = self
            .compute_highlight_ranges(&movie.title, matcher)
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect();

        DisplayItem {
            title,
            year: movie.release_year(),
            rating: movie.rating_label(),
            is_selected,
            highlight_ranges,
        }
    }

    /// Computes character index ranges of `text` matched by the query.
    ///
    /// Consecutive match indices are coalesced into `(start, end)` ranges with
    /// an exclusive end.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        if self.query.is_empty() {
            return vec![];
        }

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.query.as_str()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.results() {
            Some(page) if !self.query.is_empty() => {
                format!(" MovieFinder ({} results) ", page.total_results)
            }
            _ => " MovieFinder ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let is_editing = self.input_mode.is_editing();
        let text = if is_editing {
            self.draft.clone()
        } else {
            self.query.as_str().to_string()
        };
        SearchBarInfo { text, is_editing }
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        let total = self.total_pages();
        if total == 0 || self.status() == FetchStatus::Error {
            return None;
        }

        let current = self.page.get();
        Some(PaginationInfo {
            items: page_items(current, total),
            current,
            total,
            is_loading: self.status().is_loading(),
        })
    }

    fn compute_modal(&self) -> Option<ModalInfo> {
        let movie = self.selection.as_ref()?;

        let overview = if movie.overview.trim().is_empty() {
            "No overview available.".to_string()
        } else {
            movie.overview.clone()
        };

        Some(ModalInfo {
            title: movie.title.clone(),
            release_date: movie
                .release_date_long()
                .unwrap_or_else(|| "Release date unknown".to_string()),
            rating: movie.rating_label(),
            overview,
            image_url: movie.backdrop_url("original"),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.modal_visible() {
            "ESC/Enter/q: close details"
        } else if self.input_mode.is_editing() {
            "Enter: search  ESC: cancel  Type to edit query"
        } else {
            "j/k: move  Enter: details  h/l: page  g/G: first/last  /: search  r: retry  q: quit"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies(count: usize) -> Vec<Movie> {
        (0..count)
            .map(|i| Movie::new(i as u64 + 1, format!("Movie {i}")))
            .collect()
    }

    fn page_of(count: usize, total_pages: u32) -> ResultPage {
        ResultPage {
            items: movies(count),
            total_pages,
            total_results: count as u64 * u64::from(total_pages),
        }
    }

    fn loaded(query: &str, count: usize, total_pages: u32) -> AppState {
        let mut state = AppState::new(Theme::default());
        let request = state.submit_query(query).unwrap();
        state.complete_fetch(&request, Ok(page_of(count, total_pages)));
        state
    }

    #[test]
    fn submit_resets_page_and_selection() {
        let mut state = loaded("matrix", 20, 10);
        let request = state.select_page(PageNumber::new(4).unwrap()).unwrap();
        state.complete_fetch(&request, Ok(page_of(20, 10)));
        state.select_movie(Movie::new(1, "The Matrix"));
        state.cursor = 7;

        state.submit_query("matrix reloaded").unwrap();
        assert_eq!(state.page, PageNumber::FIRST);
        assert!(state.selection.is_none());
        assert!(!state.modal_visible());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn blank_submission_goes_idle() {
        let mut state = loaded("matrix", 3, 1);
        assert!(state.submit_query("   ").is_none());
        assert_eq!(state.status(), FetchStatus::Idle);
        assert!(state.results().is_none());
        assert!(matches!(state.compute_viewmodel(24, 80).body, BodyState::Idle(_)));
    }

    #[test]
    fn page_steps_are_clamped() {
        let mut state = loaded("matrix", 20, 3);
        assert!(state.step_page(PageStep::Previous).is_none());

        let request = state.step_page(PageStep::Last).flatten().unwrap();
        assert_eq!(request.key.page().get(), 3);
        state.complete_fetch(&request, Ok(page_of(20, 3)));
        assert!(state.step_page(PageStep::Next).is_none());
    }

    #[test]
    fn cursor_wraps_and_opens_movie() {
        let mut state = loaded("matrix", 3, 1);
        state.cursor_up();
        assert_eq!(state.cursor, 2);
        state.cursor_down();
        assert_eq!(state.cursor, 0);

        assert!(state.open_highlighted());
        assert_eq!(state.selection.as_ref().map(|m| m.id), Some(1));
        state.close_selection();
        assert!(!state.modal_visible());
    }

    #[test]
    fn shrinking_result_set_clamps_page() {
        let mut state = loaded("matrix", 20, 10);
        let request = state.select_page(PageNumber::new(8).unwrap()).unwrap();

        let outcome = state.complete_fetch(&request, Ok(page_of(0, 5)));
        assert!(!outcome.notify_empty);
        let follow_up = outcome.follow_up.unwrap();
        assert_eq!(state.page.get(), 5);
        assert_eq!(follow_up.key.page().get(), 5);
    }

    #[test]
    fn draft_editing_round_trip() {
        let mut state = loaded("alien", 3, 1);
        state.begin_editing();
        assert_eq!(state.draft, "alien");
        state.edit('s');
        let request = state.submit_draft().unwrap();
        assert_eq!(request.key.query().as_str(), "aliens");
        assert_eq!(state.input_mode, InputMode::Normal);

        state.begin_editing();
        state.backspace();
        state.cancel_editing();
        assert_eq!(state.query.as_str(), "aliens");
    }

    #[test]
    fn viewmodel_windows_around_cursor() {
        let mut state = loaded("movie", 40, 2);
        state.cursor = 30;

        let vm = state.compute_viewmodel(20, 80);
        let BodyState::Results { rows, selected_index, is_stale } = vm.body else {
            panic!("expected results");
        };
        assert_eq!(rows.len(), 10);
        assert!(rows[selected_index].is_selected);
        assert_eq!(rows[selected_index].title, "Movie 30");
        assert!(!is_stale);
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let state = loaded("matrix", 1, 1);
        let ranges = state.compute_highlight_ranges("The Matrix", &SkimMatcherV2::default());
        assert_eq!(ranges, vec![(4, 10)]);
    }

    #[test]
    fn error_hides_results_and_pagination() {
        let mut state = loaded("matrix", 20, 10);
        let request = state.select_page(PageNumber::new(2).unwrap()).unwrap();
        state.complete_fetch(&request, Err(FetchFailure::new(500, "Internal error")));

        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.pagination.is_none());
        let BodyState::Error(info) = vm.body else {
            panic!("expected error body");
        };
        assert_eq!(info.detail, "Fetch error: request failed with status 500: Internal error");
    }

    #[test]
    fn failed_page_can_still_be_paged_away_from() {
        let mut state = loaded("matrix", 20, 10);
        let request = state.step_page(PageStep::Next).flatten().unwrap();
        state.complete_fetch(&request, Err(FetchFailure::new(500, "Internal error")));
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.total_pages(), 10);

        let back = state.step_page(PageStep::Previous).flatten().unwrap();
        assert_eq!(back.key.page(), PageNumber::FIRST);

        state.submit_query("heat");
        assert_eq!(state.known_pages, 0);
    }
}
