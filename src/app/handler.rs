//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which the plugin shim
//! drives the application: key presses already mapped to [`Event`]s, fetch
//! completions decoded from host web responses, and toast timer expiry.
//!
//! # Event Types
//!
//! - **Search box**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `CancelSearch`
//! - **Results**: `KeyDown`, `KeyUp`, `OpenSelected`, `Retry`
//! - **Pagination**: `FirstPage`, `PrevPage`, `NextPage`, `LastPage`, `GoToPage`
//! - **Modal**: `CloseModal`
//! - **System**: `FetchCompleted`, `ToastExpired`, `CloseFocus`
//!
//! # Example
//!
//! ```
//! use moviefinder::app::{handle_event, Action, AppState, Event};
//! use moviefinder::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! handle_event(&mut state, &Event::Char('d'))?;
//! let (render, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), moviefinder::MovieFinderError>(())
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{FetchFailure, PageNumber, ResultPage};
use crate::fetcher::FetchRequest;
use crate::ui::pagination::PageStep;

use super::notify::EMPTY_RESULT_MESSAGE;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Focuses the search box with the current query as draft.
    SearchMode,
    /// Appends a character to the draft.
    Char(char),
    /// Removes the last character of the draft.
    Backspace,
    /// Submits the draft as the new query.
    SubmitSearch,
    /// Leaves the search box without submitting.
    CancelSearch,

    /// Moves the grid cursor down (wraps to top).
    KeyDown,
    /// Moves the grid cursor up (wraps to bottom).
    KeyUp,
    /// Opens the detail modal for the highlighted movie.
    OpenSelected,
    /// Closes the detail modal.
    CloseModal,

    /// Jumps to the first page.
    FirstPage,
    /// Steps back one page.
    PrevPage,
    /// Steps forward one page.
    NextPage,
    /// Jumps to the last page.
    LastPage,
    /// Selects a page directly, clamped to the pages available.
    GoToPage(PageNumber),

    /// Refetches the active key.
    Retry,
    /// Hides the plugin UI.
    CloseFocus,

    /// A search request came back from the host.
    FetchCompleted {
        /// The request recovered from the response context.
        request: FetchRequest,
        /// Decoded page or failure.
        outcome: std::result::Result<ResultPage, FetchFailure>,
    },

    /// The oldest toast timed out.
    ToastExpired,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Currently every event is handled infallibly; the `Result` lets the shim
/// treat all handler failures in one place.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    let passes_modal = matches!(
        event,
        Event::CloseModal | Event::FetchCompleted { .. } | Event::ToastExpired | Event::CloseFocus
    );
    if state.modal_visible() && !passes_modal {
        tracing::debug!("modal open, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::SearchMode => {
            state.begin_editing();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_editing() {
                return Ok((false, vec![]));
            }
            state.edit(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_editing() {
                return Ok((false, vec![]));
            }
            state.backspace();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => Ok((true, fetch(state.submit_draft()))),
        Event::CancelSearch => {
            state.cancel_editing();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.cursor_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => Ok((state.open_highlighted(), vec![])),
        Event::CloseModal => {
            let was_open = state.modal_visible();
            state.close_selection();
            Ok((was_open, vec![]))
        }
        Event::FirstPage => Ok(step(state, PageStep::First)),
        Event::PrevPage => Ok(step(state, PageStep::Previous)),
        Event::NextPage => Ok(step(state, PageStep::Next)),
        Event::LastPage => Ok(step(state, PageStep::Last)),
        Event::GoToPage(page) => {
            let total_pages = state.total_pages();
            let target = page.clamp_to(total_pages);
            if total_pages == 0 || target == state.page {
                return Ok((false, vec![]));
            }
            Ok((true, fetch(state.select_page(target))))
        }
        Event::Retry => {
            let actions = fetch(state.retry());
            Ok((!actions.is_empty(), actions))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::FetchCompleted { request, outcome } => {
            let result = state.complete_fetch(request, outcome.clone());

            let mut actions = fetch(result.follow_up);
            if result.notify_empty {
                state.toasts.push(EMPTY_RESULT_MESSAGE);
                actions.push(Action::Notify {
                    message: EMPTY_RESULT_MESSAGE.to_string(),
                    duration: state.toast_duration,
                });
            }

            Ok((result.changed_view || !actions.is_empty(), actions))
        }
        Event::ToastExpired => Ok((state.toasts.expire_oldest().is_some(), vec![])),
    }
}

fn fetch(request: Option<FetchRequest>) -> Vec<Action> {
    request.map(Action::Fetch).into_iter().collect()
}

fn step(state: &mut AppState, step: PageStep) -> (bool, Vec<Action>) {
    match state.step_page(step) {
        Some(request) => (true, fetch(request)),
        None => {
            tracing::debug!(step = ?step, page = %state.page, "page step is a no-op");
            (false, vec![])
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::SearchMode => "SearchMode",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitSearch => "SubmitSearch",
        Event::CancelSearch => "CancelSearch",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::OpenSelected => "OpenSelected",
        Event::CloseModal => "CloseModal",
        Event::FirstPage => "FirstPage",
        Event::PrevPage => "PrevPage",
        Event::NextPage => "NextPage",
        Event::LastPage => "LastPage",
        Event::GoToPage(_) => "GoToPage",
        Event::Retry => "Retry",
        Event::CloseFocus => "CloseFocus",
        Event::FetchCompleted { .. } => "FetchCompleted",
        Event::ToastExpired => "ToastExpired",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;
    use crate::ui::Theme;

    fn submit(state: &mut AppState, text: &str) -> FetchRequest {
        handle_event(state, &Event::SearchMode).unwrap();
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
        let (_, actions) = handle_event(state, &Event::SubmitSearch).unwrap();
        match actions.as_slice() {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn complete(state: &mut AppState, request: &FetchRequest, page: ResultPage) -> (bool, Vec<Action>) {
        handle_event(
            state,
            &Event::FetchCompleted {
                request: request.clone(),
                outcome: Ok(page),
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_result_notifies_once() {
        let mut state = AppState::new(Theme::default());
        let request = submit(&mut state, "batman123xyz");

        let (render, actions) = complete(&mut state, &request, ResultPage::default());
        assert!(render);
        assert_eq!(
            actions,
            vec![Action::Notify {
                message: EMPTY_RESULT_MESSAGE.to_string(),
                duration: state.toast_duration,
            }]
        );
        assert_eq!(state.toasts.len(), 1);

        let (_, actions) = complete(&mut state, &request, ResultPage::default());
        assert!(actions.is_empty());

        let (render, _) = handle_event(&mut state, &Event::ToastExpired).unwrap();
        assert!(render);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn modal_captures_navigation() {
        let mut state = AppState::new(Theme::default());
        let request = submit(&mut state, "alien");
        complete(
            &mut state,
            &request,
            ResultPage {
                items: vec![Movie::new(348, "Alien"), Movie::new(679, "Aliens")],
                total_pages: 3,
                total_results: 50,
            },
        );

        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(state.modal_visible());

        let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let (render, _) = handle_event(&mut state, &Event::CloseModal).unwrap();
        assert!(render);
        assert!(state.selection.is_none());

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(matches!(actions.as_slice(), [Action::Fetch(r)] if r.key.page().get() == 2));
    }

    #[test]
    fn retry_after_failure_refetches() {
        let mut state = AppState::new(Theme::default());
        let request = submit(&mut state, "heat");

        handle_event(
            &mut state,
            &Event::FetchCompleted {
                request: request.clone(),
                outcome: Err(FetchFailure::new(503, "Service Unavailable")),
            },
        )
        .unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::Fetch(r)] if r.key == request.key && r.request_id != request.request_id));

        let (render, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_outside_search_box_is_ignored() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::CancelSearch).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.draft.is_empty());
    }

    #[test]
    fn close_focus_hides_plugin() {
        let mut state = AppState::new(Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
