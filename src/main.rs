//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the MovieFinder library and the Zellij
//! plugin system: host events become library [`Event`]s, library [`Action`]s
//! become host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `WebRequestResult`, `Timer` events
//! 3. **Permission**: Web access is requested; fetches issued before it is
//!    granted are held back and sent once it is, or failed if it is denied
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, pagination, and search box events (see below)
//! - `WebRequestResult` → `Event::FetchCompleted` (context identifies the request)
//! - `Timer` → `Event::ToastExpired` (one timer per toast)
//!
//! # Keybindings
//!
//! Detail modal open:
//! - `Esc`/`Enter`/`q`: Close the modal
//!
//! Search box focused:
//! - Printable keys: Type characters
//! - `Enter`: Submit the query
//! - `Esc`: Discard the draft
//!
//! Results:
//! - `j`/`Down`, `k`/`Up`: Move the cursor
//! - `Enter`: Show details
//! - `h`/`Left`/`[`, `l`/`Right`/`]`: Previous / next page
//! - `g`/`Home`, `G`/`End`: First / last page
//! - `1`-`9`: Jump to page
//! - `/`: Edit the search
//! - `r`: Retry the current page
//! - `q`/`Esc`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use moviefinder::fetcher::decode_response;
use moviefinder::{
    handle_event, Action, ApiConfig, Config, Event, FetchFailure, FetchRequest, InputMode, PageNumber,
};

register_plugin!(State);

/// State of the `WebAccess` permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebAccess {
    Pending,
    Granted,
    Denied,
}

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: API settings
/// for outgoing requests and the web access permission.
struct State {
    /// Core application state from library layer.
    app: moviefinder::AppState,

    /// Settings for `web_request` calls.
    api: ApiConfig,

    /// Query submitted once web access is granted.
    initial_query: Option<String>,

    /// Answer to the `WebAccess` permission request so far.
    web_access: WebAccess,

    /// Fetches issued before web access was granted.
    pending: Vec<FetchRequest>,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: moviefinder::initialize(&default_config),
            api: default_config.api_config(),
            initial_query: None,
            web_access: WebAccess::Pending,
            pending: Vec::new(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        moviefinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "configuration incomplete, searches will likely fail");
        }
        tracing::debug!(
            language = %config.language,
            include_adult = config.include_adult,
            has_token = config.api_token.is_some(),
            "parsed configuration"
        );

        self.app = moviefinder::initialize(&config);
        self.api = config.api_config();
        self.initial_query.clone_from(&config.initial_query);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::ToastExpired,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        moviefinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.modal_visible() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseModal),
                _ => None,
            };
        }

        if key.bare_key == BareKey::Char('c') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CloseFocus);
        }

        match self.app.input_mode {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::CancelSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Left | BareKey::Char('h' | '[') => Event::PrevPage,
                BareKey::Right | BareKey::Char('l' | ']') => Event::NextPage,
                BareKey::Home | BareKey::Char('g') => Event::FirstPage,
                BareKey::End | BareKey::Char('G') => Event::LastPage,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('r') => Event::Retry,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                BareKey::Char(c) => {
                    let page = c.to_digit(10).and_then(PageNumber::new)?;
                    Event::GoToPage(page)
                }
                _ => return None,
            }),
        }
    }

    /// Maps a host web response back to the request that produced it.
    ///
    /// Responses whose context was not produced by this plugin are ignored.
    fn map_web_result_event(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request) = FetchRequest::from_context(context) else {
            tracing::debug!(status, "ignoring web response without a search context");
            return None;
        };

        tracing::debug!(
            status,
            body_len = body.len(),
            request_id = request.request_id,
            "search response received"
        );

        Some(Event::FetchCompleted {
            request,
            outcome: decode_response(status, body),
        })
    }

    /// Handles permission request results. Returns `true` if the UI should re-render.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!(pending = self.pending.len(), "web access granted");
                self.web_access = WebAccess::Granted;

                for request in std::mem::take(&mut self.pending) {
                    self.send(&request);
                }

                if let Some(query) = self.initial_query.take() {
                    tracing::debug!(query = %query, "submitting initial query");
                    self.app.draft = query;
                    if let Some(request) = self.app.submit_draft() {
                        self.execute_action(Action::Fetch(request));
                    }
                }
                true
            }
            PermissionStatus::Denied => {
                tracing::warn!(pending = self.pending.len(), "web access denied - searches cannot be sent");
                self.web_access = WebAccess::Denied;

                for request in std::mem::take(&mut self.pending) {
                    self.fail(request);
                }
                true
            }
        }
    }

    /// Completes a fetch that cannot be sent as failed, so it leaves the
    /// loading state and can be retried.
    fn fail(&mut self, request: FetchRequest) {
        let event = Event::FetchCompleted {
            request,
            outcome: Err(FetchFailure::web_access_denied()),
        };
        match handle_event(&mut self.app, &event) {
            Ok((_, actions)) => {
                for a in actions {
                    self.execute_action(a);
                }
            }
            Err(e) => tracing::debug!(error = %e, "error failing unsent fetch"),
        }
    }

    fn send(&self, request: &FetchRequest) {
        let url = request.url(&self.api);
        tracing::debug!(
            query = %request.key.query(),
            page = %request.key.page(),
            request_id = request.request_id,
            "sending search request"
        );
        web_request(
            url,
            HttpVerb::Get,
            FetchRequest::headers(&self.api),
            vec![],
            request.to_context(),
        );
    }

    /// Executes an action returned from event handling.
    ///
    /// - `Fetch`: Send a search request (held back until web access is granted,
    ///   failed at once if it was denied)
    /// - `Notify`: Arm one timer for the toast just queued
    /// - `CloseFocus`: Hide the plugin pane
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Fetch(request) => {
                match self.web_access {
                    WebAccess::Granted => self.send(&request),
                    WebAccess::Pending => {
                        tracing::debug!(request_id = request.request_id, "web access pending, queueing fetch");
                        self.pending.push(request);
                    }
                    WebAccess::Denied => self.fail(request),
                }
            }
            Action::Notify { message, duration } => {
                tracing::debug!(message = %message, ?duration, "showing toast");
                set_timeout(duration.as_secs_f64());
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
