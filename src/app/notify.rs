//! Empty-result notification rule and the toast queue.
//!
//! [`EmptyResultRule`] decides when a successful fetch deserves a "nothing
//! found" toast. It is edge-triggered: it remembers the (key, request id) pair
//! it last fired for, so repeated renders or repeated handling of the same
//! completion never produce a second toast, while a fresh fetch cycle for the
//! same key does.
//!
//! [`ToastQueue`] holds the toasts currently on screen. Toasts expire in FIFO
//! order; every toast gets the same duration so the oldest always expires first.

use crate::domain::{QueryKey, ResultPage};
use crate::fetcher::FetchRequest;
use std::collections::VecDeque;

/// Message shown when a search succeeds with zero results.
pub const EMPTY_RESULT_MESSAGE: &str = "No movies found for your request.";

/// Edge-triggered "no results" notifier.
#[derive(Debug, Clone, Default)]
pub struct EmptyResultRule {
    last_fired: Option<(QueryKey, u64)>,
}

impl EmptyResultRule {
    /// Creates a rule that has not fired yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a success transition and reports whether to notify.
    ///
    /// Returns `true` exactly once per fetch cycle whose page is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviefinder::app::notify::EmptyResultRule;
    /// use moviefinder::domain::{PageNumber, QueryKey, ResultPage, SearchQuery};
    /// use moviefinder::fetcher::FetchRequest;
    ///
    /// let key = QueryKey::new(SearchQuery::new("batman123xyz"), PageNumber::FIRST).unwrap();
    /// let request = FetchRequest { key, request_id: 1 };
    /// let empty = ResultPage::default();
    ///
    /// let mut rule = EmptyResultRule::new();
    /// assert!(rule.on_success(&request, &empty));
    /// assert!(!rule.on_success(&request, &empty));
    /// ```
    pub fn on_success(&mut self, request: &FetchRequest, page: &ResultPage) -> bool {
        if !page.is_empty() {
            return false;
        }

        let marker = (request.key.clone(), request.request_id);
        if self.last_fired.as_ref() == Some(&marker) {
            tracing::debug!(key = %request.key, "empty result already notified");
            return false;
        }

        tracing::debug!(key = %request.key, request_id = request.request_id, "empty result notification");
        self.last_fired = Some(marker);
        true
    }
}

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text to display.
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    /// Adds a toast at the back of the queue.
    pub fn push(&mut self, message: impl Into<String>) {
        self.toasts.push_back(Toast {
            message: message.into(),
        });
    }

    /// Removes the oldest toast.
    pub fn expire_oldest(&mut self) -> Option<Toast> {
        self.toasts.pop_front()
    }

    /// Iterates over visible toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
