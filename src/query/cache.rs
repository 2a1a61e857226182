//! Query cache and request coordinator.
//!
//! [`QueryCache`] maps each (query, page) key to its last outcome and tracks the
//! single request allowed in flight per key. It decides when a fetch must be
//! issued, which page is displayed for the active key, and whether a late
//! response still matters.
//!
//! # Display rules
//!
//! | active entry | displayed page |
//! |--------------|----------------|
//! | none / idle  | none |
//! | loading      | own cached page, else the placeholder page of the same query |
//! | success      | own page |
//! | error        | none |
//!
//! The cache is never evicted; entries accumulate for the life of the plugin.

use super::status::FetchStatus;
use crate::domain::{FetchFailure, QueryKey, ResultPage};
use crate::fetcher::FetchRequest;
use std::collections::HashMap;

/// What the cache did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response belongs to the active key; the view changed to `status`.
    Applied(FetchStatus),
    /// The response was stored under its key, but a newer key is active.
    Superseded,
    /// The response does not match the key's in-flight request and was dropped.
    Discarded,
}

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    data: Option<ResultPage>,
    error: Option<FetchFailure>,
    in_flight: Option<u64>,
}

impl CacheEntry {
    const fn status(&self) -> FetchStatus {
        if self.in_flight.is_some() {
            FetchStatus::Loading
        } else if self.error.is_some() {
            FetchStatus::Error
        } else if self.data.is_some() {
            FetchStatus::Success
        } else {
            FetchStatus::Idle
        }
    }
}

/// Memoizing coordinator for search fetches.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    active: Option<QueryKey>,
    placeholder: Option<QueryKey>,
    next_request_id: u64,
}

impl QueryCache {
    /// Creates an empty, idle cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `key` the active key and returns the fetch to issue, if any.
    ///
    /// `None` disables the cache: nothing is fetched and nothing is displayed.
    /// Every activation of a non-empty key refetches it unless a request for
    /// that key is already in flight. When switching pages within the same query,
    /// the previously displayed page becomes the placeholder shown while the new
    /// key loads.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviefinder::domain::{PageNumber, QueryKey, SearchQuery};
    /// use moviefinder::query::{FetchStatus, QueryCache};
    ///
    /// let mut cache = QueryCache::new();
    /// assert!(cache.activate(None).is_none());
    /// assert_eq!(cache.status(), FetchStatus::Idle);
    ///
    /// let key = QueryKey::new(SearchQuery::new("dune"), PageNumber::FIRST);
    /// let request = cache.activate(key.clone()).unwrap();
    /// assert_eq!(Some(request.key), key);
    /// assert_eq!(cache.status(), FetchStatus::Loading);
    /// ```
    pub fn activate(&mut self, key: Option<QueryKey>) -> Option<FetchRequest> {
        let previous = self.active.take();

        let Some(key) = key else {
            tracing::debug!("query cleared, cache disabled");
            self.placeholder = None;
            return None;
        };

        let placeholder = previous.and_then(|prev| self.placeholder_for(&prev, &key));
        tracing::debug!(key = %key, placeholder = ?placeholder, "activating key");

        self.placeholder = placeholder;
        self.active = Some(key.clone());
        self.start_fetch(key)
    }

    /// Stores the outcome of `request` and reports whether the view changed.
    ///
    /// Responses for keys that are no longer active are cached under their own
    /// key but never touch the view. Responses whose request id is not the one
    /// in flight for the key are discarded.
    pub fn resolve(
        &mut self,
        request: &FetchRequest,
        outcome: Result<ResultPage, FetchFailure>,
    ) -> Resolution {
        let Some(entry) = self.entries.get_mut(&request.key) else {
            tracing::debug!(key = %request.key, "response for unknown key discarded");
            return Resolution::Discarded;
        };

        if entry.in_flight != Some(request.request_id) {
            tracing::debug!(
                key = %request.key,
                request_id = request.request_id,
                in_flight = ?entry.in_flight,
                "stale response discarded"
            );
            return Resolution::Discarded;
        }

        entry.in_flight = None;
        match outcome {
            Ok(page) => {
                entry.data = Some(page);
                entry.error = None;
            }
            Err(failure) => {
                entry.data = None;
                entry.error = Some(failure);
            }
        }
        let status = entry.status();

        if self.active.as_ref() == Some(&request.key) {
            self.placeholder = None;
            tracing::debug!(key = %request.key, status = ?status, "active key resolved");
            Resolution::Applied(status)
        } else {
            tracing::debug!(key = %request.key, status = ?status, "superseded response cached");
            Resolution::Superseded
        }
    }

    /// Marks `key` stale.
    ///
    /// The active key is refetched immediately (unless already in flight); any
    /// other key loses its cached outcome.
    pub fn invalidate(&mut self, key: &QueryKey) -> Option<FetchRequest> {
        if self.active.as_ref() == Some(key) {
            return self.start_fetch(key.clone());
        }

        tracing::debug!(key = %key, "dropping cached entry");
        self.entries.remove(key);
        if self.placeholder.as_ref() == Some(key) {
            self.placeholder = None;
        }
        None
    }

    /// Returns the status of the active key.
    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.active
            .as_ref()
            .and_then(|key| self.entries.get(key))
            .map_or(FetchStatus::Idle, CacheEntry::status)
    }

    /// Returns the page to display for the active key.
    #[must_use]
    pub fn current_page(&self) -> Option<&ResultPage> {
        let entry = self.entries.get(self.active.as_ref()?)?;

        match entry.status() {
            FetchStatus::Idle | FetchStatus::Error => None,
            FetchStatus::Success => entry.data.as_ref(),
            FetchStatus::Loading => entry.data.as_ref().or_else(|| {
                self.placeholder
                    .as_ref()
                    .and_then(|key| self.entries.get(key))
                    .and_then(|placeholder| placeholder.data.as_ref())
            }),
        }
    }

    /// Returns `true` while stale data is displayed for a loading key.
    #[must_use]
    pub fn is_revalidating(&self) -> bool {
        self.status().is_loading() && self.current_page().is_some()
    }

    /// Returns the failure of the active key when its status is error.
    #[must_use]
    pub fn error(&self) -> Option<&FetchFailure> {
        let entry = self.entries.get(self.active.as_ref()?)?;
        match entry.status() {
            FetchStatus::Error => entry.error.as_ref(),
            _ => None,
        }
    }

    /// Returns the number of keys with cached state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been fetched yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn placeholder_for(&self, previous: &QueryKey, next: &QueryKey) -> Option<QueryKey> {
        if !previous.same_query(next) {
            return None;
        }
        if previous == next {
            return self.placeholder.clone();
        }

        let previous_has_data = self
            .entries
            .get(previous)
            .is_some_and(|entry| entry.data.is_some() && entry.error.is_none());

        if previous_has_data {
            Some(previous.clone())
        } else {
            self.placeholder.clone().filter(|key| key.same_query(next))
        }
    }

    fn start_fetch(&mut self, key: QueryKey) -> Option<FetchRequest> {
        let entry = self.entries.entry(key.clone()).or_default();

        if let Some(request_id) = entry.in_flight {
            tracing::debug!(key = %key, request_id, "fetch already in flight");
            return None;
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        entry.in_flight = Some(request_id);

        tracing::debug!(key = %key, request_id, "issuing fetch");
        Some(FetchRequest { key, request_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Movie, PageNumber, SearchQuery};

    fn key(query: &str, page: u32) -> QueryKey {
        QueryKey::new(SearchQuery::new(query), PageNumber::new(page).unwrap()).unwrap()
    }

    fn page_of(titles: &[&str], total_pages: u32) -> ResultPage {
        ResultPage {
            items: titles
                .iter()
                .enumerate()
                .map(|(i, title)| Movie::new(i as u64 + 1, *title))
                .collect(),
            total_pages,
            total_results: titles.len() as u64,
        }
    }

    fn titles(cache: &QueryCache) -> Vec<String> {
        cache
            .current_page()
            .map(|page| page.items.iter().map(|m| m.title.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn empty_query_never_fetches() {
        let mut cache = QueryCache::new();
        assert!(cache.activate(None).is_none());
        assert_eq!(cache.status(), FetchStatus::Idle);
        assert!(cache.current_page().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn success_is_applied_to_active_key() {
        let mut cache = QueryCache::new();
        let request = cache.activate(Some(key("matrix", 1))).unwrap();
        assert_eq!(cache.status(), FetchStatus::Loading);
        assert!(cache.current_page().is_none());

        let resolution = cache.resolve(&request, Ok(page_of(&["The Matrix"], 3)));
        assert_eq!(resolution, Resolution::Applied(FetchStatus::Success));
        assert_eq!(titles(&cache), vec!["The Matrix"]);
    }

    #[test]
    fn one_request_in_flight_per_key() {
        let mut cache = QueryCache::new();
        let first = cache.activate(Some(key("matrix", 1))).unwrap();
        assert!(cache.activate(Some(key("matrix", 1))).is_none());

        let _other = cache.activate(Some(key("matrix", 2))).unwrap();
        assert!(cache.activate(Some(key("matrix", 1))).is_none());
        assert_eq!(
            cache.resolve(&first, Ok(page_of(&["a"], 2))),
            Resolution::Applied(FetchStatus::Success)
        );
    }

    #[test]
    fn superseded_response_does_not_clobber_view() {
        let mut cache = QueryCache::new();
        let old = cache.activate(Some(key("alien", 1))).unwrap();
        let new = cache.activate(Some(key("aliens", 1))).unwrap();

        assert_eq!(cache.resolve(&old, Ok(page_of(&["Alien"], 1))), Resolution::Superseded);
        assert_eq!(cache.status(), FetchStatus::Loading);
        assert!(cache.current_page().is_none());

        cache.resolve(&new, Ok(page_of(&["Aliens"], 1)));
        assert_eq!(titles(&cache), vec!["Aliens"]);
    }

    #[test]
    fn previous_page_stays_visible_while_next_loads() {
        let mut cache = QueryCache::new();
        let first = cache.activate(Some(key("matrix", 1))).unwrap();
        cache.resolve(&first, Ok(page_of(&["p1-a", "p1-b"], 10)));

        let second = cache.activate(Some(key("matrix", 2))).unwrap();
        assert_eq!(cache.status(), FetchStatus::Loading);
        assert!(cache.is_revalidating());
        assert_eq!(titles(&cache), vec!["p1-a", "p1-b"]);

        cache.resolve(&second, Ok(page_of(&["p2-a"], 10)));
        assert_eq!(cache.status(), FetchStatus::Success);
        assert!(!cache.is_revalidating());
        assert_eq!(titles(&cache), vec!["p2-a"]);
    }

    #[test]
    fn placeholder_survives_rapid_page_flips() {
        let mut cache = QueryCache::new();
        let first = cache.activate(Some(key("matrix", 1))).unwrap();
        cache.resolve(&first, Ok(page_of(&["p1"], 10)));

        let _second = cache.activate(Some(key("matrix", 2))).unwrap();
        let third = cache.activate(Some(key("matrix", 3))).unwrap();
        assert_eq!(titles(&cache), vec!["p1"]);

        cache.resolve(&third, Ok(page_of(&["p3"], 10)));
        assert_eq!(titles(&cache), vec!["p3"]);
    }

    #[test]
    fn new_query_does_not_show_old_results() {
        let mut cache = QueryCache::new();
        let first = cache.activate(Some(key("matrix", 1))).unwrap();
        cache.resolve(&first, Ok(page_of(&["The Matrix"], 1)));

        cache.activate(Some(key("inception", 1))).unwrap();
        assert_eq!(cache.status(), FetchStatus::Loading);
        assert!(cache.current_page().is_none());
    }

    #[test]
    fn error_takes_precedence_over_placeholder() {
        let mut cache = QueryCache::new();
        let first = cache.activate(Some(key("matrix", 1))).unwrap();
        cache.resolve(&first, Ok(page_of(&["p1"], 10)));

        let second = cache.activate(Some(key("matrix", 2))).unwrap();
        let resolution = cache.resolve(&second, Err(FetchFailure::new(500, "boom")));
        assert_eq!(resolution, Resolution::Applied(FetchStatus::Error));
        assert!(cache.current_page().is_none());
        assert_eq!(cache.error().map(|f| f.status), Some(500));
    }

    #[test]
    fn revisiting_a_page_serves_cache_while_refetching() {
        let mut cache = QueryCache::new();
        let first = cache.activate(Some(key("matrix", 1))).unwrap();
        cache.resolve(&first, Ok(page_of(&["p1"], 2)));
        let second = cache.activate(Some(key("matrix", 2))).unwrap();
        cache.resolve(&second, Ok(page_of(&["p2"], 2)));

        let again = cache.activate(Some(key("matrix", 1))).unwrap();
        assert_ne!(again.request_id, first.request_id);
        assert_eq!(cache.status(), FetchStatus::Loading);
        assert_eq!(titles(&cache), vec!["p1"]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn unknown_request_is_discarded() {
        let mut cache = QueryCache::new();
        let request = cache.activate(Some(key("matrix", 1))).unwrap();
        let forged = FetchRequest {
            key: request.key.clone(),
            request_id: request.request_id + 10,
        };
        assert_eq!(cache.resolve(&forged, Ok(page_of(&[], 0))), Resolution::Discarded);

        let never_requested = FetchRequest { key: key("other", 1), request_id: 1 };
        assert_eq!(cache.resolve(&never_requested, Ok(page_of(&[], 0))), Resolution::Discarded);
        assert_eq!(cache.status(), FetchStatus::Loading);
    }

    #[test]
    fn invalidate_refetches_active_and_drops_others() {
        let mut cache = QueryCache::new();
        let failed = cache.activate(Some(key("matrix", 1))).unwrap();
        cache.resolve(&failed, Err(FetchFailure::new(502, "bad gateway")));

        let retry = cache.invalidate(&key("matrix", 1)).unwrap();
        assert_eq!(cache.status(), FetchStatus::Loading);
        assert!(cache.invalidate(&key("matrix", 1)).is_none());

        cache.resolve(&retry, Ok(page_of(&["The Matrix"], 1)));
        assert!(cache.invalidate(&key("alien", 1)).is_none());

        let other = cache.activate(Some(key("alien", 1))).unwrap();
        cache.resolve(&other, Ok(page_of(&["Alien"], 1)));
        assert_eq!(cache.len(), 2);
        assert!(cache.invalidate(&key("matrix", 1)).is_none());
        assert_eq!(cache.len(), 1);
    }
}
