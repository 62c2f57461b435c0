//! Autocomplete lookups for settled search terms.
//!
//! Every lookup is tagged with a sequence number when it is issued. A
//! completion only touches the suggestion set if its number is still the
//! latest one; anything older is dropped. In-flight requests are never
//! cancelled, only their effects are suppressed.
//!
//! Clearing the set (empty term, selection, submission) also advances the
//! sequence, so a lookup issued before the clear cannot bring the old
//! suggestions back.

use std::sync::Arc;

use dinesearch_core::{
    AutocompleteResponse, AutocompleteService, ServiceError, SharedStore, SuggestionSet,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct Shared<A> {
    service: Arc<A>,
    store: SharedStore,
    /// Highest sequence number handed out so far.
    latest: Mutex<u64>,
    suggestions: watch::Sender<SuggestionSet>,
    last_failure: watch::Sender<Option<String>>,
}

impl<A: AutocompleteService> Shared<A> {
    fn next_sequence(&self) -> u64 {
        let mut latest = self.latest.lock();
        *latest += 1;
        *latest
    }

    fn complete(
        &self,
        seq: u64,
        term: &str,
        result: Result<AutocompleteResponse, ServiceError>,
    ) {
        // Held across the write so a newer lookup cannot be issued between
        // the staleness check and the update.
        let latest = self.latest.lock();
        if *latest != seq {
            tracing::debug!(seq, latest = *latest, term, "discarding stale suggestions");
            return;
        }

        match result {
            Ok(response) => {
                tracing::debug!(
                    seq,
                    term,
                    count = response.suggestions.len(),
                    "suggestions updated"
                );
                self.suggestions.send_replace(response.suggestions);
                self.last_failure.send_replace(None);
            }
            Err(e) => {
                tracing::warn!(seq, term, error = %e, "autocomplete lookup failed");
                self.last_failure.send_replace(Some(e.to_string()));
            }
        }
    }
}

/// Owns the suggestion set and issues one lookup per settled term.
pub struct SuggestionFetcher<A> {
    shared: Arc<Shared<A>>,
}

impl<A> Clone for SuggestionFetcher<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: AutocompleteService> SuggestionFetcher<A> {
    #[must_use]
    pub fn new(service: Arc<A>, store: SharedStore) -> Self {
        let (suggestions, _) = watch::channel(SuggestionSet::new());
        let (last_failure, _) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                service,
                store,
                latest: Mutex::new(0),
                suggestions,
                last_failure,
            }),
        }
    }

    /// Handles a term emitted by the rate limiter.
    ///
    /// An empty term clears the suggestions synchronously and returns
    /// `None`. Otherwise a lookup is spawned and its task handle returned;
    /// callers are free to drop it.
    ///
    /// # Panics
    ///
    /// Panics if called with a non-empty term outside a Tokio runtime.
    pub fn on_settled_term(&self, term: String) -> Option<JoinHandle<()>> {
        if term.is_empty() {
            self.clear();
            return None;
        }

        let seq = self.shared.next_sequence();
        tracing::debug!(seq, term = %term, "issuing autocomplete lookup");
        let shared = Arc::clone(&self.shared);
        Some(tokio::spawn(async move {
            let result = shared.service.autocomplete(&term).await;
            shared.complete(seq, &term, result);
        }))
    }

    /// Applies a picked suggestion: it becomes the search term and the
    /// suggestion list closes. No lookup is issued.
    pub fn select(&self, text: &str) {
        self.shared.store.set_last_search_term(text);
        self.clear();
    }

    /// Empties the suggestion set and invalidates in-flight lookups.
    pub fn clear(&self) {
        let latest = {
            let mut latest = self.shared.latest.lock();
            *latest += 1;
            self.shared.suggestions.send_if_modified(|set| {
                if set.is_empty() {
                    return false;
                }
                set.clear();
                true
            });
            *latest
        };
        tracing::trace!(seq = latest, "suggestions cleared");
    }

    #[must_use]
    pub fn suggestions(&self) -> watch::Receiver<SuggestionSet> {
        self.shared.suggestions.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> SuggestionSet {
        self.shared.suggestions.borrow().clone()
    }

    /// Message of the most recent failed lookup, reset by the next success.
    ///
    /// Autocomplete failures are non-fatal and never reach the search
    /// error set; this is the only place they surface.
    #[must_use]
    pub fn last_failure(&self) -> watch::Receiver<Option<String>> {
        self.shared.last_failure.subscribe()
    }
}
