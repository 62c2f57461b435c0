//! Composition and lifecycle of the search box.
//!
//! One [`Coordinator`] lives as long as one interactive view. It owns a
//! fresh [`RateLimiter`] subscribed to its [`SuggestionFetcher`], and tears
//! that subscription down on [`Coordinator::teardown`] or drop. The
//! [`SharedStore`] it writes to belongs to the application and outlives it.

use std::sync::Arc;

use dinesearch_core::{
    AutocompleteService, ErrorSet, ResultSet, SearchQuery, SearchService, SearchState,
    SharedStore, SuggestionSet,
};
use tokio::sync::watch;

use crate::config::CoordinatorConfig;
use crate::rate_limit::{RateLimiter, Subscription};
use crate::submission::{SubmissionController, SubmitError, SubmitOutcome};
use crate::suggestions::SuggestionFetcher;

pub struct Coordinator<S, A> {
    store: SharedStore,
    limiter: RateLimiter,
    subscription: Option<Subscription>,
    fetcher: SuggestionFetcher<A>,
    controller: SubmissionController<S>,
}

impl<S: SearchService, A: AutocompleteService> Coordinator<S, A> {
    /// Builds a coordinator and subscribes the suggestion fetcher to a new
    /// rate limiter. Nothing is spawned until the first keystroke or
    /// submission.
    #[must_use]
    pub fn new(
        store: SharedStore,
        search: Arc<S>,
        autocomplete: Arc<A>,
        config: CoordinatorConfig,
    ) -> Self {
        let limiter = RateLimiter::new(config.audit_window);
        let fetcher = SuggestionFetcher::new(autocomplete, store.clone());
        let controller = SubmissionController::new(search, store.clone());

        let subscription = {
            let fetcher = fetcher.clone();
            limiter.subscribe(move |term| {
                // Completion is observed through the suggestion set.
                let _lookup = fetcher.on_settled_term(term);
            })
        };
        tracing::debug!(
            audit_window = ?config.audit_window,
            "search box coordinator started"
        );

        Self {
            store,
            limiter,
            subscription: Some(subscription),
            fetcher,
            controller,
        }
    }

    /// The search field changed.
    ///
    /// `value` is written to `lastSearchTerm` immediately; only the
    /// suggestion lookup is debounced.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime before teardown; the
    /// debounce timer is a spawned task.
    pub fn on_keystroke(&self, value: &str) {
        self.store.set_last_search_term(value);
        self.limiter.observe(value);
    }

    /// The user asked to search.
    ///
    /// An accepted submission also closes the suggestion list and drops any
    /// keystroke still waiting for its quiet window.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Validation`] when the location is blank; see
    /// [`SubmissionController::submit`].
    ///
    /// # Panics
    ///
    /// Panics if an accepted submission is made outside a Tokio runtime.
    pub fn on_submit(&self, query: SearchQuery) -> Result<SubmitOutcome, SubmitError> {
        let outcome = self.controller.submit(query)?;
        self.limiter.discard_pending();
        self.fetcher.clear();
        Ok(outcome)
    }

    /// The user picked `text` from the suggestion list.
    pub fn on_suggestion_picked(&self, text: &str) {
        tracing::debug!(term = text, "suggestion picked");
        self.limiter.discard_pending();
        self.fetcher.select(text);
    }

    /// The user typed into the location field.
    pub fn on_location_input(&self, value: &str) {
        self.store.set_location(value, true);
    }

    /// A location arrived from geolocation or configuration.
    ///
    /// Ignored once the user has entered a location of their own. Returns
    /// whether the location was applied.
    pub fn on_location_detected(&self, value: &str) -> bool {
        if self.store.is_location_custom() {
            tracing::debug!(
                detected = value,
                "keeping user-entered location over detected one"
            );
            return false;
        }
        self.store.set_location(value, false);
        true
    }

    /// The query the search box currently shows.
    #[must_use]
    pub fn current_query(&self) -> SearchQuery {
        let state = self.store.snapshot();
        SearchQuery::new(state.last_search_term, state.current_location)
    }

    #[must_use]
    pub fn suggestions(&self) -> watch::Receiver<SuggestionSet> {
        self.fetcher.suggestions()
    }

    #[must_use]
    pub fn autocomplete_failures(&self) -> watch::Receiver<Option<String>> {
        self.fetcher.last_failure()
    }

    #[must_use]
    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.controller.state()
    }

    #[must_use]
    pub fn errors(&self) -> watch::Receiver<ErrorSet> {
        self.controller.errors()
    }

    #[must_use]
    pub fn results(&self) -> watch::Receiver<ResultSet> {
        self.controller.results()
    }
}

impl<S, A> Coordinator<S, A> {
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stops the debounce pipeline: the pending timer is cancelled and no
    /// settled term is delivered afterwards. Idempotent.
    ///
    /// Keystrokes are still echoed into the store and submissions still
    /// work after teardown; only suggestions stop.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
            tracing::debug!("search box coordinator torn down");
        }
    }
}

impl<S, A> Drop for Coordinator<S, A> {
    fn drop(&mut self) {
        self.teardown();
    }
}
