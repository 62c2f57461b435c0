//! State machine for the explicit "search" action.
//!
//! ```text
//! INITIAL --submit(valid)--> LOADING --response--> DONE
//!                               ^                   |
//!                               +-----submit--------+
//! ```
//!
//! Validation runs before any transition: a blank location rejects the
//! submission outright, a blank term only warns. Soft-failure messages and
//! transport failures are accumulated, de-duplicated, in the error set.
//!
//! Overlapping submissions are not guarded: whichever response completes
//! last decides the visible results, errors and state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dinesearch_core::{
    ErrorCode, ErrorSet, ResultSet, SearchQuery, SearchResponse, SearchService, SearchState,
    ServiceError, SharedStore, SubmitWarning, ValidationError,
};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Blocking reasons a submission was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SubmitError {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            SubmitError::Validation(e) => e.code(),
        }
    }
}

/// An accepted submission.
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Non-blocking validation finding, e.g. `TERM_EMPTY`.
    pub warning: Option<SubmitWarning>,
    pub handle: SubmissionHandle,
}

/// Completion handle for one in-flight search.
#[derive(Debug)]
pub struct SubmissionHandle {
    id: u64,
    task: JoinHandle<()>,
}

impl SubmissionHandle {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until this submission's response has been applied.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            tracing::error!(submission = self.id, error = %e, "search task did not complete");
        }
    }
}

struct Shared<S> {
    service: Arc<S>,
    store: SharedStore,
    issued: AtomicU64,
    state: watch::Sender<SearchState>,
    errors: watch::Sender<ErrorSet>,
    results: watch::Sender<ResultSet>,
}

impl<S: SearchService> Shared<S> {
    fn complete(&self, id: u64, result: Result<SearchResponse, ServiceError>) {
        match result {
            Ok(SearchResponse { results, message }) => {
                if let Some(message) = message {
                    match ErrorCode::soft_failure(&message) {
                        Some(code) => {
                            tracing::info!(submission = id, code = %code, "search soft failure");
                            self.errors.send_if_modified(|set| set.insert(code));
                        }
                        None => {
                            tracing::debug!(
                                submission = id,
                                server_message = %message,
                                "ignoring unrecognised search message"
                            );
                        }
                    }
                }
                tracing::info!(submission = id, count = results.len(), "search completed");
                self.store.set_latest_results(results.clone());
                self.results.send_replace(results);
            }
            Err(e) => {
                tracing::warn!(submission = id, error = %e, "search request failed");
                self.errors.send_if_modified(|set| set.insert(e.to_string()));
            }
        }
        self.state.send_replace(SearchState::Done);
    }
}

/// Drives explicit search submissions and owns their observable state.
pub struct SubmissionController<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for SubmissionController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: SearchService> SubmissionController<S> {
    #[must_use]
    pub fn new(service: Arc<S>, store: SharedStore) -> Self {
        let (state, _) = watch::channel(SearchState::Initial);
        let (errors, _) = watch::channel(ErrorSet::new());
        let (results, _) = watch::channel(ResultSet::new());
        Self {
            shared: Arc::new(Shared {
                service,
                store,
                issued: AtomicU64::new(0),
                state,
                errors,
                results,
            }),
        }
    }

    /// Validates `query` and, if it passes, starts a search.
    ///
    /// On acceptance the error set is reset, the state moves to `LOADING`
    /// and the lookup is spawned. Request failures never come back through
    /// this `Result`; they land in the error set and the state still
    /// reaches `DONE`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Validation`] with `LOCATION_REQUIRED` when the
    /// location is blank. Nothing changes and no request is made.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn submit(&self, query: SearchQuery) -> Result<SubmitOutcome, SubmitError> {
        let warning = query.validate().inspect_err(|e| {
            tracing::info!(code = e.code(), "search submission rejected");
        })?;
        if let Some(warning) = warning {
            tracing::info!(code = warning.code(), "submitting search without a term");
        }

        let id = self.shared.issued.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            submission = id,
            term = %query.term,
            location = %query.location,
            "search submitted"
        );

        self.shared.errors.send_if_modified(|set| {
            if set.is_empty() {
                return false;
            }
            set.clear();
            true
        });
        self.shared.state.send_replace(SearchState::Loading);

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            let result = shared.service.search(&query).await;
            shared.complete(id, result);
        });

        Ok(SubmitOutcome {
            warning,
            handle: SubmissionHandle { id, task },
        })
    }

    #[must_use]
    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    #[must_use]
    pub fn errors(&self) -> watch::Receiver<ErrorSet> {
        self.shared.errors.subscribe()
    }

    #[must_use]
    pub fn results(&self) -> watch::Receiver<ResultSet> {
        self.shared.results.subscribe()
    }

    #[must_use]
    pub fn current_state(&self) -> SearchState {
        *self.shared.state.borrow()
    }
}
