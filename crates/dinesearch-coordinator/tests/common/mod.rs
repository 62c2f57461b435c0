//! Scripted in-memory lookup services.
//!
//! Every call is parked on a oneshot channel until the test resolves it,
//! which lets a test pick the exact completion order.

#![allow(dead_code)]

use std::future::Future;

use dinesearch_core::{
    AutocompleteResponse, AutocompleteService, Business, SearchQuery, SearchResponse,
    SearchService, ServiceError,
};
use parking_lot::Mutex;
use tokio::sync::oneshot;

type Reply<T> = oneshot::Sender<Result<T, ServiceError>>;

struct Call<K, T> {
    request: K,
    reply: Option<Reply<T>>,
}

pub struct Scripted<K, T> {
    calls: Mutex<Vec<Call<K, T>>>,
}

impl<K: Clone, T> Default for Scripted<K, T> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<K: Clone, T> Scripted<K, T> {
    fn register(&self, request: K) -> impl Future<Output = Result<T, ServiceError>> + Send
    where
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().push(Call {
            request,
            reply: Some(tx),
        });
        async move {
            rx.await
                .unwrap_or_else(|_| Err(ServiceError::Transport("reply dropped".to_owned())))
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn requests(&self) -> Vec<K> {
        self.calls.lock().iter().map(|c| c.request.clone()).collect()
    }

    /// Yields until at least `n` calls have been made.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.call_count() < n {
            tokio::task::yield_now().await;
        }
    }

    /// Completes call `index` (0-based, in issue order).
    pub fn resolve(&self, index: usize, result: Result<T, ServiceError>) {
        let reply = self.calls.lock()[index]
            .reply
            .take()
            .expect("call already resolved");
        let _ = reply.send(result);
    }
}

pub type FakeAutocomplete = Scripted<String, AutocompleteResponse>;
pub type FakeSearch = Scripted<SearchQuery, SearchResponse>;

impl AutocompleteService for FakeAutocomplete {
    fn autocomplete(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<AutocompleteResponse, ServiceError>> + Send {
        self.register(term.to_owned())
    }
}

impl SearchService for FakeSearch {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResponse, ServiceError>> + Send {
        self.register(query.clone())
    }
}

pub fn suggestions(items: &[&str]) -> Result<AutocompleteResponse, ServiceError> {
    Ok(AutocompleteResponse {
        suggestions: items.iter().map(|s| (*s).to_owned()).collect(),
    })
}

pub fn found(results: Vec<Business>) -> Result<SearchResponse, ServiceError> {
    Ok(SearchResponse {
        results,
        message: None,
    })
}

pub fn soft_failure(code: &str) -> Result<SearchResponse, ServiceError> {
    Ok(SearchResponse {
        results: Vec::new(),
        message: Some(code.to_owned()),
    })
}

/// Lets spawned tasks run until they block again.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
