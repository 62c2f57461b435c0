//! Traits for the external lookup services the coordinator talks to.
//!
//! Implementations must hand back `Send` futures because lookups run on
//! spawned tasks.

use std::future::Future;

use thiserror::Error;

use crate::types::{AutocompleteResponse, SearchQuery, SearchResponse};

/// Failure of a lookup call as seen by the coordinator.
///
/// The `Display` text is what ends up in the error set when a search fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not decode response for {context}: {message}")]
    Decode { context: String, message: String },
}

pub trait SearchService: Send + Sync + 'static {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResponse, ServiceError>> + Send;
}

pub trait AutocompleteService: Send + Sync + 'static {
    fn autocomplete(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<AutocompleteResponse, ServiceError>> + Send;
}
