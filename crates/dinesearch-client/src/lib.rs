//! HTTP client for the restaurant search and autocomplete endpoints.

pub mod client;
pub mod error;

mod retry;

pub use client::ApiClient;
pub use error::ClientError;
