//! HTTP client for the search and autocomplete endpoints.
//!
//! Wraps `reqwest` with URL building, status checking, typed response
//! deserialization and retry on transient failures. [`ApiClient`] also
//! implements the coordinator's service ports.

use std::future::Future;
use std::time::Duration;

use dinesearch_core::{
    AppConfig, AutocompleteResponse, AutocompleteService, SearchQuery, SearchResponse,
    SearchService, ServiceError,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::retry::retry_with_backoff;

const USER_AGENT: &str = "dinesearch/0.1 (search-box)";
const SEARCH_PATH: &str = "api/search";
const AUTOCOMPLETE_PATH: &str = "api/autocomplete";

/// Client for the search backend.
///
/// Use [`ApiClient::new`] to build from application config or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ApiClient {
    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )?;
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key),
            None => client,
        })
    }

    /// Creates a client with an explicit base URL and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .build()?;

        // Exactly one trailing slash, so relative joins append to the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            api_key: None,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Sends `key` as a bearer token on every request.
    #[must_use]
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_owned());
        self
    }

    /// Runs a search for `term` near `location`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure after all retries.
    /// - [`ClientError::Deserialize`] if the body does not match
    ///   `{results, message?}`.
    pub async fn fetch_search(
        &self,
        term: &str,
        location: &str,
    ) -> Result<SearchResponse, ClientError> {
        let url = self.build_url(SEARCH_PATH, &[("term", term), ("location", location)])?;
        self.get_json(&url, &format!("search(term={term}, location={location})"))
            .await
    }

    /// Fetches autocomplete suggestions for a partial `term`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch_search`], for the `{suggestions}` body.
    pub async fn fetch_suggestions(&self, term: &str) -> Result<AutocompleteResponse, ClientError> {
        let url = self.build_url(AUTOCOMPLETE_PATH, &[("term", term)])?;
        self.get_json(&url, &format!("autocomplete(term={term})"))
            .await
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, ClientError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let body = self.request_text(url).await?;
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }

    /// Sends a GET request, asserts a 2xx status, and returns the body.
    async fn request_text(&self, url: &Url) -> Result<String, ClientError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

impl SearchService for ApiClient {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResponse, ServiceError>> + Send {
        async move {
            self.fetch_search(&query.term, &query.location)
                .await
                .map_err(ServiceError::from)
        }
    }
}

impl AutocompleteService for ApiClient {
    fn autocomplete(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<AutocompleteResponse, ServiceError>> + Send {
        async move {
            self.fetch_suggestions(term)
                .await
                .map_err(ServiceError::from)
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
