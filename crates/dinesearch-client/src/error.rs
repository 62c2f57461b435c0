use dinesearch_core::ServiceError;
use thiserror::Error;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => ServiceError::Transport(e.to_string()),
            ClientError::UnexpectedStatus { status, url } => ServiceError::Status { status, url },
            ClientError::Deserialize { context, source } => ServiceError::Decode {
                context,
                message: source.to_string(),
            },
            e @ ClientError::InvalidBaseUrl { .. } => ServiceError::Transport(e.to_string()),
        }
    }
}
