//! Domain types, shared application state, service ports, and configuration
//! for the dinesearch search box.

pub mod app_config;
pub mod config;
pub mod ports;
pub mod store;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use ports::{AutocompleteService, SearchService, ServiceError};
pub use store::{SharedState, SharedStore, StateKey, StateValue, StoreError};
pub use types::{
    AutocompleteResponse, Business, ErrorCode, ErrorSet, ResultSet, SearchQuery, SearchResponse,
    SearchState, SubmitWarning, SuggestionSet, ValidationError,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
