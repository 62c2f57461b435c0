//! Debounced autocomplete and search submission for the search box.
//!
//! Keystrokes flow through a [`RateLimiter`] into a [`SuggestionFetcher`];
//! explicit submissions go through a [`SubmissionController`]. The
//! [`Coordinator`] wires both to the [`dinesearch_core::SharedStore`] and
//! owns the debounce subscription for the lifetime of one view.
//!
//! Everything here expects to run inside a Tokio runtime: timers and
//! lookups are spawned tasks.

pub mod config;
pub mod coordinator;
pub mod rate_limit;
pub mod submission;
pub mod suggestions;

pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use rate_limit::{RateLimiter, Subscription};
pub use submission::{SubmissionController, SubmissionHandle, SubmitError, SubmitOutcome};
pub use suggestions::SuggestionFetcher;
