//! Domain types shared by the search box flows.
//!
//! Everything here is plain data: the coordinator crate owns the state
//! machines that move these values around.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single search hit.
///
/// Only `id` and `name` are interpreted. Every other field the search
/// service returns (rating, address, photos, ...) is kept in `extra` and
/// written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Business {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Current autocomplete candidates, replaced wholesale on every update.
pub type SuggestionSet = Vec<String>;

/// Results of the most recent completed search.
pub type ResultSet = Vec<Business>;

/// An explicit search submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    pub location: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            location: location.into(),
        }
    }

    /// Checks the query before any state transition happens.
    ///
    /// A missing location blocks the submission. A missing term only
    /// produces a warning. Whitespace-only values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LocationRequired`] when `location` is blank.
    pub fn validate(&self) -> Result<Option<SubmitWarning>, ValidationError> {
        if self.location.trim().is_empty() {
            return Err(ValidationError::LocationRequired);
        }
        if self.term.trim().is_empty() {
            return Ok(Some(SubmitWarning::TermEmpty));
        }
        Ok(None)
    }
}

/// Blocking validation failures. These never reach the [`ErrorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("LOCATION_REQUIRED: a location is required to search")]
    LocationRequired,
}

impl ValidationError {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ValidationError::LocationRequired => "LOCATION_REQUIRED",
        }
    }
}

/// Non-blocking validation findings reported alongside an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitWarning {
    TermEmpty,
}

impl SubmitWarning {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            SubmitWarning::TermEmpty => "TERM_EMPTY",
        }
    }
}

impl std::fmt::Display for SubmitWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Lifecycle of the explicit search submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Initial,
    Loading,
    Done,
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchState::Initial => write!(f, "INITIAL"),
            SearchState::Loading => write!(f, "LOADING"),
            SearchState::Done => write!(f, "DONE"),
        }
    }
}

/// A string tag identifying a search error shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(String);

impl ErrorCode {
    pub const LOCATION_NOT_FOUND: &'static str = "LOCATION_NOT_FOUND";
    pub const NO_RESULTS: &'static str = "NO_RESULTS";

    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Maps a search response `message` to a soft-failure code.
    ///
    /// Returns `None` for anything other than `LOCATION_NOT_FOUND` and
    /// `NO_RESULTS`.
    #[must_use]
    pub fn soft_failure(message: &str) -> Option<Self> {
        match message {
            Self::LOCATION_NOT_FOUND | Self::NO_RESULTS => Some(Self::new(message)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Distinct error codes in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    codes: Vec<ErrorCode>,
}

impl ErrorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `code` unless an equal code is already present.
    ///
    /// Returns `true` if the set changed.
    pub fn insert(&mut self, code: impl Into<ErrorCode>) -> bool {
        let code = code.into();
        if self.codes.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.as_str() == code)
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorCode> {
        self.codes.iter()
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = &'a ErrorCode;
    type IntoIter = std::slice::Iter<'a, ErrorCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Body returned by the search service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Business>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body returned by the autocomplete service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}
