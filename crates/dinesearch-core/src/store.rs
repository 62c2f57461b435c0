//! Session-wide application state shared between the search box and the
//! rest of the application.
//!
//! The store is created once per application session and outlives any
//! number of coordinators. Clones of [`SharedStore`] share the same state.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::types::ResultSet;

/// Snapshot of everything the store holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedState {
    pub last_search_term: String,
    pub current_location: String,
    /// `true` once the user has typed a location, as opposed to one
    /// supplied by geolocation or configuration.
    pub is_location_custom: bool,
    pub latest_results: ResultSet,
}

/// Keys addressable through [`SharedStore::get`] and [`SharedStore::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    LastSearchTerm,
    CurrentLocation,
    IsLocationCustom,
    LatestResults,
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKey::LastSearchTerm => write!(f, "lastSearchTerm"),
            StateKey::CurrentLocation => write!(f, "currentLocation"),
            StateKey::IsLocationCustom => write!(f, "isLocationCustom"),
            StateKey::LatestResults => write!(f, "latestResults"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Text(String),
    Flag(bool),
    Results(ResultSet),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("value of the wrong kind for key {key}")]
    KindMismatch { key: StateKey },
}

#[derive(Debug, Clone)]
pub struct SharedStore {
    tx: Arc<watch::Sender<SharedState>>,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(SharedState::default())
    }

    #[must_use]
    pub fn with_state(state: SharedState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    /// Receiver that observes every change to the store.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SharedState> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SharedState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn get(&self, key: StateKey) -> StateValue {
        let state = self.tx.borrow();
        match key {
            StateKey::LastSearchTerm => StateValue::Text(state.last_search_term.clone()),
            StateKey::CurrentLocation => StateValue::Text(state.current_location.clone()),
            StateKey::IsLocationCustom => StateValue::Flag(state.is_location_custom),
            StateKey::LatestResults => StateValue::Results(state.latest_results.clone()),
        }
    }

    /// Writes a single key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KindMismatch`] if `value` is not the kind of
    /// value `key` holds. The store is left untouched in that case.
    pub fn set(&self, key: StateKey, value: StateValue) -> Result<(), StoreError> {
        match (key, value) {
            (StateKey::LastSearchTerm, StateValue::Text(term)) => {
                self.set_last_search_term(term);
            }
            (StateKey::CurrentLocation, StateValue::Text(location)) => {
                self.tx.send_if_modified(|s| replace_if_changed(&mut s.current_location, location));
            }
            (StateKey::IsLocationCustom, StateValue::Flag(custom)) => {
                self.tx.send_if_modified(|s| replace_if_changed(&mut s.is_location_custom, custom));
            }
            (StateKey::LatestResults, StateValue::Results(results)) => {
                self.set_latest_results(results);
            }
            (key, _) => return Err(StoreError::KindMismatch { key }),
        }
        Ok(())
    }

    #[must_use]
    pub fn last_search_term(&self) -> String {
        self.tx.borrow().last_search_term.clone()
    }

    #[must_use]
    pub fn current_location(&self) -> String {
        self.tx.borrow().current_location.clone()
    }

    #[must_use]
    pub fn is_location_custom(&self) -> bool {
        self.tx.borrow().is_location_custom
    }

    #[must_use]
    pub fn latest_results(&self) -> ResultSet {
        self.tx.borrow().latest_results.clone()
    }

    pub fn set_last_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.tx
            .send_if_modified(|s| replace_if_changed(&mut s.last_search_term, term));
    }

    /// Writes the location and its origin in one update.
    pub fn set_location(&self, location: impl Into<String>, custom: bool) {
        let location = location.into();
        self.tx.send_if_modified(|s| {
            let location_changed = replace_if_changed(&mut s.current_location, location);
            let custom_changed = replace_if_changed(&mut s.is_location_custom, custom);
            location_changed || custom_changed
        });
    }

    /// Replaces the latest results. Observers are always notified, even
    /// when the new set equals the old one, since a search just completed.
    pub fn set_latest_results(&self, results: ResultSet) {
        self.tx.send_modify(|s| s.latest_results = results);
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
