//! One-shot `search` and `suggest` command handlers.

use std::time::Duration;

use dinesearch_core::{AutocompleteService, Business, ErrorSet, SearchService, SearchState};
use dinesearch_coordinator::Coordinator;

/// Types `term` into the search box, submits it with the current location
/// and prints the outcome once the search is done.
///
/// # Errors
///
/// Returns an error if the submission is rejected (no location).
pub(crate) async fn run_search<S, A>(
    coordinator: &Coordinator<S, A>,
    term: &str,
) -> anyhow::Result<()>
where
    S: SearchService,
    A: AutocompleteService,
{
    coordinator.on_keystroke(term);
    let outcome = coordinator.on_submit(coordinator.current_query())?;
    if let Some(warning) = outcome.warning {
        println!("warning: {warning}");
    }
    outcome.handle.wait().await;

    print_state(*coordinator.state().borrow());
    print_errors(&coordinator.errors().borrow());
    print_results(&coordinator.results().borrow());
    Ok(())
}

/// Types `term` one character at a time and prints the suggestions that
/// come back once typing has settled.
///
/// # Errors
///
/// Returns an error if neither suggestions nor a failure arrive within
/// `wait`.
pub(crate) async fn run_suggest<S, A>(
    coordinator: &Coordinator<S, A>,
    term: &str,
    wait: Duration,
) -> anyhow::Result<()>
where
    S: SearchService,
    A: AutocompleteService,
{
    let mut suggestions = coordinator.suggestions();
    let mut failures = coordinator.autocomplete_failures();

    for (idx, ch) in term.char_indices() {
        coordinator.on_keystroke(&term[..idx + ch.len_utf8()]);
    }
    if term.is_empty() {
        println!("nothing typed; no suggestions");
        return Ok(());
    }

    tokio::time::timeout(wait, async {
        tokio::select! {
            _ = suggestions.changed() => {}
            _ = failures.changed() => {}
        }
    })
    .await
    .map_err(|_| anyhow::anyhow!("no suggestions for '{term}' within {wait:?}"))?;

    if let Some(reason) = failures.borrow().as_deref() {
        println!("suggestions unavailable: {reason}");
        return Ok(());
    }
    print_suggestions(&suggestions.borrow());
    Ok(())
}

pub(crate) fn print_state(state: SearchState) {
    println!("state: {state}");
}

pub(crate) fn print_errors(errors: &ErrorSet) {
    for code in errors {
        println!("error: {code}");
    }
}

pub(crate) fn print_results(results: &[Business]) {
    if results.is_empty() {
        println!("no results");
        return;
    }
    println!("{:<12}NAME", "ID");
    for business in results {
        println!("{:<12}{}", business.id, business.name);
    }
}

pub(crate) fn print_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("no suggestions");
        return;
    }
    for (n, text) in suggestions.iter().enumerate() {
        println!("{:>3}. {text}", n + 1);
    }
}
