//! Line-oriented search box session.
//!
//! Every plain input line is the new content of the search field. Lines
//! starting with `:` are commands. Observer changes are printed as they
//! arrive.

use dinesearch_core::{AutocompleteService, SearchService, SearchState};
use dinesearch_coordinator::Coordinator;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::search::{print_errors, print_results, print_state, print_suggestions};

/// One parsed line of interactive input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Keystroke(String),
    /// 1-based index into the visible suggestions.
    Pick(usize),
    Submit,
    Location(String),
    Quit,
    Invalid(String),
}

pub(crate) fn parse_line(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Keystroke(line.to_string());
    };
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));

    match name {
        "pick" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Input::Pick(n),
            _ => Input::Invalid(format!("expected `:pick <n>` with n >= 1, got `{line}`")),
        },
        "submit" => Input::Submit,
        "location" => Input::Location(arg.to_string()),
        "quit" | "q" => Input::Quit,
        other => Input::Invalid(format!("unknown command `:{other}`")),
    }
}

/// Runs the session until `:quit` or end of input, then tears the
/// coordinator down.
///
/// # Errors
///
/// Returns an error if reading stdin fails.
pub(crate) async fn run_interactive<S, A>(mut coordinator: Coordinator<S, A>) -> anyhow::Result<()>
where
    S: SearchService,
    A: AutocompleteService,
{
    let mut suggestions = coordinator.suggestions();
    let mut failures = coordinator.autocomplete_failures();
    let mut state = coordinator.state();
    let mut errors = coordinator.errors();
    let mut results = coordinator.results();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "location: {}; type to search, :pick <n>, :submit, :location <L>, :quit",
        display_or_none(&coordinator.store().current_location())
    );

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Input::Keystroke(value) => coordinator.on_keystroke(&value),
                    Input::Pick(n) => {
                        let picked = suggestions.borrow().get(n - 1).cloned();
                        match picked {
                            Some(text) => {
                                coordinator.on_suggestion_picked(&text);
                                println!("term: {text}");
                            }
                            None => println!("no suggestion #{n}"),
                        }
                    }
                    Input::Submit => match coordinator.on_submit(coordinator.current_query()) {
                        Ok(outcome) => {
                            if let Some(warning) = outcome.warning {
                                println!("warning: {warning}");
                            }
                        }
                        Err(e) => println!("rejected: {e}"),
                    },
                    Input::Location(value) => {
                        coordinator.on_location_input(&value);
                        println!("location: {}", display_or_none(&value));
                    }
                    Input::Quit => break,
                    Input::Invalid(reason) => println!("{reason}"),
                }
            }
            Ok(()) = suggestions.changed() => {
                print_suggestions(&suggestions.borrow_and_update());
            }
            Ok(()) = failures.changed() => {
                if let Some(reason) = failures.borrow_and_update().as_deref() {
                    println!("suggestions unavailable: {reason}");
                }
            }
            Ok(()) = state.changed() => {
                print_state(*state.borrow_and_update());
                if *state.borrow() == SearchState::Done {
                    print_results(&results.borrow_and_update());
                }
            }
            Ok(()) = errors.changed() => {
                print_errors(&errors.borrow_and_update());
            }
        }
    }

    coordinator.teardown();
    Ok(())
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

#[cfg(test)]
#[path = "interactive_test.rs"]
mod tests;
