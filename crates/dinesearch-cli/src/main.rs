use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dinesearch_client::ApiClient;
use dinesearch_coordinator::{Coordinator, CoordinatorConfig};
use dinesearch_core::{AppConfig, AutocompleteService, SearchService, SharedStore};
use tracing_subscriber::EnvFilter;

mod interactive;
mod search;

#[derive(Debug, Parser)]
#[command(name = "dinesearch")]
#[command(about = "Restaurant search box with debounced suggestions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit one search and print the results
    Search {
        /// What to search for (may be empty)
        #[arg(long, default_value = "")]
        term: String,
        /// Where to search; falls back to `DINESEARCH_DEFAULT_LOCATION`
        #[arg(long)]
        location: Option<String>,
    },
    /// Type a term into the search box and print the suggestions
    Suggest {
        /// Partial search term
        term: String,
    },
    /// Line-oriented search box session
    Interactive {
        /// Starting location; falls back to `DINESEARCH_DEFAULT_LOCATION`
        #[arg(long)]
        location: Option<String>,
    },
}

type ApiCoordinator = Coordinator<ApiClient, ApiClient>;

/// Builds a coordinator backed by the HTTP API and seeds its location.
fn build_coordinator(
    config: &AppConfig,
    location: Option<&str>,
) -> anyhow::Result<ApiCoordinator> {
    let client = Arc::new(ApiClient::new(config)?);
    let coordinator = Coordinator::new(
        SharedStore::new(),
        Arc::clone(&client),
        client,
        CoordinatorConfig::from_app_config(config),
    );
    seed_location(&coordinator, location, config.default_location.as_deref());
    Ok(coordinator)
}

/// A `--location` flag counts as user input; the configured default is
/// treated like a detected location.
fn seed_location<S, A>(
    coordinator: &Coordinator<S, A>,
    from_flag: Option<&str>,
    configured: Option<&str>,
) where
    S: SearchService,
    A: AutocompleteService,
{
    if let Some(location) = from_flag {
        coordinator.on_location_input(location);
    } else if let Some(location) = configured {
        coordinator.on_location_detected(location);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = dinesearch_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, api_base_url = %config.api_base_url, "config loaded");

    match cli.command {
        Some(Commands::Search { term, location }) => {
            let coordinator = build_coordinator(&config, location.as_deref())?;
            search::run_search(&coordinator, &term).await?;
        }
        Some(Commands::Suggest { term }) => {
            let coordinator = build_coordinator(&config, None)?;
            let wait = config.audit_window() + Duration::from_secs(config.request_timeout_secs);
            search::run_suggest(&coordinator, &term, wait).await?;
        }
        Some(Commands::Interactive { location }) => {
            let coordinator = build_coordinator(&config, location.as_deref())?;
            interactive::run_interactive(coordinator).await?;
        }
        None => println!("no command given; try `dinesearch --help`"),
    }

    Ok(())
}
