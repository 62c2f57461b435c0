use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a pure
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("DINESEARCH_ENV", "development"));
    let log_level = or_default("DINESEARCH_LOG_LEVEL", "info");

    // Production must point at a real deployment rather than the local dev server.
    let api_base_url = match (optional("DINESEARCH_API_BASE_URL"), &env) {
        (Some(url), _) => url,
        (None, Environment::Production) => {
            return Err(ConfigError::MissingEnvVar(
                "DINESEARCH_API_BASE_URL".to_string(),
            ))
        }
        (None, _) => DEFAULT_API_BASE_URL.to_string(),
    };
    let api_key = optional("DINESEARCH_API_KEY");

    let request_timeout_secs = parse_u64("DINESEARCH_REQUEST_TIMEOUT_SECS", "10")?;
    let max_retries = parse_u32("DINESEARCH_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("DINESEARCH_RETRY_BACKOFF_BASE_MS", "250")?;

    let audit_window_ms = parse_u64("DINESEARCH_AUDIT_WINDOW_MS", "1000")?;
    if audit_window_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DINESEARCH_AUDIT_WINDOW_MS".to_string(),
            reason: "audit window must be greater than zero".to_string(),
        });
    }

    let default_location = optional("DINESEARCH_DEFAULT_LOCATION");

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        api_key,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        audit_window_ms,
        default_location,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
