use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "http://localhost:3000");
    assert!(cfg.api_key.is_none());
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 250);
    assert_eq!(cfg.audit_window_ms, 1000);
    assert_eq!(cfg.audit_window(), Duration::from_secs(1));
    assert!(cfg.default_location.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("DINESEARCH_ENV", "test");
    map.insert("DINESEARCH_API_BASE_URL", "https://search.example.com");
    map.insert("DINESEARCH_API_KEY", "secret");
    map.insert("DINESEARCH_AUDIT_WINDOW_MS", "300");
    map.insert("DINESEARCH_MAX_RETRIES", "0");
    map.insert("DINESEARCH_DEFAULT_LOCATION", "Chicago");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Test);
    assert_eq!(cfg.api_base_url, "https://search.example.com");
    assert_eq!(cfg.api_key.as_deref(), Some("secret"));
    assert_eq!(cfg.audit_window(), Duration::from_millis(300));
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.default_location.as_deref(), Some("Chicago"));
}

#[test]
fn build_app_config_treats_blank_optional_values_as_unset() {
    let mut map = HashMap::new();
    map.insert("DINESEARCH_API_KEY", "   ");
    map.insert("DINESEARCH_DEFAULT_LOCATION", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_key.is_none());
    assert!(cfg.default_location.is_none());
}

#[test]
fn build_app_config_requires_base_url_in_production() {
    let mut map = HashMap::new();
    map.insert("DINESEARCH_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DINESEARCH_API_BASE_URL"),
        "expected MissingEnvVar(DINESEARCH_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("DINESEARCH_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DINESEARCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(DINESEARCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_audit_window() {
    let mut map = HashMap::new();
    map.insert("DINESEARCH_AUDIT_WINDOW_MS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DINESEARCH_AUDIT_WINDOW_MS"),
        "expected InvalidEnvVar(DINESEARCH_AUDIT_WINDOW_MS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("DINESEARCH_API_KEY", "super-secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-token"));
    assert!(rendered.contains("[redacted]"));
}
