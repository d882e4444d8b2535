//! Settings loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load settings: defaults, then the optional TOML file, then process
/// environment overrides, then validation.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Settings::default(),
    };

    apply_overrides(&mut settings, |key| std::env::var(key).ok())?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    tracing::debug!(
        timeout_secs = settings.http.timeout_secs,
        retry = settings.http.retry,
        "Settings loaded"
    );

    Ok(settings)
}

/// Apply `HTTP_TIMEOUT`, `HTTP_RETRY`, `WEBHOOK_BASE_PATH` and
/// `SECRET_TOKEN` from `lookup` on top of `settings`.
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("HTTP_TIMEOUT") {
        settings.http.timeout_secs = parse_env("HTTP_TIMEOUT", value)?;
    }
    if let Some(value) = lookup("HTTP_RETRY") {
        settings.http.retry = parse_env("HTTP_RETRY", value)?;
    }
    if let Some(value) = lookup("WEBHOOK_BASE_PATH") {
        settings.webhook.base_path = value;
    }
    if let Some(value) = lookup("SECRET_TOKEN") {
        settings.webhook.secret_token = value;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
