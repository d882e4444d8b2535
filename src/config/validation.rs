//! Settings validation.
//!
//! Serde handles the syntax; this checks value ranges. All errors are
//! collected rather than stopping at the first one.

use thiserror::Error;

use crate::config::schema::Settings;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("http.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("webhook.base_path must start with '/', got {0:?}")]
    WebhookPath(String),

    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Validate settings, returning every problem found.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.http.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !settings.webhook.base_path.starts_with('/') {
        errors.push(ValidationError::WebhookPath(settings.webhook.base_path.clone()));
    }

    let level = settings.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(settings.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
