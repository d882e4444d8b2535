//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the plugin.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root settings, loaded once at startup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Outbound HTTP client settings.
    pub http: HttpConfig,

    /// Webhook settings (carried for the host; unused by the HTTP core).
    pub webhook: WebhookConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Default per-request timeout in seconds (`HTTP_TIMEOUT`).
    pub timeout_secs: u64,

    /// Number of retries after the first attempt (`HTTP_RETRY`).
    pub retry: u32,

    /// How long an idle pooled connection is kept, in seconds.
    pub pool_idle_timeout_secs: u64,

    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,

    /// User-Agent sent on every request.
    pub user_agent: String,
}

impl HttpConfig {
    /// Default timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Idle timeout as a [`Duration`].
    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retry: 0,
            pool_idle_timeout_secs: 90,
            pool_max_idle_per_host: 32,
            user_agent: concat!("comflow/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Webhook configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Path prefix for webhook routes.
    pub base_path: String,

    /// Optional shared secret for webhook verification.
    pub secret_token: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_path: "/webhook".to_string(),
            secret_token: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
