//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! comflow.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (HTTP_TIMEOUT, HTTP_RETRY, ...)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → consumed once by lifecycle::AppContext
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; nothing mutates them at runtime
//! - All fields have defaults to allow an absent config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, ConfigError};
pub use schema::HttpConfig;
pub use schema::ObservabilityConfig;
pub use schema::Settings;
pub use schema::WebhookConfig;
