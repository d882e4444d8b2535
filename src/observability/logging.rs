//! Structured logging setup.
//!
//! Library code only emits `tracing` events; the binary (or the embedding
//! host) installs the subscriber once.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("comflow={},reqwest=warn", level.to_ascii_lowercase())
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
///
/// Returns false when a subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer().with_thread_names(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("DEBUG"), "comflow=debug,reqwest=warn");
    }

    #[test]
    fn test_second_init_is_harmless() {
        init_logging("info");
        assert!(!init_logging("info"));
    }
}
