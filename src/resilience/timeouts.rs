//! Timeout resolution.
//!
//! The process-wide timeout is only a fallback. A per-call override is
//! applied to that request alone and never written back anywhere.

use std::time::Duration;

/// Effective deadline for one request: the override when it is set and
/// non-zero, otherwise the default.
pub fn resolve_timeout(override_timeout: Option<Duration>, default: Duration) -> Duration {
    match override_timeout {
        Some(timeout) if !timeout.is_zero() => timeout,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let d = resolve_timeout(Some(Duration::from_secs(5)), Duration::from_secs(30));
        assert_eq!(d, Duration::from_secs(5));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(resolve_timeout(None, Duration::from_secs(30)), Duration::from_secs(30));
        assert_eq!(
            resolve_timeout(Some(Duration::ZERO), Duration::from_secs(30)),
            Duration::from_secs(30)
        );
    }
}
