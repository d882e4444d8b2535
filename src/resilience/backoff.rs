//! Capped linear backoff.

use std::time::Duration;

/// Delay after the `attempt`-th failed attempt (1-based):
/// `min(step_ms * attempt, max_ms)`.
pub fn calculate_backoff(attempt: u32, step_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let delay_ms = step_ms.saturating_mul(u64::from(attempt));
    Duration::from_millis(delay_ms.min(max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_table() {
        let delays: Vec<u128> = (1..=6)
            .map(|k| calculate_backoff(k, 500, 2000).as_millis())
            .collect();
        assert_eq!(delays, vec![500, 1000, 1500, 2000, 2000, 2000]);
    }

    #[test]
    fn test_backoff_non_decreasing() {
        let mut prev = Duration::ZERO;
        for k in 1..20 {
            let d = calculate_backoff(k, 500, 2000);
            assert!(d >= prev);
            prev = d;
        }
    }

    #[test]
    fn test_zero_and_overflow() {
        assert_eq!(calculate_backoff(0, 500, 2000), Duration::ZERO);
        assert_eq!(calculate_backoff(u32::MAX, u64::MAX, 2000).as_millis(), 2000);
    }
}
