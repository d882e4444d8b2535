//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! HttpClient::request:
//!     → timeouts.rs (resolve the effective per-call deadline)
//!     → retries.rs (attempt, classify failure, retry transient ones)
//!     → backoff.rs (delay before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Every outbound call has a deadline; a timeout counts as transient
//! - Only transport-level failures are retried, never HTTP statuses
//! - The delay grows linearly from a monotonic attempt counter and is capped
//! - No jitter: the delay table is exact

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{retry, Retryable, RetryPolicy};
