//! Observability subsystem.
//!
//! Every subsystem emits `tracing` events with structured fields (pool ID,
//! execution context, attempt number). `logging.rs` turns them into output.

pub mod logging;

pub use logging::init_logging;
