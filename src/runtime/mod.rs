//! Async/sync boundary.
//!
//! # Data Flow
//! ```text
//! synchronous handler
//!     → bridge::spawn_detached(work)
//!         → new current-thread runtime (ExecutionContext)
//!         → dedicated worker thread drives `work` to completion
//!         → runtime dropped, output sent to the handle
//!     ← DetachedHandle returned immediately
//! ```
//!
//! # Design Decisions
//! - One runtime and one thread per spawn; nothing is shared between them
//! - Dropping the handle is fire-and-forget; joining it yields output or panic
//! - Safe to call from inside another runtime: the caller's loop is never used

pub mod bridge;

pub use bridge::{spawn_detached, BridgeError, ContextId, DetachedHandle};
