//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     load settings → validate → build HttpClient (pool) → AppContext
//!
//! Handlers:
//!     borrow &AppContext or clone its HttpClient
//!
//! Shutdown:
//!     AppContext::shutdown → close pool
//! ```

pub mod context;

pub use context::AppContext;
