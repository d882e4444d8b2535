//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! handler builds RequestSpec (request.rs)
//!     → client.rs (validate, resolve timeout, acquire pool)
//!     → pool.rs (keep-alive connections, driven on the pool's own runtime)
//!     → resilience::retry (transient failures only)
//!     → response.rs (JSON or text)
//!     → error.rs (Timeout | Connect | Transport | BadStatus | ...)
//! ```

pub mod client;
pub mod error;
pub mod pool;
pub mod request;
pub mod response;

pub use client::{HttpClient, RequestHandle};
pub use error::HttpError;
pub use pool::{ConnectionPool, PoolId};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use response::ResponseResult;
