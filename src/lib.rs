//! Async HTTP execution substrate for node-graph AI plugins.
//!
//! - [`http::HttpClient`]: pooled client with per-call timeout and bounded retry
//! - [`runtime::spawn_detached`]: run async work from synchronous code on its
//!   own run-loop and thread
//! - [`vendor`]: bearer-authenticated chat-completions / OCR calls built on top

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod runtime;
pub mod vendor;

pub use config::Settings;
pub use http::{HttpClient, HttpError, HttpMethod, RequestSpec, ResponseResult};
pub use lifecycle::AppContext;
pub use runtime::spawn_detached;
