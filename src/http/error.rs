//! Request failure taxonomy.
//!
//! Transient failures (timeouts, connection-level errors) are retried by
//! the client; everything else, including non-2xx statuses, is fatal.

use thiserror::Error;

use crate::resilience::Retryable;

/// Maximum number of characters of a response body kept in [`HttpError::BadStatus`].
pub const BODY_SNIPPET_CHARS: usize = 300;

/// Errors produced by [`crate::http::HttpClient::request`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] reqwest::Error),

    /// The pool's I/O runtime could not be started.
    #[error("failed to start pool runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The request could not be built (bad URL, header, or method).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The attempt exceeded its deadline.
    #[error("request to {url} timed out: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A connection could not be established.
    #[error("connection to {url} failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The connection broke while sending or reading the body.
    #[error("transport error talking to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The attempt's task on the pool runtime panicked or was cancelled.
    #[error("request to {url} aborted: {source}")]
    Aborted {
        url: String,
        #[source]
        source: tokio::task::JoinError,
    },

    /// Any other client failure (redirect loops, unexpected errors).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl HttpError {
    /// Classify a reqwest error raised while talking to `url`.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_builder() {
            HttpError::InvalidRequest(source.to_string())
        } else if source.is_timeout() {
            HttpError::Timeout { url, source }
        } else if source.is_connect() {
            HttpError::Connect { url, source }
        } else if source.is_request() || source.is_body() || source.is_decode() {
            HttpError::Transport { url, source }
        } else {
            HttpError::Request { url, source }
        }
    }

    /// Build a [`HttpError::BadStatus`] with a truncated body snippet.
    pub fn bad_status(status: u16, body: &str) -> Self {
        HttpError::BadStatus {
            status,
            body: truncate_body(body, BODY_SNIPPET_CHARS),
        }
    }

    /// Status code, when the failure is a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Retryable for HttpError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            HttpError::Timeout { .. } | HttpError::Connect { .. } | HttpError::Transport { .. }
        )
    }
}

/// Truncate `body` to at most `max_chars` characters, marking the cut.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
