//! Pooled HTTP request primitive.
//!
//! # Responsibilities
//! - Own the connection pool and recreate it transparently once closed
//! - Resolve the effective timeout per call without touching shared state
//! - Retry transport-level failures with capped linear backoff
//! - Decode the body as JSON, falling back to text
//!
//! # Design Decisions
//! - Non-2xx statuses are returned as `HttpError::BadStatus` and never retried
//! - A retry resends the same `RequestSpec` untouched
//! - The pool survives any single request's failure

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;

use crate::config::HttpConfig;
use crate::http::error::HttpError;
use crate::http::pool::{ConnectionPool, PoolId};
use crate::http::request::{RequestBody, RequestSpec};
use crate::http::response::ResponseResult;
use crate::resilience::timeouts::resolve_timeout;
use crate::resilience::{retry, RetryPolicy};
use crate::runtime::{spawn_detached, BridgeError, DetachedHandle};

/// Handle to a request running on a detached execution context.
pub type RequestHandle = DetachedHandle<Result<ResponseResult, HttpError>>;

/// Cheaply cloneable handle to a shared pooled client.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

struct Inner {
    /// Empty after `close()` until the next request installs a fresh pool.
    pool: ArcSwapOption<ConnectionPool>,
    config: HttpConfig,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Create a client using `config.retry` as the retry bound.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        Self::with_policy(config, RetryPolicy::new(config.retry))
    }

    /// Create a client with an explicit retry policy.
    pub fn with_policy(config: &HttpConfig, policy: RetryPolicy) -> Result<Self, HttpError> {
        let pool = ConnectionPool::build(config)?;
        Ok(Self {
            inner: Arc::new(Inner {
                pool: ArcSwapOption::from_pointee(pool),
                config: config.clone(),
                policy,
            }),
        })
    }

    /// Timeout used when a request carries no override.
    pub fn default_timeout(&self) -> Duration {
        self.inner.config.timeout()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.inner.policy
    }

    /// ID of the installed pool, `None` while closed.
    pub fn pool_id(&self) -> Option<PoolId> {
        self.inner.pool.load().as_ref().map(|pool| pool.id())
    }

    /// Return the live pool, installing a fresh one if it was closed.
    pub fn pool(&self) -> Result<Arc<ConnectionPool>, HttpError> {
        loop {
            let current = self.inner.pool.load_full();
            if let Some(pool) = current.as_ref().filter(|pool| !pool.is_closed()) {
                return Ok(Arc::clone(pool));
            }

            let fresh = Arc::new(ConnectionPool::build(&self.inner.config)?);
            let previous = self
                .inner
                .pool
                .compare_and_swap(&current, Some(Arc::clone(&fresh)));

            if previous.as_ref().map(Arc::as_ptr) == current.as_ref().map(Arc::as_ptr) {
                tracing::info!(pool = %fresh.id(), "Installed connection pool");
                return Ok(fresh);
            }
            // Another caller swapped first; `fresh` is dropped and we reload.
        }
    }

    /// Close and release the current pool. In-flight requests keep it alive
    /// until they finish; the next request builds a new one.
    pub fn close(&self) {
        if let Some(pool) = self.inner.pool.swap(None) {
            pool.close();
        }
    }

    /// Issue one logical request with bounded retries.
    pub async fn request(&self, spec: &RequestSpec) -> Result<ResponseResult, HttpError> {
        let url = spec.validate()?;
        let pool = self.pool()?;
        let timeout = resolve_timeout(spec.timeout_override(), self.default_timeout());

        tracing::debug!(
            method = %spec.method(),
            url = %url,
            timeout_ms = timeout.as_millis() as u64,
            pool = %pool.id(),
            "Dispatching request"
        );

        retry(&self.inner.policy, |attempt| {
            Self::attempt(&pool, spec, &url, timeout, attempt)
        })
        .await
    }

    /// Launch `spec` from synchronous code on its own execution context.
    ///
    /// Returns immediately. Failures are logged by the detached work; join
    /// or await the handle to observe them.
    pub fn spawn_request(&self, spec: RequestSpec) -> Result<RequestHandle, BridgeError> {
        let client = self.clone();
        spawn_detached(async move {
            let result = client.request(&spec).await;
            if let Err(err) = &result {
                tracing::warn!(
                    method = %spec.method(),
                    url = %spec.url(),
                    error = %err,
                    "Detached request failed"
                );
            }
            result
        })
    }

    async fn attempt(
        pool: &ConnectionPool,
        spec: &RequestSpec,
        url: &url::Url,
        timeout: Duration,
        attempt: u32,
    ) -> Result<ResponseResult, HttpError> {
        let mut builder = pool
            .client()
            .request(spec.method().into(), url.clone())
            .timeout(timeout);

        for (name, value) in spec.header_pairs() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match spec.body() {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Raw(bytes)) => builder.body(bytes.to_vec()),
            None => builder,
        };

        // Connection I/O stays on the pool runtime; this task only waits.
        let exchange = pool.spawn(async move {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        });

        let (status, text) = exchange
            .await
            .map_err(|source| HttpError::Aborted {
                url: spec.url().to_string(),
                source,
            })?
            .map_err(|e| HttpError::from_reqwest(spec.url(), e))?;

        tracing::debug!(attempt, status = status.as_u16(), bytes = text.len(), "Response received");

        if !status.is_success() {
            return Err(HttpError::bad_status(status.as_u16(), &text));
        }

        Ok(ResponseResult::decode(text))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("pool", &self.pool_id())
            .field("timeout_secs", &self.inner.config.timeout_secs)
            .field("max_retries", &self.inner.policy.max_retries)
            .finish()
    }
}
