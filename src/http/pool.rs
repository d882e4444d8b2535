//! Connection pool ownership.
//!
//! # Responsibilities
//! - Own one long-lived `reqwest::Client` (keep-alive connection pool)
//! - Own the I/O runtime that drives every pooled connection
//! - Give every pool a unique ID so reuse is observable
//! - Track an explicit closed state; a closed pool is never handed out again
//!
//! # Design Decisions
//! - hyper runs each connection's dispatch task on the runtime that opened
//!   it, so all sends are spawned onto the pool's own runtime. Callers on
//!   short-lived runtimes only await the result.
//! - Dropping the pool shuts its runtime down in the background, closing
//!   every pooled socket. This is safe from inside an async context.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

use crate::config::HttpConfig;
use crate::http::error::HttpError;

/// Global counter for pool IDs. Only uniqueness matters.
static POOL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Worker threads driving pooled connections.
const IO_WORKER_THREADS: usize = 2;

/// Unique identifier for a pool instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u64);

impl PoolId {
    fn next() -> Self {
        Self(POOL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pool-{}", self.0)
    }
}

/// A pooled set of keep-alive connections and the runtime they live on.
///
/// Usable from any thread or runtime: work is handed to [`ConnectionPool::spawn`]
/// and the caller only awaits the join handle.
#[derive(Debug)]
pub struct ConnectionPool {
    id: PoolId,
    client: reqwest::Client,
    io: Option<Runtime>,
    handle: Handle,
    closed: AtomicBool,
    created_at: Instant,
}

impl ConnectionPool {
    /// Build a pool from HTTP settings.
    pub fn build(config: &HttpConfig) -> Result<Self, HttpError> {
        let id = PoolId::next();

        let io = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(IO_WORKER_THREADS)
            .thread_name(format!("comflow-io-{}", id.0))
            .enable_all()
            .build()
            .map_err(HttpError::Runtime)?;

        let client = {
            let _guard = io.enter();
            reqwest::Client::builder()
                .pool_idle_timeout(config.pool_idle_timeout())
                .pool_max_idle_per_host(config.pool_max_idle_per_host)
                .user_agent(config.user_agent.clone())
                .build()
        };
        let client = match client {
            Ok(client) => client,
            Err(e) => {
                io.shutdown_background();
                return Err(HttpError::Pool(e));
            }
        };

        let pool = Self {
            id,
            client,
            handle: io.handle().clone(),
            io: Some(io),
            closed: AtomicBool::new(false),
            created_at: Instant::now(),
        };

        tracing::info!(
            pool = %pool.id,
            max_idle_per_host = config.pool_max_idle_per_host,
            idle_timeout_secs = config.pool_idle_timeout_secs,
            "Connection pool created"
        );

        Ok(pool)
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Run `fut` on the pool's I/O runtime.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(fut)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Mark the pool closed. Connections are released when the last holder
    /// drops it.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!(
                pool = %self.id,
                age_secs = self.created_at.elapsed().as_secs(),
                "Connection pool closed"
            );
        }
    }
}

impl Drop for ConnectionPool {
    fn drop(&mut self) {
        if let Some(io) = self.io.take() {
            io.shutdown_background();
            tracing::debug!(pool = %self.id, "Connection pool released");
        }
    }
}
