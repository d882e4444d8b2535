//! Detached execution contexts.

use std::any::Any;
use std::future::Future;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

/// Global counter for execution context IDs.
static CONTEXT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    fn next() -> Self {
        Self(CONTEXT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// Failures of the bridge itself, never of the submitted work's own logic.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The run-loop could not be created.
    #[error("failed to build execution context: {0}")]
    Runtime(#[source] std::io::Error),

    /// The worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The submitted work panicked.
    #[error("detached work panicked: {0}")]
    Panicked(String),

    /// The worker exited without delivering an output.
    #[error("execution context {0} ended without a result")]
    Lost(ContextId),
}

type Outcome<T> = Result<T, BridgeError>;

/// Handle to work running on its own execution context.
///
/// Dropping the handle detaches the work; it keeps running to completion.
#[derive(Debug)]
pub struct DetachedHandle<T> {
    id: ContextId,
    thread: JoinHandle<()>,
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> DetachedHandle<T> {
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// True once the worker thread has exited and its run-loop is gone.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block the current thread until the work is done.
    pub fn join(self) -> Result<T, BridgeError> {
        let DetachedHandle { id, thread, mut rx } = self;
        if thread.join().is_err() {
            return Err(BridgeError::Panicked("worker thread panicked".into()));
        }
        match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(BridgeError::Lost(id)),
        }
    }

    /// Wait asynchronously for the work's output.
    pub async fn wait(self) -> Result<T, BridgeError> {
        let DetachedHandle { id, rx, .. } = self;
        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(BridgeError::Lost(id)),
        }
    }

    /// Explicitly give up on the output.
    pub fn detach(self) {
        tracing::trace!(context = %self.id, "Handle detached");
    }
}

/// Run `work` to completion on a fresh run-loop owned by a new thread.
///
/// Returns as soon as the thread is started. The run-loop is built on that
/// thread and torn down there when `work` finishes or panics.
pub fn spawn_detached<F>(work: F) -> Result<DetachedHandle<F::Output>, BridgeError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    spawn_with(work, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
    })
}

fn spawn_with<F, B>(work: F, build: B) -> Result<DetachedHandle<F::Output>, BridgeError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
    B: FnOnce() -> io::Result<Runtime> + Send + 'static,
{
    let id = ContextId::next();
    let (tx, rx) = oneshot::channel();

    let thread = thread::Builder::new()
        .name(format!("comflow-{}", id))
        .spawn(move || {
            let outcome = match build() {
                Ok(runtime) => {
                    tracing::debug!(context = %id, "Execution context started");
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| runtime.block_on(work)))
                        .map_err(|payload| BridgeError::Panicked(panic_message(payload)));

                    // Teardown before reporting, so a joined handle implies a dead loop.
                    drop(runtime);
                    outcome
                }
                Err(e) => Err(BridgeError::Runtime(e)),
            };

            match &outcome {
                Ok(_) => tracing::debug!(context = %id, "Execution context finished"),
                Err(err) => tracing::error!(context = %id, error = %err, "Detached work failed"),
            }

            // Receiver may be gone (fire-and-forget).
            let _ = tx.send(outcome);
        })
        .map_err(BridgeError::Spawn)?;

    Ok(DetachedHandle { id, thread, rx })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
