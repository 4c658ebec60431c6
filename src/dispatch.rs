//! Result dispatcher
//!
//! Hands the outcome of a call to a [`Listener`], optionally on a caller
//! supplied [`Scheduler`] (a UI-affine loop, a runtime, ...). Decoding runs
//! inside the delivered job, so a body that fails to decode reaches
//! `on_failure` instead of escaping. Each call ends in exactly one callback.

use crate::decode::{Decode, decode};
use crate::error::HyperwalletError;
use crate::execution::RawBody;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Callback surface for the listener-based API.
pub trait Listener<T>: Send + 'static {
    /// `None` means the server answered with no content (e.g. 204).
    fn on_success(&self, result: Option<T>);

    fn on_failure(&self, error: HyperwalletError);
}

/// [`Listener`] built from two closures.
pub struct FnListener<S, F> {
    on_success: S,
    on_failure: F,
}

impl<S, F> FnListener<S, F> {
    pub fn new(on_success: S, on_failure: F) -> Self {
        Self {
            on_success,
            on_failure,
        }
    }
}

impl<T, S, F> Listener<T> for FnListener<S, F>
where
    S: Fn(Option<T>) + Send + 'static,
    F: Fn(HyperwalletError) + Send + 'static,
{
    fn on_success(&self, result: Option<T>) {
        (self.on_success)(result)
    }

    fn on_failure(&self, error: HyperwalletError) {
        (self.on_failure)(error)
    }
}

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Execution context that callbacks are delivered on.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, job: Job);
}

/// Runs the job on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, job: Job) {
        job()
    }
}

/// Runs the job as a blocking task on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime of the current task.
    pub fn current() -> Result<Self, HyperwalletError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| HyperwalletError::ConfigurationError(format!("No tokio runtime: {e}")))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, job: Job) {
        self.handle.spawn_blocking(job);
    }
}

/// Enqueues jobs for a single consumer loop, the way a UI main thread drains
/// its message queue.
#[derive(Debug, Clone)]
pub struct QueueScheduler {
    tx: mpsc::UnboundedSender<Job>,
}

/// Consumer side of a [`QueueScheduler`].
pub struct JobQueue {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl QueueScheduler {
    pub fn new() -> (Self, JobQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, JobQueue { rx })
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&self, job: Job) {
        if self.tx.send(job).is_err() {
            tracing::warn!(target: "hyperwallet::dispatch", "job queue closed; callback dropped");
        }
    }
}

impl JobQueue {
    /// Run every job queued so far; returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait for the next job and run it. `false` once every scheduler is gone.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobQueue").finish_non_exhaustive()
    }
}

/// Decode `result` into `T` and invoke exactly one listener callback, on
/// `scheduler` when given, inline otherwise.
pub fn deliver<T, L>(
    result: Result<RawBody, HyperwalletError>,
    listener: L,
    scheduler: Option<&Arc<dyn Scheduler>>,
) where
    T: Decode,
    L: Listener<T>,
{
    let job: Job = Box::new(move || match result.and_then(|raw| decode::<T>(&raw)) {
        Ok(value) => listener.on_success(value),
        Err(error) => listener.on_failure(error),
    });
    match scheduler {
        Some(s) => s.schedule(job),
        None => job(),
    }
}
