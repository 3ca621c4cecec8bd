//! Load generation engine: stress-ng wrapper + built-in fallback workers.
//!
//! Exactly one backend is active per run. The generator owns every worker
//! handle; `stop()` leaves zero live handles behind on every call.

pub mod builtin;
pub mod stress_ng;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to spawn {backend} worker: {source}")]
    SpawnFailed {
        backend: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// One running load worker: either the supervised external process or a
/// spawned blocking task.
pub enum WorkerHandle {
    Process(tokio::process::Child),
    Task(tokio::task::JoinHandle<()>),
}

/// Backend seam. `start` spawns the workers and hands their handles to the
/// generator; teardown is the generator's job.
#[async_trait::async_trait]
pub trait LoadBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn start(
        &self,
        workers: usize,
        duration_secs: Option<u64>,
        cancel: CancellationToken,
    ) -> Result<Vec<WorkerHandle>, LoadError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Running,
    Stopped,
}

pub struct LoadGenerator {
    state: LoadState,
    handles: Vec<WorkerHandle>,
    cancel: CancellationToken,
    engine: &'static str,
}

impl LoadGenerator {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            handles: Vec::new(),
            cancel: CancellationToken::new(),
            engine: "none",
        }
    }

    /// Start load with the preferred backend: stress-ng when installed,
    /// built-in workers otherwise.
    pub async fn start(
        &mut self,
        workers: usize,
        duration_secs: Option<u64>,
    ) -> Result<(), LoadError> {
        if stress_ng::available() {
            self.start_with(&stress_ng::StressNg, workers, duration_secs)
                .await
        } else {
            info!("stress-ng not found; falling back to built-in workers");
            self.start_with(&builtin::Builtin, workers, duration_secs)
                .await
        }
    }

    pub async fn start_with(
        &mut self,
        backend: &dyn LoadBackend,
        workers: usize,
        duration_secs: Option<u64>,
    ) -> Result<(), LoadError> {
        info!(engine = backend.name(), workers, "Starting load generator");
        self.handles = backend
            .start(workers, duration_secs, self.cancel.child_token())
            .await?;
        self.engine = backend.name();
        self.state = LoadState::Running;
        Ok(())
    }

    /// Tear down every live worker. Safe to call repeatedly and safe to
    /// call before `start`; returns once no handles remain.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        for handle in self.handles.drain(..) {
            match handle {
                WorkerHandle::Process(child) => stress_ng::terminate(child).await,
                WorkerHandle::Task(task) => {
                    let _ = task.await;
                }
            }
        }
        if self.state == LoadState::Running {
            info!(engine = self.engine, "Load generator stopped");
        } else {
            debug!("Load generator stop with no live workers");
        }
        self.state = LoadState::Stopped;
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn engine(&self) -> &'static str {
        self.engine
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }
}

impl Default for LoadGenerator {
    fn default() -> Self {
        Self::new()
    }
}
