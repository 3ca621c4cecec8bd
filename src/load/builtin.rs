//! Built-in CPU workers, used when stress-ng is not installed.

use std::hint::black_box;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{LoadBackend, LoadError, WorkerHandle};

/// Counter wrap boundary. One lap between cancellation checks keeps the
/// loop hot while a stop request still lands within a few milliseconds.
const WRAP_MASK: u64 = (1 << 22) - 1;

pub struct Builtin;

#[async_trait::async_trait]
impl LoadBackend for Builtin {
    fn name(&self) -> &'static str {
        "builtin"
    }

    /// Exactly one blocking task per requested worker. The duration bound
    /// is not enforced here; the sampling loop owns the deadline and the
    /// generator's stop() ends the workers.
    async fn start(
        &self,
        workers: usize,
        _duration_secs: Option<u64>,
        cancel: CancellationToken,
    ) -> Result<Vec<WorkerHandle>, LoadError> {
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let cancel = cancel.clone();
            handles.push(WorkerHandle::Task(tokio::task::spawn_blocking(move || {
                spin(worker, cancel)
            })));
        }
        Ok(handles)
    }
}

fn spin(worker: usize, cancel: CancellationToken) {
    let mut counter: u64 = 0;
    while !cancel.is_cancelled() {
        for _ in 0..=WRAP_MASK {
            counter = black_box(counter.wrapping_add(1) & WRAP_MASK);
        }
        // The one deliberate yield point; keeps the worker preemptible.
        std::thread::yield_now();
    }
    black_box(counter);
    debug!(worker, "Builtin worker stopped");
}
