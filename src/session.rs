//! Run configuration, resolved once at startup and read-only thereafter.

use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;

/// Sanity ceiling; a soak wants one worker per core, not thousands.
pub const MAX_WORKERS: usize = 1024;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("worker count {0} exceeds the supported maximum of {MAX_WORKERS}")]
    TooManyWorkers(usize),
}

#[derive(Debug, Clone)]
pub struct Session {
    /// None = run until externally cancelled.
    pub duration_secs: Option<u64>,
    pub workers: usize,
    pub output: PathBuf,
    pub set_governor: bool,
}

impl Session {
    /// Resolve CLI inputs. Zero duration means unbounded; zero workers
    /// means one per detected logical core; absent output derives a
    /// timestamped file name in the current directory.
    pub fn resolve(
        duration: u64,
        workers: usize,
        output: Option<PathBuf>,
        set_governor: bool,
    ) -> Result<Self, SessionError> {
        if workers > MAX_WORKERS {
            return Err(SessionError::TooManyWorkers(workers));
        }
        let workers = if workers == 0 {
            detected_cores()
        } else {
            workers
        };
        let output = output.unwrap_or_else(default_output);
        Ok(Self {
            duration_secs: (duration > 0).then_some(duration),
            workers,
            output,
            set_governor,
        })
    }
}

fn detected_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_output() -> PathBuf {
    PathBuf::from(format!(
        "thermasoak-{}.csv",
        Local::now().format("%Y%m%d-%H%M%S")
    ))
}
