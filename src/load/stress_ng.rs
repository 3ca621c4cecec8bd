//! stress-ng process wrapper -- spawn, supervise, tear down.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{LoadBackend, LoadError, WorkerHandle};

const BINARY: &str = "stress-ng";
const TERM_GRACE: Duration = Duration::from_secs(5);

/// Probe PATH for stress-ng. `--version` exits immediately and doubles as
/// a sanity check that the binary actually runs.
pub fn available() -> bool {
    std::process::Command::new(BINARY)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub struct StressNg;

#[async_trait::async_trait]
impl LoadBackend for StressNg {
    fn name(&self) -> &'static str {
        "stress-ng"
    }

    /// One child process; stress-ng manages its own worker parallelism.
    /// A duration bound is passed through so the child self-terminates.
    async fn start(
        &self,
        workers: usize,
        duration_secs: Option<u64>,
        _cancel: CancellationToken,
    ) -> Result<Vec<WorkerHandle>, LoadError> {
        let mut cmd = Command::new(BINARY);
        cmd.arg("--cpu")
            .arg(workers.to_string())
            .arg("--cpu-method")
            .arg("matrixprod")
            .arg("--verify");
        if let Some(secs) = duration_secs {
            cmd.arg("--timeout").arg(format!("{secs}s"));
        }
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        cmd.kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| LoadError::SpawnFailed {
            backend: BINARY,
            source,
        })?;
        debug!(pid = ?child.id(), workers, "stress-ng spawned");
        Ok(vec![WorkerHandle::Process(child)])
    }
}

/// SIGTERM first so stress-ng reaps its workers, SIGKILL if it lingers.
pub(crate) async fn terminate(mut child: Child) {
    if let Some(pid) = child.id() {
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        }
        match tokio::time::timeout(TERM_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(%status, "stress-ng exited");
                return;
            }
            Ok(Err(e)) => warn!("Error waiting for stress-ng: {}", e),
            Err(_) => warn!("stress-ng ignored SIGTERM; killing"),
        }
    }
    if let Err(e) = child.kill().await {
        warn!("Failed to kill stress-ng: {}", e);
    }
}
