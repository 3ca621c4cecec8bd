//! ThermaSoak -- appliance-grade CPU soak and thermal characterization.
//!
//! This crate drives sustained CPU load on a Linux host while sampling
//! thermal, frequency, and throttling telemetry once per second into a
//! CSV log for later analysis.

pub mod governor;
pub mod load;
pub mod sensors;
pub mod session;
pub mod telemetry;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub use session::Session;

/// Run one soak session: governor, load, sampling loop, teardown.
///
/// Once the load generator is running, `stop()` runs on every exit path --
/// normal duration elapse, Ctrl-C, or a sink error.
pub async fn run(session: Session) -> Result<()> {
    info!(
        workers = session.workers,
        duration_secs = ?session.duration_secs,
        output = %session.output.display(),
        "Starting soak session"
    );

    // Fail fast on the sink before any load is applied.
    let mut sink = telemetry::CsvSink::create(&session.output)?;

    if session.set_governor {
        if !governor::apply_performance_mode() {
            warn!("Scaling governor unchanged; log will include frequency ramp-up");
        }
    } else {
        info!("Governor change disabled by configuration");
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received; shutting down");
            signal_cancel.cancel();
        }
    });

    let mut load = load::LoadGenerator::new();
    load.start(session.workers, session.duration_secs).await?;

    let result = telemetry::run(session.duration_secs, &mut sink, &cancel).await;
    load.stop().await;

    let samples = result?;
    info!(samples, output = %session.output.display(), "Soak session complete");
    Ok(())
}
