//! Telemetry sampling loop: one sensor sweep per second into the CSV sink.

pub mod sink;

pub use sink::CsvSink;

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::sensors;

pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// Sample until the duration bound elapses or `cancel` trips; either way
/// the loop exits within one sample period. The bound is a soft deadline
/// checked once per tick. Returns the number of records written.
pub async fn run(
    duration_secs: Option<u64>,
    sink: &mut CsvSink,
    cancel: &CancellationToken,
) -> Result<usize> {
    let started = Instant::now();
    let mut interval = tokio::time::interval(SAMPLE_PERIOD);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut written = 0usize;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!(samples = written, "Sampling cancelled");
                break;
            }
            _ = interval.tick() => {
                if let Some(bound) = duration_secs {
                    if started.elapsed().as_secs() >= bound {
                        info!(samples = written, "Duration elapsed");
                        break;
                    }
                }
                let sample = sensors::sample();
                debug!(
                    temp_c = ?sample.temp_c,
                    freq_khz = ?sample.freq_khz,
                    load1 = ?sample.load1,
                    throttle = ?sample.throttle_hex,
                    "Sample"
                );
                sink.append(&sample)?;
                written += 1;
            }
        }
    }

    Ok(written)
}
