//! Sensor access with per-field fallback chains.
//!
//! Every reader is a read-only OS query that degrades to `None` when its
//! backing source is missing or unreadable. Fields fail independently: a
//! host without `vcgencmd` still reports temperature from the thermal zone,
//! and a host without cpufreq still reports load average.

pub mod frequency;
pub mod load_avg;
pub mod temperature;
pub mod throttle;

use chrono::{DateTime, Local};
use serde::Serialize;

/// One telemetry record. Absent fields stay `None`; they are never
/// substituted with zeros.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Local>,
    pub temp_c: Option<f64>,
    pub freq_khz: Option<u64>,
    pub load1: Option<f64>,
    pub throttle_hex: Option<String>,
}

/// Sweep all four sensors once and stamp the result.
pub fn sample() -> Sample {
    Sample {
        timestamp: Local::now(),
        temp_c: temperature::read(),
        freq_khz: frequency::read(),
        load1: load_avg::read(),
        throttle_hex: throttle::read(),
    }
}
