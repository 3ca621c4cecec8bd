use std::path::Path;

pub const LOADAVG: &str = "/proc/loadavg";

/// Read the one-minute load average.
pub fn read() -> Option<f64> {
    read_path(Path::new(LOADAVG))
}

pub(crate) fn read_path(path: &Path) -> Option<f64> {
    parse(&std::fs::read_to_string(path).ok()?)
}

/// First field of /proc/loadavg, e.g. "2.13 1.98 1.70 3/412 8841"
pub(crate) fn parse(raw: &str) -> Option<f64> {
    raw.split_whitespace().next()?.parse().ok()
}
