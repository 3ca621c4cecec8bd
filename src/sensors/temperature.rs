use std::path::Path;
use std::process::Command;

/// Kernel thermal zone 0. On the Pi this is the SoC sensor.
pub const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Read the SoC temperature in degrees Celsius.
/// Tries `vcgencmd measure_temp` first, then the thermal zone pseudo-file.
pub fn read() -> Option<f64> {
    read_vcgencmd().or_else(|| read_thermal_zone(Path::new(THERMAL_ZONE)))
}

fn read_vcgencmd() -> Option<f64> {
    let out = Command::new("vcgencmd").arg("measure_temp").output().ok()?;
    if !out.status.success() {
        return None;
    }
    parse_vcgencmd(&String::from_utf8_lossy(&out.stdout))
}

/// Parse vcgencmd output, format: temp=54.0'C
pub(crate) fn parse_vcgencmd(raw: &str) -> Option<f64> {
    let value = raw.trim().strip_prefix("temp=")?;
    let value = value.trim_end_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
    value.parse().ok()
}

/// Thermal zone files report millidegrees; round to one decimal.
pub(crate) fn read_thermal_zone(path: &Path) -> Option<f64> {
    let raw = std::fs::read_to_string(path).ok()?;
    let milli: f64 = raw.trim().parse().ok()?;
    Some((milli / 100.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_vcgencmd_output() {
        assert_eq!(parse_vcgencmd("temp=54.0'C\n"), Some(54.0));
        assert_eq!(parse_vcgencmd("temp=71.8'C"), Some(71.8));
    }

    #[test]
    fn rejects_malformed_vcgencmd_output() {
        assert_eq!(parse_vcgencmd("error: unknown command"), None);
        assert_eq!(parse_vcgencmd(""), None);
        assert_eq!(parse_vcgencmd("temp='C"), None);
    }

    #[test]
    fn converts_millidegrees_with_rounding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "54321").unwrap();
        assert_eq!(read_thermal_zone(&path), Some(54.3));
    }

    #[test]
    fn missing_zone_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_thermal_zone(&dir.path().join("nope")), None);
    }

    #[test]
    fn garbage_zone_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp");
        std::fs::write(&path, "not-a-number\n").unwrap();
        assert_eq!(read_thermal_zone(&path), None);
    }
}
