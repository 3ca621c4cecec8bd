use std::path::Path;

/// Current scaling frequency candidates, preferred first. policy0 covers
/// modern kernels; the per-cpu path covers older cpufreq layouts.
pub const CANDIDATES: [&str; 2] = [
    "/sys/devices/system/cpu/cpufreq/policy0/scaling_cur_freq",
    "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq",
];

/// Read the current CPU clock in kHz.
pub fn read() -> Option<u64> {
    read_from(CANDIDATES.map(Path::new))
}

pub(crate) fn read_from<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<u64> {
    candidates
        .into_iter()
        .find_map(|path| std::fs::read_to_string(path).ok()?.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_readable_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("policy0");
        let present = dir.path().join("cpu0");
        std::fs::write(&present, "1500000\n").unwrap();
        let got = read_from([missing.as_path(), present.as_path()]);
        assert_eq!(got, Some(1_500_000));
    }

    #[test]
    fn preferred_candidate_shadows_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::write(&a, "2400000").unwrap();
        std::fs::write(&b, "600000").unwrap();
        assert_eq!(read_from([a.as_path(), b.as_path()]), Some(2_400_000));
    }

    #[test]
    fn no_candidates_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        assert_eq!(read_from([a.as_path(), b.as_path()]), None);
    }

    #[test]
    fn malformed_value_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        std::fs::write(&a, "<unsupported>\n").unwrap();
        assert_eq!(read_from([a.as_path()]), None);
    }
}
