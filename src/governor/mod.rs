//! Best-effort CPU scaling governor control.
//!
//! A soak run wants a fixed high clock so the log captures thermal
//! behavior, not governor behavior. Failure here is informational only;
//! the run proceeds with whatever policy the host has.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const CPU_ROOT: &str = "/sys/devices/system/cpu";
const UTILITY: &str = "cpupower";
const PERFORMANCE: &str = "performance";

/// Switch every CPU policy to the `performance` governor.
/// Returns true if at least one attempt took effect. Idempotent.
pub fn apply_performance_mode() -> bool {
    apply_with(UTILITY, Path::new(CPU_ROOT))
}

pub(crate) fn apply_with(utility: &str, cpu_root: &Path) -> bool {
    info!(governor = PERFORMANCE, "Requesting scaling governor change");

    if run_utility(utility) {
        info!("Governor set via {}", utility);
        return true;
    }

    let written = write_sysfs_governors(cpu_root, PERFORMANCE);
    if written > 0 {
        info!(files = written, "Governor set via sysfs");
        true
    } else {
        info!("No governor control surface available; leaving policy unchanged");
        false
    }
}

fn run_utility(utility: &str) -> bool {
    match Command::new(utility)
        .args(["frequency-set", "-g", PERFORMANCE])
        .output()
    {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

/// Write the governor into every discoverable scaling_governor file.
/// Returns the number of files that accepted the write.
pub(crate) fn write_sysfs_governors(cpu_root: &Path, governor: &str) -> usize {
    let mut written = 0;
    for path in governor_files(cpu_root) {
        match fs::write(&path, governor) {
            Ok(()) => {
                debug!(path = %path.display(), "Governor written");
                written += 1;
            }
            Err(e) => debug!(path = %path.display(), "Governor write skipped: {}", e),
        }
    }
    written
}

fn governor_files(cpu_root: &Path) -> Vec<PathBuf> {
    let mut targets = Vec::new();

    // Per-policy layout: cpufreq/policy*/scaling_governor
    if let Ok(entries) = fs::read_dir(cpu_root.join("cpufreq")) {
        for entry in entries.flatten() {
            if entry.file_name().to_string_lossy().starts_with("policy") {
                targets.push(entry.path().join("scaling_governor"));
            }
        }
    }

    // Per-cpu layout: cpu*/cpufreq/scaling_governor
    if let Ok(entries) = fs::read_dir(cpu_root) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with("cpu") && name[3..].chars().all(|c| c.is_ascii_digit()) {
                targets.push(entry.path().join("cpufreq/scaling_governor"));
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_surface_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!apply_with("cpupower-definitely-not-installed", dir.path()));
    }

    #[test]
    fn empty_root_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(write_sysfs_governors(dir.path(), PERFORMANCE), 0);
    }

    #[test]
    fn writes_policy_and_percpu_files() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("cpufreq/policy0");
        let cpu = dir.path().join("cpu2/cpufreq");
        fs::create_dir_all(&policy).unwrap();
        fs::create_dir_all(&cpu).unwrap();
        fs::write(policy.join("scaling_governor"), "ondemand").unwrap();
        fs::write(cpu.join("scaling_governor"), "ondemand").unwrap();

        assert_eq!(write_sysfs_governors(dir.path(), PERFORMANCE), 2);
        assert_eq!(
            fs::read_to_string(policy.join("scaling_governor")).unwrap(),
            PERFORMANCE
        );
        assert_eq!(
            fs::read_to_string(cpu.join("scaling_governor")).unwrap(),
            PERFORMANCE
        );
    }

    #[test]
    fn ignores_non_cpu_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("cpuidle")).unwrap();
        fs::create_dir_all(dir.path().join("hotplug")).unwrap();
        assert_eq!(write_sysfs_governors(dir.path(), PERFORMANCE), 0);
    }
}
