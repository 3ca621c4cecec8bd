//! CSV sink -- header once, one flushed record per sample.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;

use crate::sensors::Sample;

pub const HEADER: &str = "timestamp,temp_C,freq_khz,load1,throttle_hex";

pub struct CsvSink {
    writer: BufWriter<File>,
}

impl CsvSink {
    /// Create the log file and write the header. Failure is fatal; the
    /// caller aborts the run before load starts.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{HEADER}").context("cannot write log header")?;
        writer.flush().context("cannot flush log header")?;
        Ok(Self { writer })
    }

    /// Append one record and flush, so a cut power cable costs at most the
    /// in-flight row.
    pub fn append(&mut self, sample: &Sample) -> Result<()> {
        writeln!(self.writer, "{}", format_row(sample)).context("cannot append sample")?;
        self.writer.flush().context("cannot flush sample")?;
        Ok(())
    }
}

/// Fixed field order: timestamp,temp_C,freq_khz,load1,throttle_hex.
/// Unavailable fields serialize as empty strings, never placeholders.
pub fn format_row(sample: &Sample) -> String {
    format!(
        "{},{},{},{},{}",
        sample.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        sample
            .temp_c
            .map(|t| format!("{t:.1}"))
            .unwrap_or_default(),
        sample
            .freq_khz
            .map(|f| f.to_string())
            .unwrap_or_default(),
        sample
            .load1
            .map(|l| format!("{l:.2}"))
            .unwrap_or_default(),
        sample.throttle_hex.as_deref().unwrap_or(""),
    )
}
