use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "thermasoak",
    about = "Appliance-grade CPU soak and thermal characterization",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a soak: sustained CPU load with 1 Hz telemetry logging
    Run {
        /// Duration in seconds (0 = run until Ctrl-C)
        #[arg(long, default_value_t = 0)]
        duration: u64,

        /// CPU workers (0 = one per logical core)
        #[arg(long, default_value_t = 0)]
        workers: usize,

        /// Output CSV path (default: thermasoak-<timestamp>.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Leave the CPU scaling governor untouched
        #[arg(long)]
        no_governor: bool,
    },

    /// Read all sensors once and print a snapshot
    Sensors {
        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            duration,
            workers,
            output,
            no_governor,
        } => {
            let session = thermasoak::Session::resolve(duration, workers, output, !no_governor)?;
            thermasoak::run(session).await?;
        }
        Commands::Sensors { json } => {
            let sample = thermasoak::sensors::sample();
            if json {
                println!("{}", serde_json::to_string_pretty(&sample)?);
            } else {
                let show = |v: Option<String>| v.unwrap_or_else(|| "n/a".to_string());
                println!("\nThermaSoak Sensor Snapshot");
                println!("{:<12} | Value", "Sensor");
                println!("{:-<12}-|-{:-<25}", "", "");
                println!(
                    "{:<12} | {}",
                    "timestamp",
                    sample
                        .timestamp
                        .to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
                );
                println!(
                    "{:<12} | {}",
                    "temp_C",
                    show(sample.temp_c.map(|t| format!("{t:.1}")))
                );
                println!(
                    "{:<12} | {}",
                    "freq_khz",
                    show(sample.freq_khz.map(|f| f.to_string()))
                );
                println!(
                    "{:<12} | {}",
                    "load1",
                    show(sample.load1.map(|l| format!("{l:.2}")))
                );
                println!("{:<12} | {}", "throttle", show(sample.throttle_hex));
                println!();
            }
        }
    }

    Ok(())
}
