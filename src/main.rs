//! logstat CLI
//!
//! Command-line interface for the log statistics pipeline:
//! - Analyze sorted log files into time-bucketed per-level counts
//! - Generate synthetic test log files
//! - Emit a default configuration file

use anyhow::Context;
use clap::{Parser, Subcommand};
use logstat::config::{generate_default_config, Config};
use logstat::generator::LogGenerator;
use logstat::pipeline;
use logstat::stats::{BucketPeriod, TimeUnit};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "logstat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Per-level occurrence counts over time buckets, merged from sorted log files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (default: standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze sorted log files into bucketed level counts
    Analyze {
        /// Input files (default: the configured file list)
        files: Vec<PathBuf>,

        /// Bucket period length
        #[arg(short, long)]
        period: Option<i64>,

        /// Bucket period unit (milliseconds, seconds, minutes, hours)
        #[arg(short, long)]
        unit: Option<TimeUnit>,
    },

    /// Generate synthetic, per-file sorted test log files
    Generate {
        /// Output directory
        #[arg(long, default_value = "data")]
        dir: PathBuf,

        /// Number of log files
        #[arg(long, default_value = "10")]
        files: usize,

        /// Total number of records across all files
        #[arg(long, default_value = "1000")]
        records: usize,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    match cli.command {
        Commands::Analyze {
            files,
            period,
            unit,
        } => {
            let files = if files.is_empty() {
                config.input.resolve_files()
            } else {
                files
            };
            let amount = period.unwrap_or(config.bucket.period);
            anyhow::ensure!(amount > 0, "bucket period must be positive, got {amount}");
            let period = BucketPeriod::new(amount, unit.unwrap_or(config.bucket.unit));

            tracing::info!("Analyzing {} files", files.len());
            let buckets = pipeline::run(&files, period)?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&buckets)?),
                _ => {
                    for bucket in &buckets {
                        println!("{bucket}");
                    }
                }
            }
        }

        Commands::Generate {
            dir,
            files,
            records,
        } => {
            let start = chrono::Utc::now().naive_utc();
            let mut generator = LogGenerator::new(start);
            let paths = generator
                .write_files(&dir, files, records)
                .with_context(|| format!("failed to write log files under {:?}", dir))?;
            tracing::info!("Generated {} records across {} files", records, paths.len());
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write config to {:?}", path))?;
                    tracing::info!("Wrote default config to {:?}", path);
                }
                None => print!("{content}"),
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("logstat={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
