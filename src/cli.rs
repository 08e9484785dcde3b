//! Command-line interface components.

use crate::config::ScanConfig;
use crate::error::Result;
use crate::processor::RinexScanner;
use crate::report::{render_json, render_text};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "rinex-qc")]
#[command(about = "Decode RINEX filenames and headers into quality-check metadata")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// RINEX files, directories, or glob patterns (e.g. 'data/*.16d')
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<String>,

    /// Descend into subdirectories of directory inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,

    /// Worker threads for parsing (defaults to the number of CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Maximum files read and parsed at once
    #[arg(long = "max-concurrent", value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Stop at the first file that fails to parse
    #[arg(long)]
    pub fail_fast: bool,

    /// Include the quality-check window and storage key for each file
    #[arg(long)]
    pub qc_window: bool,

    /// Output format for results
    #[arg(short, long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the appropriate log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars only make sense for interactive human output
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Human
    }

    /// Build the scan configuration from the command line
    pub fn to_config(&self) -> Result<ScanConfig> {
        let mut config = ScanConfig::default();

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(max_files) = self.max_concurrent {
            config = config.with_max_concurrent_files(max_files);
        }
        if self.recursive {
            config = config.with_recursive();
        }
        if self.follow_links {
            config = config.with_follow_links();
        }
        if self.fail_fast {
            config = config.with_fail_fast();
        }
        if !self.show_progress() {
            config = config.without_progress();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Scan the inputs and print the report.
///
/// Returns whether every discovered file parsed.
pub async fn run(args: &Args, config: ScanConfig) -> anyhow::Result<bool> {
    let mut scanner =
        RinexScanner::new(args.paths.clone(), config).context("Invalid scan configuration")?;
    let report = scanner.scan().await.context("Scan failed")?;

    match args.format {
        OutputFormat::Human => print!("{}", render_text(&report, args.qc_window)),
        OutputFormat::Json => println!("{}", render_json(&report, args.qc_window)?),
    }

    info!(
        "Parsed {} of {} files",
        report.stats.files_parsed, report.stats.files_discovered
    );
    Ok(report.is_clean())
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rinex_qc={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}
