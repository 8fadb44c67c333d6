//! Command-line interface components.

use crate::config::ReportConfig;
use crate::constants::{LOG_TARGET, REPORT_TIMESTAMP_FORMAT};
use crate::models::{KeyField, OutputMode, ReportStats};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "rack-report")]
#[command(about = "Generate valet racking and pulling reports from the parked-location inventory")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Inventory spreadsheet (defaults to ParkedLocationInventory.xlsx)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Inventory spreadsheet, as an alternative to the positional argument
    #[arg(short, long = "input", value_name = "PATH", conflicts_with = "input")]
    pub input_path: Option<PathBuf>,

    /// Sheet holding the inventory
    #[arg(short, long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Write separate to/from files or one combined report
    #[arg(short, long, value_enum)]
    pub mode: Option<OutputMode>,

    /// Split mode: report of vehicles to rack
    #[arg(long, value_name = "PATH")]
    pub to_rack: Option<PathBuf>,

    /// Split mode: report of vehicles to pull from the rack
    #[arg(long, value_name = "PATH")]
    pub from_rack: Option<PathBuf>,

    /// Combined mode: report appended on every run
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Field used to identify reservations
    #[arg(long, value_enum)]
    pub key: Option<KeyField>,

    /// Order each report section by arrival time
    #[arg(long)]
    pub sort_by_arrival: bool,

    /// Reference time instead of the current local time ("YYYY-MM-DD HH:MM:SS")
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_reference_time)]
    pub now: Option<NaiveDateTime>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and skip the summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the run configuration: defaults, then the config file, then flags
    pub fn load_config(&self) -> crate::Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };

        if let Some(input) = self.input.as_ref().or(self.input_path.as_ref()) {
            config.source_path = input.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet_name = sheet.clone();
        }
        if let Some(mode) = self.mode {
            config.output_mode = mode;
        }
        if let Some(path) = &self.to_rack {
            config.to_rack_path = path.clone();
        }
        if let Some(path) = &self.from_rack {
            config.from_rack_path = path.clone();
        }
        if let Some(path) = &self.report {
            config.combined_path = path.clone();
        }
        if let Some(key) = self.key {
            config.key_field = key;
        }
        if self.sort_by_arrival {
            config.sort_by_arrival = true;
        }

        config.validate()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// The reference time for this run
    pub fn reference_time(&self) -> NaiveDateTime {
        self.now.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Parse the `--now` override
pub fn parse_reference_time(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    [REPORT_TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", value))
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

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

/// Print the end-of-run summary
pub fn print_summary(stats: &ReportStats, now: NaiveDateTime) {
    println!("{}", "Rack report complete".bright_green().bold());
    println!(
        "  {} {}",
        "Reference time:".bright_cyan(),
        now.format(REPORT_TIMESTAMP_FORMAT)
    );
    println!(
        "  {} {} rows, {} records",
        "Inventory:".bright_cyan(),
        stats.rows_read.to_string().bright_white().bold(),
        stats.records.to_string().bright_white().bold()
    );
    if stats.duplicate_keys > 0 {
        println!(
            "  {} {} rows replaced an earlier record with the same key",
            "Duplicates:".bright_yellow(),
            stats.duplicate_keys.to_string().bright_white().bold()
        );
    }
    println!(
        "  {} {}",
        "To rack:".bright_cyan(),
        stats.to_rack.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "From rack:".bright_cyan(),
        stats.from_rack.to_string().bright_white().bold()
    );
    for path in &stats.output_paths {
        println!("  {} {}", "Written:".bright_cyan(), path.display());
    }
    println!(
        "  {} {} ms",
        "Time:".bright_cyan(),
        stats.processing_time_ms
    );
}
