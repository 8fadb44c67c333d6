use anyhow::Context;
use clap::Parser;
use rack_report::ReportProcessor;
use rack_report::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.load_config().context("Failed to load configuration")?;
    let now = args.reference_time();

    let processor = ReportProcessor::new(config)?;
    let stats = processor.process(now).with_context(|| {
        format!(
            "Failed to generate reports from {}",
            processor.config().source_path.display()
        )
    })?;

    if !args.quiet {
        cli::print_summary(&stats, now);
    }

    Ok(())
}
