//! Confirmation latency CLI.
//!
//! Scans node log files for transaction receive and confirm records and
//! prints per-hash delay statistics aggregated across all files.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use env_logger::Env;
use log::info;

use txlatency::analysis::{self, LatencyReport, RunMetadata};

/// Transaction confirmation latency analysis for node log files
#[derive(Parser, Debug)]
#[command(name = "txlatency")]
#[command(version, about)]
struct Cli {
    /// Log files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for JSON and text report files (reports skipped if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    info!("Analyzing {} log file(s)...", cli.files.len());

    // Per-file scans are independent and per-hash accumulation is
    // commutative, so the parallel path produces the same result.
    let aggregator = if cli.files.len() > 1 {
        analysis::aggregate_files_parallel(&cli.files)?
    } else {
        analysis::aggregate_files(&cli.files)?
    };

    info!(
        "Scanned {} lines, {} transaction(s) with delay samples, {} malformed line(s) skipped",
        aggregator.lines_scanned(),
        aggregator.stats().len(),
        aggregator.malformed_lines()
    );
    if aggregator.malformed_lines() > 0 {
        log::warn!(
            "Skipped {} malformed line(s); rerun with --log-level debug for details",
            aggregator.malformed_lines()
        );
    }

    let report = LatencyReport {
        metadata: RunMetadata {
            files_analyzed: cli.files.iter().map(|p| p.display().to_string()).collect(),
            lines_scanned: aggregator.lines_scanned(),
            malformed_lines: aggregator.malformed_lines(),
        },
        stats: aggregator.into_stats(),
    };

    analysis::print_summary(&report);

    if let Some(output_dir) = &cli.output {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;
        analysis::generate_json_report(&report, &output_dir.join("latency_report.json"))?;
        analysis::generate_text_report(&report, &output_dir.join("latency_report.txt"))?;
    }

    Ok(())
}
