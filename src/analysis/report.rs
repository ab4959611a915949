//! Report generation for confirmation latency analysis.
//!
//! Prints the per-hash summary to stdout and optionally writes JSON and
//! text report files.

use std::fs;
use std::io::Write;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::LatencyReport;

/// Format the summary line for one transaction hash
fn summary_line(tx_hash: &str, stat: &super::types::DelayStat) -> String {
    format!(
        "{} Delay {} Num entries {} Average {:.2}",
        tx_hash,
        stat.total_delay,
        stat.samples,
        stat.average()
    )
}

/// Print the per-hash summary lines
pub fn print_summary(report: &LatencyReport) {
    for (tx_hash, stat) in &report.stats {
        println!("{}", summary_line(tx_hash, stat));
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &LatencyReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(report: &LatencyReport, output_path: &Path) -> Result<()> {
    let mut out = Vec::new();

    writeln!(out, "{}", "=".repeat(72))?;
    writeln!(out, "              TRANSACTION CONFIRMATION LATENCY")?;
    writeln!(out, "{}", "=".repeat(72))?;
    writeln!(out)?;
    writeln!(out, "Files analyzed: {}", report.metadata.files_analyzed.len())?;
    for file in &report.metadata.files_analyzed {
        writeln!(out, "  {}", file)?;
    }
    writeln!(out, "Lines scanned: {}", report.metadata.lines_scanned)?;
    writeln!(out, "Malformed lines skipped: {}", report.metadata.malformed_lines)?;
    writeln!(out, "Transactions with samples: {}", report.stats.len())?;
    writeln!(out)?;

    for (tx_hash, stat) in &report.stats {
        writeln!(out, "{}", summary_line(tx_hash, stat))?;
    }

    fs::write(output_path, out)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}
