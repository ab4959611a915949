//! Transaction confirmation latency analysis.
//!
//! This module locates "Received" and "Confirmed" records for each
//! transaction hash in node log files and aggregates the per-hash
//! confirmation delays across files.

pub mod types;
pub mod log_parser;
pub mod latency;
pub mod report;

pub use types::*;
pub use log_parser::{classify_line, scan_log_file};
pub use latency::{aggregate_files, aggregate_files_parallel, delay_samples, LatencyAggregator};
pub use report::{generate_json_report, generate_text_report, print_summary};
