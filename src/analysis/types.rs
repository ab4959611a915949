//! Core data types for confirmation latency analysis.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Log timestamp as recorded by the node, an opaque integer tick.
/// Signed so that delays (confirm minus receive) can go negative when a
/// confirmation is logged before the matching receive record.
pub type LogTime = i64;

/// Classification of a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// "Received trans hash ..." line
    Received { tx_hash: String, timestamp: LogTime },
    /// "Confirmed trans hash ..." line
    Confirmed { tx_hash: String, timestamp: LogTime },
    /// Any other line
    Unmatched,
}

/// Receive and confirm timestamps extracted from one log file.
///
/// Keys are unique per file: a hash logged twice keeps the last timestamp
/// seen, matching the overwrite behavior of the source logs.
#[derive(Debug, Clone, Default)]
pub struct FileTimestamps {
    pub received: HashMap<String, LogTime>,
    pub confirmed: HashMap<String, LogTime>,
    /// Total lines read from the file
    pub lines_scanned: u64,
    /// Prefixed lines that failed field extraction and were skipped
    pub malformed_lines: u64,
}

impl FileTimestamps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Accumulated delay statistics for one transaction hash.
///
/// Only constructed from a first sample, so `samples >= 1` always holds and
/// `average` cannot divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayStat {
    pub total_delay: i64,
    pub samples: u64,
}

impl DelayStat {
    pub fn from_sample(delay: i64) -> Self {
        Self {
            total_delay: delay,
            samples: 1,
        }
    }

    pub fn add_sample(&mut self, delay: i64) {
        self.total_delay += delay;
        self.samples += 1;
    }

    /// Fold another stat in. Used when merging per-file aggregates.
    pub fn merge(&mut self, other: &DelayStat) {
        self.total_delay += other.total_delay;
        self.samples += other.samples;
    }

    pub fn average(&self) -> f64 {
        self.total_delay as f64 / self.samples as f64
    }
}

/// Run metadata included in generated reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub files_analyzed: Vec<String>,
    pub lines_scanned: u64,
    pub malformed_lines: u64,
}

/// Full latency report: per-hash stats plus run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyReport {
    pub metadata: RunMetadata,
    pub stats: BTreeMap<String, DelayStat>,
}
