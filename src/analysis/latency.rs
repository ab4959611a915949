//! Confirmation delay computation and cross-file aggregation.
//!
//! Per-file delays are the difference between a hash's confirm and receive
//! timestamps; a running per-hash statistic accumulates them across files.

use std::collections::BTreeMap;
use std::path::Path;

use color_eyre::eyre::Result;
use rayon::prelude::*;

use super::log_parser::scan_log_file;
use super::types::{DelayStat, FileTimestamps};

/// Compute one `(hash, delay)` pair per hash present in both maps of one
/// file. A hash in only one map yields no sample: an unconfirmed transaction,
/// or a confirmation with no matching receive record, contributes nothing.
/// Negative delays are kept as-is.
pub fn delay_samples(timestamps: &FileTimestamps) -> Vec<(String, i64)> {
    timestamps
        .received
        .iter()
        .filter_map(|(tx_hash, &recv_time)| {
            let confirm_time = timestamps.confirmed.get(tx_hash)?;
            Some((tx_hash.clone(), confirm_time - recv_time))
        })
        .collect()
}

/// Per-hash delay statistics accumulated across all processed log files.
///
/// Owns the result map; per-file scans hand their samples in through
/// [`LatencyAggregator::observe_file`] or [`LatencyAggregator::record`].
/// A `BTreeMap` keeps the iteration order deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct LatencyAggregator {
    stats: BTreeMap<String, DelayStat>,
    lines_scanned: u64,
    malformed_lines: u64,
}

impl LatencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one delay sample into the stat for `tx_hash`, creating the entry
    /// on the first sample. Accumulation is commutative per hash, so file
    /// processing order never changes the result.
    pub fn record(&mut self, tx_hash: String, delay: i64) {
        self.stats
            .entry(tx_hash)
            .and_modify(|stat| stat.add_sample(delay))
            .or_insert_with(|| DelayStat::from_sample(delay));
    }

    /// Fold all samples from one file's scan result into the aggregate.
    pub fn observe_file(&mut self, timestamps: &FileTimestamps) {
        for (tx_hash, delay) in delay_samples(timestamps) {
            self.record(tx_hash, delay);
        }
        self.lines_scanned += timestamps.lines_scanned;
        self.malformed_lines += timestamps.malformed_lines;
    }

    /// Merge another aggregator in. Used to combine per-file aggregates
    /// produced by parallel scans.
    pub fn merge(&mut self, other: LatencyAggregator) {
        for (tx_hash, stat) in other.stats {
            self.stats
                .entry(tx_hash)
                .and_modify(|s| s.merge(&stat))
                .or_insert(stat);
        }
        self.lines_scanned += other.lines_scanned;
        self.malformed_lines += other.malformed_lines;
    }

    pub fn stats(&self) -> &BTreeMap<String, DelayStat> {
        &self.stats
    }

    pub fn into_stats(self) -> BTreeMap<String, DelayStat> {
        self.stats
    }

    pub fn lines_scanned(&self) -> u64 {
        self.lines_scanned
    }

    pub fn malformed_lines(&self) -> u64 {
        self.malformed_lines
    }
}

/// Scan the given log files in order and aggregate delay statistics.
///
/// A file that cannot be opened or read aborts the whole run; files after it
/// are not processed.
pub fn aggregate_files<P: AsRef<Path>>(paths: &[P]) -> Result<LatencyAggregator> {
    let mut aggregator = LatencyAggregator::new();
    for path in paths {
        let timestamps = scan_log_file(path.as_ref())?;
        aggregator.observe_file(&timestamps);
    }
    Ok(aggregator)
}

/// Scan log files in parallel and merge the per-file aggregates.
///
/// Per-file scanning is a pure function of one file's contents and per-hash
/// accumulation is commutative, so the result is identical to
/// [`aggregate_files`]. Any file error still aborts the run.
pub fn aggregate_files_parallel<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<LatencyAggregator> {
    let per_file: Vec<LatencyAggregator> = paths
        .par_iter()
        .map(|path| {
            let timestamps = scan_log_file(path.as_ref())?;
            let mut aggregator = LatencyAggregator::new();
            aggregator.observe_file(&timestamps);
            Ok(aggregator)
        })
        .collect::<Result<_>>()?;

    let mut merged = LatencyAggregator::new();
    for aggregator in per_file {
        merged.merge(aggregator);
    }
    Ok(merged)
}
