//! Log parsing for node transaction logs.
//!
//! Classifies "Received trans hash" and "Confirmed trans hash" lines and
//! extracts the transaction hash and timestamp fields from each.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::{FileTimestamps, LineEvent, LogTime};

/// Line prefix for transaction receipt records
const RECEIVED_PREFIX: &str = "Received trans hash";
/// Line prefix for transaction confirmation records
const CONFIRMED_PREFIX: &str = "Confirmed trans hash";

/// Token index of the transaction hash in a whitespace-split line
const HASH_TOKEN_INDEX: usize = 3;

/// A prefixed line whose hash or timestamp fields could not be extracted.
/// Recovered by skipping the line; never propagated out of the scan loop.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedLine {
    #[error("expected at least {expected} whitespace-separated tokens, found {found}")]
    TooFewTokens { expected: usize, found: usize },

    #[error("timestamp token {token:?} is not an integer")]
    BadTimestamp { token: String },
}

/// Classify one log line.
///
/// A line is `Received` iff it starts with the literal prefix
/// `"Received trans hash"`, `Confirmed` iff it starts with
/// `"Confirmed trans hash"`; everything else is `Unmatched`. Both checks are
/// case-sensitive and anchored at the start of the line, so no line can match
/// both. On a prefixed line the hash is token 3 of the whitespace split and
/// the timestamp is the last token, parsed as a base-10 integer. Tokens in
/// between are ignored; with exactly 4 tokens the hash and timestamp tokens
/// coincide, which existing log producers rely on.
pub fn classify_line(line: &str) -> Result<LineEvent, MalformedLine> {
    let is_received = line.starts_with(RECEIVED_PREFIX);
    if !is_received && !line.starts_with(CONFIRMED_PREFIX) {
        return Ok(LineEvent::Unmatched);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= HASH_TOKEN_INDEX {
        return Err(MalformedLine::TooFewTokens {
            expected: HASH_TOKEN_INDEX + 1,
            found: tokens.len(),
        });
    }

    let tx_hash = tokens[HASH_TOKEN_INDEX].to_string();
    let last = tokens[tokens.len() - 1];
    let timestamp: LogTime = last.parse().map_err(|_| MalformedLine::BadTimestamp {
        token: last.to_string(),
    })?;

    if is_received {
        Ok(LineEvent::Received { tx_hash, timestamp })
    } else {
        Ok(LineEvent::Confirmed { tx_hash, timestamp })
    }
}

/// Scan one log file and collect its receive and confirm timestamps.
///
/// Single streaming pass: each line is classified once and dispatched to the
/// matching map. Duplicate hashes within a file overwrite (last write wins).
/// Malformed prefixed lines are skipped and counted. Failure to open or read
/// the file is fatal for the whole run.
pub fn scan_log_file(path: &Path) -> Result<FileTimestamps> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let reader = BufReader::with_capacity(64 * 1024, file);

    let mut timestamps = FileTimestamps::new();

    for line_result in reader.lines() {
        let line = line_result
            .with_context(|| format!("Failed to read from log file: {}", path.display()))?;
        timestamps.lines_scanned += 1;

        match classify_line(&line) {
            Ok(LineEvent::Received { tx_hash, timestamp }) => {
                timestamps.received.insert(tx_hash, timestamp);
            }
            Ok(LineEvent::Confirmed { tx_hash, timestamp }) => {
                timestamps.confirmed.insert(tx_hash, timestamp);
            }
            Ok(LineEvent::Unmatched) => {}
            Err(e) => {
                log::debug!(
                    "{}:{}: skipping malformed line: {}",
                    path.display(),
                    timestamps.lines_scanned,
                    e
                );
                timestamps.malformed_lines += 1;
            }
        }
    }

    log::debug!(
        "Scanned {}: {} lines, {} received, {} confirmed, {} malformed",
        path.display(),
        timestamps.lines_scanned,
        timestamps.received.len(),
        timestamps.confirmed.len(),
        timestamps.malformed_lines
    );

    Ok(timestamps)
}
