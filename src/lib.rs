//! # txlatency - Transaction confirmation latency analysis
//!
//! This library computes transaction confirmation latency from node log
//! files. For each transaction hash it locates a "Received" timestamp and a
//! "Confirmed" timestamp, computes the delay, and aggregates delay
//! statistics (sum, count, average) per hash across multiple log sources.
//!
//! ## Log format
//!
//! Lines are whitespace-delimited; two shapes are recognized:
//!
//! ```text
//! Received trans hash <ignored> <HASH> ... <TIMESTAMP>
//! Confirmed trans hash <ignored> <HASH> ... <TIMESTAMP>
//! ```
//!
//! The hash is the fourth token, the timestamp the last. Anything else on
//! the line is ignored. A transaction only contributes a delay sample from a
//! file where both its receive and confirm records appear.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use txlatency::analysis;
//!
//! let aggregator = analysis::aggregate_files(&["node1.log", "node2.log"])?;
//! for (tx_hash, stat) in aggregator.stats() {
//!     println!("{}: {:.2}", tx_hash, stat.average());
//! }
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```

pub mod analysis;
