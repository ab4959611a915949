//! End-to-end tests for confirmation latency aggregation over real files.

use std::io::Write;

use tempfile::NamedTempFile;

use txlatency::analysis::{
    aggregate_files, aggregate_files_parallel, classify_line, scan_log_file, LineEvent,
};

/// Write log content to a temp file and return the handle (keeps the file alive)
fn log_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp log file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp log file");
    file
}

#[test]
fn test_no_line_matches_both_prefixes() {
    let lines = [
        "Received trans hash abc123 extra 100",
        "Confirmed trans hash abc123 extra 150",
        "Received trans hash 500",
        "something else entirely",
    ];

    for line in lines {
        let event = classify_line(line).unwrap();
        let as_received = matches!(event, LineEvent::Received { .. });
        let as_confirmed = matches!(event, LineEvent::Confirmed { .. });
        assert!(
            !(as_received && as_confirmed),
            "line classified as both: {}",
            line
        );
    }
}

#[test]
fn test_single_file_end_to_end() {
    let file = log_file(
        "Received trans hash abc123 extra 100\n\
         Confirmed trans hash abc123 extra 150\n",
    );

    let aggregator = aggregate_files(&[file.path()]).unwrap();
    let stat = aggregator.stats()["abc123"];
    assert_eq!(stat.total_delay, 50);
    assert_eq!(stat.samples, 1);
    assert_eq!(format!("{:.2}", stat.average()), "50.00");
}

#[test]
fn test_cross_file_accumulation() {
    let file_a = log_file(
        "Received trans hash abc123 extra 100\n\
         Confirmed trans hash abc123 extra 150\n",
    );
    let file_b = log_file(
        "Received trans hash abc123 extra 200\n\
         Confirmed trans hash abc123 extra 230\n",
    );

    let aggregator = aggregate_files(&[file_a.path(), file_b.path()]).unwrap();
    let stat = aggregator.stats()["abc123"];
    assert_eq!(stat.total_delay, 80);
    assert_eq!(stat.samples, 2);
    assert_eq!(format!("{:.2}", stat.average()), "40.00");
}

#[test]
fn test_file_order_does_not_change_result() {
    let file_a = log_file(
        "Received trans hash abc123 extra 100\n\
         Confirmed trans hash abc123 extra 150\n\
         Received trans hash def456 extra 10\n\
         Confirmed trans hash def456 extra 25\n",
    );
    let file_b = log_file(
        "Received trans hash abc123 extra 200\n\
         Confirmed trans hash abc123 extra 230\n",
    );

    let forward = aggregate_files(&[file_a.path(), file_b.path()]).unwrap();
    let reverse = aggregate_files(&[file_b.path(), file_a.path()]).unwrap();
    assert_eq!(forward.stats(), reverse.stats());
}

#[test]
fn test_parallel_matches_sequential() {
    let file_a = log_file(
        "Received trans hash abc123 extra 100\n\
         Confirmed trans hash abc123 extra 150\n\
         Received trans hash def456 extra 10\n\
         Confirmed trans hash def456 extra 25\n",
    );
    let file_b = log_file(
        "Received trans hash abc123 extra 200\n\
         Confirmed trans hash abc123 extra 230\n\
         Received trans hash orphan extra 5\n",
    );

    let sequential = aggregate_files(&[file_a.path(), file_b.path()]).unwrap();
    let parallel = aggregate_files_parallel(&[file_a.path(), file_b.path()]).unwrap();
    assert_eq!(sequential.stats(), parallel.stats());
}

#[test]
fn test_unconfirmed_transaction_is_excluded() {
    let file_a = log_file("Received trans hash abc123 extra 100\n");
    let file_b = log_file("Received trans hash abc123 extra 200\n");

    let aggregator = aggregate_files(&[file_a.path(), file_b.path()]).unwrap();
    assert!(aggregator.stats().is_empty());
}

#[test]
fn test_both_records_required_within_one_file() {
    // abc123 is received in file A and confirmed in file B; records must
    // pair up within a single file to produce a sample.
    let file_a = log_file("Received trans hash abc123 extra 100\n");
    let file_b = log_file("Confirmed trans hash abc123 extra 150\n");

    let aggregator = aggregate_files(&[file_a.path(), file_b.path()]).unwrap();
    assert!(aggregator.stats().is_empty());
}

#[test]
fn test_malformed_lines_are_skipped() {
    let file = log_file(
        "Received trans hash\n\
         Received trans hash abc123 extra notanumber\n\
         Received trans hash abc123 extra 100\n\
         Confirmed trans hash abc123 extra 150\n",
    );

    let timestamps = scan_log_file(file.path()).unwrap();
    assert_eq!(timestamps.malformed_lines, 2);
    assert_eq!(timestamps.received.len(), 1);

    let aggregator = aggregate_files(&[file.path()]).unwrap();
    let stat = aggregator.stats()["abc123"];
    assert_eq!(stat.total_delay, 50);
    assert_eq!(stat.samples, 1);
}

#[test]
fn test_duplicate_hash_last_write_wins() {
    let file = log_file(
        "Received trans hash abc123 extra 100\n\
         Received trans hash abc123 extra 120\n\
         Confirmed trans hash abc123 extra 150\n",
    );

    let aggregator = aggregate_files(&[file.path()]).unwrap();
    let stat = aggregator.stats()["abc123"];
    assert_eq!(stat.total_delay, 30);
    assert_eq!(stat.samples, 1);
}

#[test]
fn test_negative_delay_recorded_as_is() {
    let file = log_file(
        "Received trans hash abc123 extra 200\n\
         Confirmed trans hash abc123 extra 150\n",
    );

    let aggregator = aggregate_files(&[file.path()]).unwrap();
    let stat = aggregator.stats()["abc123"];
    assert_eq!(stat.total_delay, -50);
    assert_eq!(stat.samples, 1);
}

#[test]
fn test_missing_file_aborts_run() {
    let file = log_file(
        "Received trans hash abc123 extra 100\n\
         Confirmed trans hash abc123 extra 150\n",
    );

    let paths = [file.path(), std::path::Path::new("/nonexistent/node.log")];
    assert!(aggregate_files(&paths).is_err());
    assert!(aggregate_files_parallel(&paths).is_err());
}

#[test]
fn test_unmatched_lines_are_ignored() {
    let file = log_file(
        "2026-01-01 00:00:00 starting node\n\
         Received trans hash abc123 extra 100\n\
         peer connected 25.0.0.10:18080\n\
         Confirmed trans hash abc123 extra 150\n\
         shutting down\n",
    );

    let timestamps = scan_log_file(file.path()).unwrap();
    assert_eq!(timestamps.lines_scanned, 5);
    assert_eq!(timestamps.malformed_lines, 0);
    assert_eq!(timestamps.received.len(), 1);
    assert_eq!(timestamps.confirmed.len(), 1);
}
