//! Integration tests for resilient loading and file-level helpers.
//!
//! Resilient reads keep going past malformed lines and report them as
//! warnings; the atomic write helpers never leave a target file in a
//! half-written state.

use jsonl_stream::{
    read_jsonl, read_jsonl_resilient, write_jsonl_atomic, write_jsonl_atomic_iter, Error, Reader,
    Warning,
};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct SimpleRecord {
    id: u32,
    name: String,
}

// =============================================================================
// Resilient reading
// =============================================================================

#[test]
fn resilient_read_skips_malformed_lines() {
    let input = "{\"id\":1,\"name\":\"Alice\"}\n{broken\n{\"id\":2,\"name\":\"Bob\"}\n";
    let mut reader = Reader::new(Cursor::new(input));

    let (records, warnings) = reader.read_resilient::<SimpleRecord>().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Alice");
    assert_eq!(records[1].name, "Bob");

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line_number(), 2);
    assert_eq!(warnings[0].kind(), "malformed_json");
}

#[test]
fn resilient_read_reports_empty_lines_as_skipped() {
    let input = "{\"id\":1,\"name\":\"a\"}\n\n{\"id\":2,\"name\":\"b\"}\n";
    let mut reader = Reader::new(Cursor::new(input));

    let (records, warnings) = reader.read_resilient::<SimpleRecord>().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(
        warnings,
        vec![Warning::SkippedLine {
            line_number: 2,
            reason: "empty line".to_string(),
        }]
    );
}

#[test]
fn resilient_read_of_fully_corrupt_input_yields_only_warnings() {
    let input = "garbage\nmore garbage\n";
    let mut reader = Reader::new(Cursor::new(input));

    let (records, warnings) = reader.read_resilient::<SimpleRecord>().unwrap();

    assert!(records.is_empty());
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].line_number(), 1);
    assert_eq!(warnings[1].line_number(), 2);
}

#[test]
fn resilient_read_preserves_record_order_around_errors() {
    let input = "1\nbad\n2\nworse\n3\n";
    let mut reader = Reader::new(Cursor::new(input));

    let (records, warnings) = reader.read_resilient::<u32>().unwrap();

    assert_eq!(records, vec![1, 2, 3]);
    assert_eq!(warnings.len(), 2);
}

// =============================================================================
// File-level helpers
// =============================================================================

#[test]
fn read_jsonl_loads_a_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    std::fs::write(
        &path,
        "{\"id\":1,\"name\":\"Alice\"}\n{\"id\":2,\"name\":\"Bob\"}\n",
    )
    .unwrap();

    let records: Vec<SimpleRecord> = read_jsonl(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, 2);
}

#[test]
fn read_jsonl_fails_on_the_first_malformed_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    std::fs::write(&path, "{\"id\":1,\"name\":\"a\"}\nnope\n").unwrap();

    let result: Result<Vec<SimpleRecord>, _> = read_jsonl(&path);
    assert!(matches!(result, Err(Error::Decode { line: 2, .. })));
}

#[test]
fn read_jsonl_resilient_tolerates_a_corrupted_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    std::fs::write(&path, "{\"id\":1,\"name\":\"a\"}\nnope\n{\"id\":3,\"name\":\"c\"}\n").unwrap();

    let (records, warnings) = read_jsonl_resilient::<SimpleRecord, _>(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line_number(), 2);
}

#[test]
fn missing_file_surfaces_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.jsonl");

    let result: Result<Vec<SimpleRecord>, _> = read_jsonl(&path);
    assert!(matches!(result, Err(Error::Io(_))));
}

// =============================================================================
// Atomic writes
// =============================================================================

#[test]
fn atomic_write_then_read_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");

    let records = vec![
        SimpleRecord {
            id: 1,
            name: "Alice".to_string(),
        },
        SimpleRecord {
            id: 2,
            name: "Bob".to_string(),
        },
    ];
    write_jsonl_atomic(&path, &records).unwrap();

    let read_back: Vec<SimpleRecord> = read_jsonl(&path).unwrap();
    assert_eq!(records, read_back);
}

#[test]
fn atomic_write_replaces_existing_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    std::fs::write(&path, "stale contents\n").unwrap();

    write_jsonl_atomic_iter(&path, (0..3).map(|id| SimpleRecord {
        id,
        name: format!("r{id}"),
    }))
    .unwrap();

    let read_back: Vec<SimpleRecord> = read_jsonl(&path).unwrap();
    assert_eq!(read_back.len(), 3);
}

#[test]
fn atomic_write_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");

    write_jsonl_atomic(&path, &[SimpleRecord {
        id: 1,
        name: "only".to_string(),
    }])
    .unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("records.jsonl.tmp").exists());
}

#[test]
fn failed_atomic_write_keeps_the_original_file() {
    use std::collections::BTreeMap;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    std::fs::write(&path, "{\"id\":1,\"name\":\"keep me\"}\n").unwrap();

    // Non-string map keys cannot be serialized to JSON, so the write fails.
    let mut bad = BTreeMap::new();
    bad.insert((1u8, 2u8), "x");
    let result = write_jsonl_atomic(&path, &[bad]);
    assert!(matches!(result, Err(Error::Encode(_))));

    // The original file is intact and the temp file was cleaned up.
    let survivors: Vec<SimpleRecord> = read_jsonl(&path).unwrap();
    assert_eq!(survivors[0].name, "keep me");
    assert!(!dir.path().join("records.jsonl.tmp").exists());
}
