// tests/trace_input_test.rs

use std::fs;
use std::path::PathBuf;

use beam_vibration_analyzer::data_input::trace_parser::parse_trace_file;
use beam_vibration_analyzer::error::TraceError;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_named_headers_are_mapped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "named.csv",
        "Time (s),Quantisation Level\n0.0000,510\n0.0002,530\n0.0004,495\n",
    );
    let trace = parse_trace_file(&path).unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.levels().to_vec(), vec![510.0, 530.0, 495.0]);
    assert!((trace.times()[2] - 0.0004).abs() < 1e-12);
}

#[test]
fn test_unknown_headers_use_level_then_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "positional.csv", "a,b\n12,0.1\n-4,0.2\n");
    let trace = parse_trace_file(&path).unwrap();
    assert_eq!(trace.levels().to_vec(), vec![12.0, -4.0]);
    assert_eq!(trace.times().to_vec(), vec![0.1, 0.2]);
}

#[test]
fn test_headerless_file_keeps_first_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bare.csv", "7,0.0\n8,0.5\n9,1.0\n");
    let trace = parse_trace_file(&path).unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.levels()[0], 7.0);
}

#[test]
fn test_bad_value_reports_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "level,time\n1,0.0\nabc,0.1\n");
    match parse_trace_file(&path) {
        Err(TraceError::InvalidValue {
            row, column, value, ..
        }) => {
            assert_eq!(row, 3);
            assert_eq!(column, "level");
            assert_eq!(value, "abc");
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_missing_field_is_invalid_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "short_row.csv", "level,time\n1,0.0\n2\n");
    assert!(matches!(
        parse_trace_file(&path),
        Err(TraceError::InvalidValue { column: "time", .. })
    ));
}

#[test]
fn test_non_increasing_time_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "order.csv", "level,time\n1,0.0\n2,0.2\n3,0.2\n");
    match parse_trace_file(&path) {
        Err(TraceError::NonIncreasingTime { row, .. }) => assert_eq!(row, 4),
        other => panic!("expected NonIncreasingTime, got {:?}", other),
    }
}

#[test]
fn test_single_column_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "one.csv", "level\n1\n2\n");
    assert!(matches!(
        parse_trace_file(&path),
        Err(TraceError::MissingColumns { found: 1, .. })
    ));
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.csv", "level,time\n");
    assert!(matches!(
        parse_trace_file(&path),
        Err(TraceError::Empty { .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.csv");
    assert!(matches!(
        parse_trace_file(&path),
        Err(TraceError::Io { .. })
    ));
}
