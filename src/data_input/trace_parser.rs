// src/data_input/trace_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::data_input::trace_data::{RawSample, RawTrace};
use crate::error::TraceError;

// Header names recognised for each column (compared trimmed, lowercase).
const TIME_HEADERS: [&str; 4] = ["time", "time (s)", "time(s)", "time_s"];
const LEVEL_HEADERS: [&str; 6] = [
    "level",
    "qlvl",
    "quantisation level",
    "quantization level",
    "quantisation_level",
    "quantization_level",
];

// Positional layout of the recording software's export: level first, then time.
const POSITIONAL_LEVEL_COLUMN: usize = 0;
const POSITIONAL_TIME_COLUMN: usize = 1;

/// Expected file name for one trial, e.g. `120mm_Trial_2.csv`.
pub fn trace_file_name(length_mm: u32, trial: u32) -> String {
    format!("{}mm_Trial_{}.csv", length_mm, trial)
}

/// Column indices for the two fields of a trace row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub level: usize,
    pub time: usize,
}

/// Maps header names to columns. Falls back to the positional layout when the
/// names are not recognised. Returns None with fewer than two columns.
pub fn map_columns(header_record: &StringRecord) -> Option<ColumnMapping> {
    if header_record.len() < 2 {
        return None;
    }
    let normalized: Vec<String> = header_record
        .iter()
        .map(|h| h.trim().trim_matches('"').to_lowercase())
        .collect();

    let time_idx = normalized
        .iter()
        .position(|h| TIME_HEADERS.contains(&h.as_str()));
    let level_idx = normalized
        .iter()
        .position(|h| LEVEL_HEADERS.contains(&h.as_str()));

    let mapping = match (level_idx, time_idx) {
        (Some(level), Some(time)) if level != time => ColumnMapping { level, time },
        // Only the time column is named: the level is the first other column.
        (None, Some(time)) => ColumnMapping {
            level: if time == 0 { 1 } else { 0 },
            time,
        },
        (Some(level), None) => ColumnMapping {
            level,
            time: if level == 0 { 1 } else { 0 },
        },
        _ => ColumnMapping {
            level: POSITIONAL_LEVEL_COLUMN,
            time: POSITIONAL_TIME_COLUMN,
        },
    };
    Some(mapping)
}

fn is_numeric_record(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().parse::<f64>().is_ok())
}

fn parse_field(
    record: &StringRecord,
    idx: usize,
    column: &'static str,
    row: usize,
    path: &Path,
) -> Result<f64, TraceError> {
    let raw = record.get(idx).unwrap_or("").trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TraceError::InvalidValue {
            path: path.to_path_buf(),
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Parses one trial CSV into a validated trace.
///
/// Fails fast on the first malformed row, on time that does not strictly increase,
/// and on files without data rows. A header row made only of numbers is treated as data.
pub fn parse_trace_file(input_file_path: &Path) -> Result<RawTrace, TraceError> {
    let path: PathBuf = input_file_path.to_path_buf();
    let file = File::open(input_file_path).map_err(|source| TraceError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Reading data rows from '{}'...", path.display());
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader
        .headers()
        .map_err(|source| TraceError::Csv {
            path: path.clone(),
            source,
        })?
        .clone();

    let mapping = map_columns(&header_record).ok_or_else(|| TraceError::MissingColumns {
        path: path.clone(),
        found: header_record.len(),
    })?;
    log::debug!(
        "Header mapping for '{}': level -> column {}, time -> column {}",
        path.display(),
        mapping.level,
        mapping.time
    );

    let mut records: Vec<(usize, StringRecord)> = Vec::new();
    if is_numeric_record(&header_record) {
        log::debug!("'{}' has no header row; reading first line as data", path.display());
        records.push((1, header_record));
    }

    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|source| TraceError::Csv {
            path: path.clone(),
            source,
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_index + 2);
        records.push((line, record));
    }

    let mut samples: Vec<RawSample> = Vec::with_capacity(records.len());
    for (row, record) in &records {
        let level = parse_field(record, mapping.level, "level", *row, &path)?;
        let time_sec = parse_field(record, mapping.time, "time", *row, &path)?;

        if let Some(previous) = samples.last() {
            if time_sec <= previous.time_sec {
                return Err(TraceError::NonIncreasingTime {
                    path,
                    row: *row,
                    time: time_sec,
                    previous: previous.time_sec,
                });
            }
        }
        samples.push(RawSample { time_sec, level });
    }

    if samples.is_empty() {
        return Err(TraceError::Empty { path });
    }

    log::info!(
        "Finished reading {} data rows from '{}'.",
        samples.len(),
        path.display()
    );

    RawTrace::new(samples).ok_or(TraceError::Empty { path })
}
