// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable run configuration. Always fatal: raised before any trial is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Sample rate must be positive and finite, got {0} Hz")]
    InvalidSampleRate(f64),
    #[error("Cutoff must be positive and finite, got {0} Hz")]
    InvalidCutoff(f64),
    #[error("Cutoff {cutoff_hz} Hz is not below the Nyquist frequency {nyquist_hz} Hz")]
    CutoffAboveNyquist { cutoff_hz: f64, nyquist_hz: f64 },
    #[error("Filter order must be at least 1, got {0}")]
    InvalidFilterOrder(usize),
    #[error("Crop fraction must be in (0, 1], got {0}")]
    InvalidCropFraction(f64),
    #[error("Beam {name} must be positive and finite, got {value}")]
    InvalidGeometry { name: &'static str, value: f64 },
    #[error("At least one beam length is required")]
    NoLengths,
    #[error("Beam lengths must be positive, got {0} mm")]
    InvalidLength(u32),
    #[error("Beam length {0} mm is listed more than once")]
    DuplicateLength(u32),
    #[error("Trials per length must be at least 1")]
    NoTrials,
}

/// Failure to load a single trace file.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to open trace file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("'{path}' has {found} column(s); a level and a time column are required")]
    MissingColumns { path: PathBuf, found: usize },
    #[error("'{path}' row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("'{path}' row {row}: time {time} s does not increase (previous {previous} s)")]
    NonIncreasingTime {
        path: PathBuf,
        row: usize,
        time: f64,
        previous: f64,
    },
    #[error("'{path}' contains no data rows")]
    Empty { path: PathBuf },
}

/// Top-level failure of an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error("Failed to render plot '{path}': {message}")]
    Plot { path: PathBuf, message: String },
    #[error("Failed to write report '{path}': {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
