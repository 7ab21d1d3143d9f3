// src/data_analysis/trial_analysis.rs
//
// Runs one trial through centering, filtering, cropping, crossing detection,
// and the frequency and modulus estimates.

use ndarray::Array1;

use crate::config::AnalysisConfig;
use crate::constants::MILLIMETRES_PER_METRE;
use crate::data_analysis::frequency::estimate_frequency;
use crate::data_analysis::lowpass_filter::ButterworthLowpass;
use crate::data_analysis::signal_crop::crop_signal;
use crate::data_analysis::zero_crossings::{crossing_span, find_crossings};
use crate::data_input::trace_data::RawTrace;
use crate::error::ConfigError;

/// Whether a trial produced a usable frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Measured,
    /// Fewer than two crossings (or an empty crop). Frequency and modulus are 0.
    InsufficientData,
}

/// Outcome of one analyzed trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    pub length_mm: u32,
    pub trial: u32,
    pub frequency_hz: f64,
    pub modulus_gpa: f64,
    pub measurement: Measurement,
}

impl TrialResult {
    pub fn is_measured(&self) -> bool {
        self.measurement == Measurement::Measured
    }
}

/// Result plus the intermediate traces the plots are drawn from.
#[derive(Debug, Clone)]
pub struct TrialAnalysis {
    pub result: TrialResult,
    pub time: Array1<f64>,
    pub filtered: Array1<f64>,
    pub cropped_time: Array1<f64>,
    pub cropped_signal: Array1<f64>,
    pub crossings: Vec<f64>,
}

/// Subtracts the mean. An empty signal stays empty.
pub fn center_signal(signal: &Array1<f64>) -> Array1<f64> {
    match signal.mean() {
        Some(mean) => signal.mapv(|v| v - mean),
        None => Array1::zeros(0),
    }
}

/// Analyzes one raw trace with an already validated configuration.
///
/// Only filter design can fail here; a degenerate signal is reported through
/// [`Measurement::InsufficientData`] rather than an error.
pub fn analyze_trace(
    raw: &RawTrace,
    config: &AnalysisConfig,
    length_mm: u32,
    trial: u32,
) -> Result<TrialAnalysis, ConfigError> {
    let filter = ButterworthLowpass::design(
        config.filter.cutoff_hz,
        config.filter.sample_rate_hz,
        config.filter.order,
    )?;

    let time = raw.times();
    let centered = center_signal(&raw.levels());
    let filtered = Array1::from(filter.filtfilt(&centered.to_vec()));

    let (cropped_time, cropped_signal) = crop_signal(&time, &filtered, config.crop.fraction);
    let crossings = find_crossings(&cropped_time, &cropped_signal);
    let period_s = crossing_span(&crossings);

    let measurement = if crossings.len() < 2 {
        log::debug!(
            "{} mm trial {}: {} crossing(s) after cropping {} of {} samples",
            length_mm,
            trial,
            crossings.len(),
            cropped_signal.len(),
            filtered.len()
        );
        Measurement::InsufficientData
    } else {
        Measurement::Measured
    };

    let frequency_hz = estimate_frequency(crossings.len(), period_s);
    let length_m = length_mm as f64 / MILLIMETRES_PER_METRE;
    let modulus_gpa = config
        .beam
        .geometry()
        .modulus_gpa(frequency_hz, length_m, config.beam.boundary);

    Ok(TrialAnalysis {
        result: TrialResult {
            length_mm,
            trial,
            frequency_hz,
            modulus_gpa,
            measurement,
        },
        time,
        filtered,
        cropped_time,
        cropped_signal,
        crossings,
    })
}
