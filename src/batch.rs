// src/batch.rs
//
// Sequential run over every configured (length, trial) pair: outer loop over
// lengths, inner loop over trial indices.

use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregation::{Aggregator, AveragingPolicy};
use crate::config::AnalysisConfig;
use crate::constants::SAMPLE_RATE_MISMATCH_TOLERANCE;
use crate::data_analysis::trial_analysis::{analyze_trace, Measurement, TrialAnalysis};
use crate::data_input::trace_data::RawTrace;
use crate::data_input::trace_parser::{parse_trace_file, trace_file_name};
use crate::error::AnalysisError;
use crate::plot_functions::plot_trial_trace::{
    cropped_plot_path, filtered_plot_path, plot_cropped_trace, plot_filtered_trace,
};

/// Creates the output directory (and parents) if it does not exist.
pub fn ensure_output_dir(path: &Path) -> Result<(), AnalysisError> {
    fs::create_dir_all(path).map_err(|source| AnalysisError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Relative deviation of the timestamps' rate from the configured one, if it exceeds the tolerance.
pub fn sample_rate_mismatch(raw: &RawTrace, configured_hz: f64) -> Option<f64> {
    let estimated = raw.estimated_sample_rate()?;
    let deviation = (estimated - configured_hz).abs() / configured_hz;
    if deviation > SAMPLE_RATE_MISMATCH_TOLERANCE {
        Some(estimated)
    } else {
        None
    }
}

fn render_plots(analysis: &TrialAnalysis, output_dir: &Path) -> Result<(), AnalysisError> {
    let r = &analysis.result;

    let filtered_path = filtered_plot_path(output_dir, r.length_mm, r.trial);
    plot_filtered_trace(analysis, &filtered_path).map_err(|e| AnalysisError::Plot {
        path: filtered_path.clone(),
        message: e.to_string(),
    })?;

    let cropped_path = cropped_plot_path(output_dir, r.length_mm, r.trial);
    plot_cropped_trace(analysis, &cropped_path).map_err(|e| AnalysisError::Plot {
        path: cropped_path.clone(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Analyzes one trial file that is known to exist.
pub fn process_trial(
    path: &Path,
    config: &AnalysisConfig,
    length_mm: u32,
    trial: u32,
) -> Result<TrialAnalysis, AnalysisError> {
    let raw = parse_trace_file(path)?;

    if let Some(estimated) = sample_rate_mismatch(&raw, config.filter.sample_rate_hz) {
        log::warn!(
            "'{}': timestamps suggest {:.2} Hz but the filter is designed for {:.2} Hz.",
            path.display(),
            estimated,
            config.filter.sample_rate_hz
        );
    }

    Ok(analyze_trace(&raw, config, length_mm, trial)?)
}

/// Runs every configured trial.
///
/// The configuration is validated before any trial is read. Missing files are
/// recorded as skipped; any other failure aborts the run.
pub fn run_batch(config: &AnalysisConfig) -> Result<Aggregator, AnalysisError> {
    config.validate()?;

    let mut aggregator =
        Aggregator::new(AveragingPolicy::from_include_flag(config.trials.include_degenerate));
    let output_dir = &config.output.output_dir;
    if config.output.save_plots {
        ensure_output_dir(output_dir)?;
    }

    for &length_mm in &config.trials.lengths_mm {
        println!("\n--- {} mm ---", length_mm);
        for trial in 1..=config.trials.trials_per_length {
            let path: PathBuf = config
                .trials
                .input_dir
                .join(trace_file_name(length_mm, trial));

            if !path.is_file() {
                log::warn!("Skipping {} mm trial {}: '{}' not found.", length_mm, trial, path.display());
                aggregator.skip(length_mm, trial, path);
                continue;
            }

            let analysis = process_trial(&path, config, length_mm, trial)?;
            if config.output.save_plots {
                render_plots(&analysis, output_dir)?;
            }

            let result = analysis.result;
            match result.measurement {
                Measurement::Measured => println!(
                    "✔️ {} mm Trial {}: Frequency = {:.2} Hz, Young's Modulus = {:.2} GPa",
                    length_mm, trial, result.frequency_hz, result.modulus_gpa
                ),
                Measurement::InsufficientData => {
                    log::warn!(
                        "{} mm trial {}: fewer than two zero crossings, no frequency measured.",
                        length_mm,
                        trial
                    );
                    println!(
                        "⚠️ {} mm Trial {}: insufficient data (Frequency = 0.00 Hz)",
                        length_mm, trial
                    );
                }
            }
            aggregator.record(result);
        }
    }

    Ok(aggregator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rate_mismatch() {
        let time: Vec<f64> = (0..100).map(|i| i as f64 / 4000.0).collect();
        let level = vec![0.0; 100];
        let raw = RawTrace::from_columns(&time, &level).unwrap();

        let estimated = sample_rate_mismatch(&raw, 5000.0).unwrap();
        assert!((estimated - 4000.0).abs() < 1e-6);
        assert!(sample_rate_mismatch(&raw, 4100.0).is_none());
    }

    #[test]
    fn test_all_files_missing_records_skips() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AnalysisConfig::default();
        config.trials.input_dir = dir.path().to_path_buf();
        config.trials.lengths_mm = vec![120, 160];
        config.trials.trials_per_length = 2;
        config.output.output_dir = dir.path().join("out");
        config.output.save_plots = false;

        let aggregator = run_batch(&config).unwrap();
        assert_eq!(aggregator.skipped_count(), 4);
        assert!(aggregator.overall_summary().is_none());
    }

    #[test]
    fn test_invalid_config_rejected_before_trials() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AnalysisConfig::default();
        config.trials.input_dir = dir.path().to_path_buf();
        config.output.save_plots = false;

        // A trial file that would otherwise be analyzed.
        let time: Vec<f64> = (0..5000).map(|i| i as f64 / 5000.0).collect();
        let mut content = String::from("level,time\n");
        for t in &time {
            content.push_str(&format!("{},{}\n", (2.0 * std::f64::consts::PI * 50.0 * t).sin(), t));
        }
        fs::write(dir.path().join(trace_file_name(120, 1)), content).unwrap();

        let mut bad_crop = config.clone();
        bad_crop.crop.fraction = 1.5;
        assert!(matches!(run_batch(&bad_crop), Err(AnalysisError::Config(_))));

        // No input files at all: the cutoff must still be rejected.
        let mut bad_cutoff = config.clone();
        bad_cutoff.trials.input_dir = dir.path().join("missing");
        bad_cutoff.filter.cutoff_hz = 9000.0;
        assert!(matches!(run_batch(&bad_cutoff), Err(AnalysisError::Config(_))));
    }
}
