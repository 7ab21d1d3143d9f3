// src/plot_functions/plot_trial_trace.rs

use std::path::{Path, PathBuf};

use ndarray::Array1;
use plotters::style::RGBColor;

use crate::constants::{COLOR_CROPPED_TRACE, COLOR_FILTERED_TRACE, LINE_WIDTH_PLOT};
use crate::data_analysis::trial_analysis::TrialAnalysis;
use crate::types::PlotResult;
use crate::plot_framework::{calculate_range, draw_trace_plot, value_bounds, PlotConfig, PlotSeries};

const X_LABEL: &str = "Time (s)";
const Y_LABEL: &str = "Quantisation level";
const FILTERED_LABEL: &str = "filtered";
const CROPPED_LABEL: &str = "cropped";

/// File name stem shared by both plots of a trial, e.g. `120mm_Trial1`.
pub fn trial_plot_stem(length_mm: u32, trial: u32) -> String {
    format!("{}mm_Trial{}", length_mm, trial)
}

fn trace_plot(
    output_path: &Path,
    title: String,
    label: &str,
    time: &Array1<f64>,
    signal: &Array1<f64>,
    color: RGBColor,
) -> PlotResult {
    let series_data: Vec<(f64, f64)> = time.iter().copied().zip(signal.iter().copied()).collect();

    draw_trace_plot(output_path, label, move || {
        let (time_min, time_max) = value_bounds(series_data.iter().map(|p| p.0))?;
        let (val_min, val_max) = value_bounds(series_data.iter().map(|p| p.1))?;
        // Keep zero inside the y range so the reference line is always visible.
        let (y_min, y_max) = calculate_range(val_min.min(0.0), val_max.max(0.0));

        Some(PlotConfig {
            title,
            x_range: time_min..time_max,
            y_range: y_min..y_max,
            series: vec![PlotSeries {
                data: series_data,
                label: label.to_string(),
                color,
                stroke_width: LINE_WIDTH_PLOT,
            }],
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
        })
    })
}

/// Chart title, e.g. `120 mm Trial 1 – filtered`.
pub fn trial_plot_title(length_mm: u32, trial: u32, label: &str) -> String {
    format!("{} mm Trial {} – {}", length_mm, trial, label)
}

pub fn filtered_plot_path(output_dir: &Path, length_mm: u32, trial: u32) -> PathBuf {
    output_dir.join(format!("{}_filtered.png", trial_plot_stem(length_mm, trial)))
}

pub fn cropped_plot_path(output_dir: &Path, length_mm: u32, trial: u32) -> PathBuf {
    output_dir.join(format!("{}_cropped.png", trial_plot_stem(length_mm, trial)))
}

/// Filtered signal over the full time axis (blue).
pub fn plot_filtered_trace(
    analysis: &TrialAnalysis,
    output_path: &Path,
) -> PlotResult {
    let r = &analysis.result;
    trace_plot(
        output_path,
        trial_plot_title(r.length_mm, r.trial, FILTERED_LABEL),
        FILTERED_LABEL,
        &analysis.time,
        &analysis.filtered,
        *COLOR_FILTERED_TRACE,
    )
}

/// Cropped signal, the region the crossings are counted in (red).
pub fn plot_cropped_trace(
    analysis: &TrialAnalysis,
    output_path: &Path,
) -> PlotResult {
    let r = &analysis.result;
    trace_plot(
        output_path,
        trial_plot_title(r.length_mm, r.trial, CROPPED_LABEL),
        CROPPED_LABEL,
        &analysis.cropped_time,
        &analysis.cropped_signal,
        *COLOR_CROPPED_TRACE,
    )
}


// src/plot_functions/plot_trial_trace.rs
