// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREY_700, RED};
use plotters::style::RGBColor;

// --- Analysis Defaults ---
// Used when neither the config file nor the command line sets a value.
pub const DEFAULT_CUTOFF_HZ: f64 = 70.0;
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 5000.0;
pub const DEFAULT_FILTER_ORDER: usize = 4;
pub const DEFAULT_CROP_FRACTION: f64 = 0.1;

// Beam geometry and material (steel ruler).
pub const DEFAULT_BEAM_WIDTH_M: f64 = 0.0255;
pub const DEFAULT_BEAM_THICKNESS_M: f64 = 0.0008;
pub const DEFAULT_DENSITY_KG_M3: f64 = 7700.0;

pub const DEFAULT_LENGTHS_MM: [u32; 3] = [120, 160, 200];
pub const DEFAULT_TRIALS_PER_LENGTH: u32 = 3;

pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

// --- Beam Physics ---
// Fundamental-mode eigenvalue factor for a clamped-free (cantilever) beam.
pub const CANTILEVER_FUNDAMENTAL_MODE_FACTOR: f64 = 0.56;
pub const PASCALS_PER_GIGAPASCAL: f64 = 1e9;
pub const MILLIMETRES_PER_METRE: f64 = 1000.0;

// --- Filter Design ---
// Edge extension length for zero-phase filtering, in multiples of (order + 1).
pub const FILTFILT_PAD_FACTOR: usize = 3;

// Warn when the sample rate measured from timestamps deviates from the configured one by more than this.
pub const SAMPLE_RATE_MISMATCH_TOLERANCE: f64 = 0.05;

// Rounding applied to every reported number.
pub const REPORT_DECIMALS: i32 = 2;

// --- Output File Naming ---
pub const REPORT_FILE_NAME: &str = "beam_analysis.csv";

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1600;
pub const PLOT_HEIGHT: u32 = 800;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: i32 = 28;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_MESSAGE: i32 = 24;
pub const FONT_SIZE_LEGEND: i32 = 14;

// --- Plot Color Assignments ---
pub const COLOR_FILTERED_TRACE: &RGBColor = &BLUE;
pub const COLOR_CROPPED_TRACE: &RGBColor = &RED;
pub const COLOR_ZERO_LINE: &RGBColor = &GREY_700;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_ZERO_LINE: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// src/constants.rs
