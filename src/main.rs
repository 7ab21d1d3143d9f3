// src/main.rs

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use beam_vibration_analyzer::batch::{ensure_output_dir, run_batch};
use beam_vibration_analyzer::config::AnalysisConfig;
use beam_vibration_analyzer::constants::REPORT_FILE_NAME;
use beam_vibration_analyzer::crate_version;
use beam_vibration_analyzer::report::ResultsReport;

/// Estimate resonant frequency and Young's modulus from cantilever beam vibration recordings.
///
/// Reads `{length}mm_Trial_{n}.csv` files from the input directory.
#[derive(Parser, Debug)]
#[command(name = "beam_vibration_analyzer", version = crate_version(), about)]
struct Cli {
    /// Directory containing the trial CSV files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for plots and the results report.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file. Command-line values take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Beam lengths in millimetres, comma separated.
    #[arg(long, value_delimiter = ',')]
    lengths: Option<Vec<u32>>,

    /// Trials per length.
    #[arg(long)]
    trials: Option<u32>,

    /// Low-pass cutoff frequency (Hz).
    #[arg(long)]
    cutoff: Option<f64>,

    /// Sample rate of the recordings (Hz).
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Butterworth filter order.
    #[arg(long)]
    order: Option<usize>,

    /// Fraction of the peak amplitude used as the crop threshold.
    #[arg(long)]
    crop_fraction: Option<f64>,

    /// Beam width (m).
    #[arg(long)]
    width: Option<f64>,

    /// Beam thickness (m).
    #[arg(long)]
    thickness: Option<f64>,

    /// Beam density (kg/m^3).
    #[arg(long)]
    density: Option<f64>,

    /// Do not render PNG plots.
    #[arg(long)]
    no_plots: bool,

    /// Do not write the CSV report.
    #[arg(long)]
    no_report: bool,

    /// Average trials with no measurable frequency in as 0 GPa.
    #[arg(long)]
    include_degenerate: bool,

    /// Write the effective configuration to this TOML file.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn apply_to(&self, config: &mut AnalysisConfig) {
        if let Some(dir) = &self.input_dir {
            config.trials.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.output_dir = dir.clone();
        }
        if let Some(lengths) = &self.lengths {
            config.trials.lengths_mm = lengths.clone();
        }
        if let Some(trials) = self.trials {
            config.trials.trials_per_length = trials;
        }
        if let Some(cutoff) = self.cutoff {
            config.filter.cutoff_hz = cutoff;
        }
        if let Some(rate) = self.sample_rate {
            config.filter.sample_rate_hz = rate;
        }
        if let Some(order) = self.order {
            config.filter.order = order;
        }
        if let Some(fraction) = self.crop_fraction {
            config.crop.fraction = fraction;
        }
        if let Some(width) = self.width {
            config.beam.width_m = width;
        }
        if let Some(thickness) = self.thickness {
            config.beam.thickness_m = thickness;
        }
        if let Some(density) = self.density {
            config.beam.density_kg_m3 = density;
        }
        if self.no_plots {
            config.output.save_plots = false;
        }
        if self.no_report {
            config.output.save_report = false;
        }
        if self.include_degenerate {
            config.trials.include_degenerate = true;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            log::info!("Loading configuration from '{}'", path.display());
            AnalysisConfig::load(path)?
        }
        None => AnalysisConfig::default(),
    };
    cli.apply_to(&mut config);
    config.validate()?;

    if let Some(path) = &cli.write_config {
        std::fs::write(path, config.to_toml_string()?)?;
        println!("Effective configuration written to '{}'.", path.display());
    }

    println!("beam_vibration_analyzer {}", crate_version());
    println!(
        "Filter: order {} Butterworth, cutoff {:.1} Hz at {:.1} Hz; crop at {:.0}% of peak",
        config.filter.order,
        config.filter.cutoff_hz,
        config.filter.sample_rate_hz,
        config.crop.fraction * 100.0
    );
    println!(
        "Beam: {} mounting, {} x {} m, density {} kg/m^3",
        config.beam.boundary.name(),
        config.beam.width_m,
        config.beam.thickness_m,
        config.beam.density_kg_m3
    );

    let aggregator = run_batch(&config)?;
    let report = ResultsReport::from_aggregator(&aggregator);
    report.print_summary();

    if aggregator.skipped_count() > 0 {
        println!(
            "  {} trial file(s) were missing and skipped.",
            aggregator.skipped_count()
        );
    }

    if config.output.save_report {
        ensure_output_dir(&config.output.output_dir)?;
        let report_path = config.output.output_dir.join(REPORT_FILE_NAME);
        report.write_csv(&report_path)?;
        println!("Results saved to '{}'.", report_path.display());
    }

    Ok(())
}
