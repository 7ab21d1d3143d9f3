// src/config.rs
//
// Run configuration: defaults, optional TOML file, and bounds checking.
// Built and validated once before any trial is processed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BEAM_THICKNESS_M, DEFAULT_BEAM_WIDTH_M, DEFAULT_CROP_FRACTION, DEFAULT_CUTOFF_HZ,
    DEFAULT_DENSITY_KG_M3, DEFAULT_FILTER_ORDER, DEFAULT_INPUT_DIR, DEFAULT_LENGTHS_MM,
    DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_RATE_HZ, DEFAULT_TRIALS_PER_LENGTH,
};
use crate::data_analysis::lowpass_filter::validate_filter_params;
use crate::data_analysis::modulus::{BeamGeometry, BoundaryCondition};
use crate::error::ConfigError;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub filter: FilterSettings,
    pub crop: CropSettings,
    pub beam: BeamSettings,
    pub trials: TrialSettings,
    pub output: OutputSettings,
}

/// Low-pass filter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub cutoff_hz: f64,
    pub sample_rate_hz: f64,
    pub order: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            order: DEFAULT_FILTER_ORDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    /// Fraction of the peak absolute amplitude a sample must exceed to be kept.
    pub fraction: f64,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_CROP_FRACTION,
        }
    }
}

/// Beam cross-section and material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamSettings {
    pub width_m: f64,
    pub thickness_m: f64,
    pub density_kg_m3: f64,
    pub boundary: BoundaryCondition,
}

impl Default for BeamSettings {
    fn default() -> Self {
        Self {
            width_m: DEFAULT_BEAM_WIDTH_M,
            thickness_m: DEFAULT_BEAM_THICKNESS_M,
            density_kg_m3: DEFAULT_DENSITY_KG_M3,
            boundary: BoundaryCondition::default(),
        }
    }
}

impl BeamSettings {
    pub fn geometry(&self) -> BeamGeometry {
        BeamGeometry::new(self.width_m, self.thickness_m, self.density_kg_m3)
    }
}

/// Which trial files to look for and how degenerate trials are averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialSettings {
    pub input_dir: PathBuf,
    pub lengths_mm: Vec<u32>,
    pub trials_per_length: u32,
    /// Average trials without a usable frequency in as a 0 GPa modulus instead of excluding them.
    pub include_degenerate: bool,
}

impl Default for TrialSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            lengths_mm: DEFAULT_LENGTHS_MM.to_vec(),
            trials_per_length: DEFAULT_TRIALS_PER_LENGTH,
            include_degenerate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub output_dir: PathBuf,
    pub save_plots: bool,
    pub save_report: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            save_plots: true,
            save_report: true,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every bound the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_filter_params(
            self.filter.cutoff_hz,
            self.filter.sample_rate_hz,
            self.filter.order,
        )?;

        let fraction = self.crop.fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::InvalidCropFraction(fraction));
        }

        for (name, value) in [
            ("width", self.beam.width_m),
            ("thickness", self.beam.thickness_m),
            ("density", self.beam.density_kg_m3),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidGeometry { name, value });
            }
        }

        if self.trials.lengths_mm.is_empty() {
            return Err(ConfigError::NoLengths);
        }
        if let Some(&bad) = self.trials.lengths_mm.iter().find(|&&l| l == 0) {
            return Err(ConfigError::InvalidLength(bad));
        }
        // Each length reads the same files; listing it twice would count them twice.
        for (i, length) in self.trials.lengths_mm.iter().enumerate() {
            if self.trials.lengths_mm[..i].contains(length) {
                return Err(ConfigError::DuplicateLength(*length));
            }
        }
        if self.trials.trials_per_length == 0 {
            return Err(ConfigError::NoTrials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trials.lengths_mm, vec![120, 160, 200]);
        assert_eq!(config.filter.order, 4);
    }

    #[test]
    fn test_cutoff_at_nyquist_rejected() {
        let mut config = AnalysisConfig::default();
        config.filter.cutoff_hz = 2500.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CutoffAboveNyquist { .. })
        ));
    }

    #[test]
    fn test_crop_fraction_bounds() {
        let mut config = AnalysisConfig::default();
        config.crop.fraction = 1.0;
        assert!(config.validate().is_ok());

        config.crop.fraction = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCropFraction(_))
        ));

        config.crop.fraction = 1.5;
        assert!(config.validate().is_err());

        config.crop.fraction = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_geometry_and_trial_bounds() {
        let mut config = AnalysisConfig::default();
        config.beam.thickness_m = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGeometry { name: "thickness", .. })
        ));

        let mut config = AnalysisConfig::default();
        config.trials.lengths_mm.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoLengths)));

        let mut config = AnalysisConfig::default();
        config.trials.trials_per_length = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoTrials)));
    }

    #[test]
    fn test_duplicate_lengths_rejected() {
        let mut config = AnalysisConfig::default();
        config.trials.lengths_mm = vec![120, 160, 120];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateLength(120))
        ));

        config.trials.lengths_mm = vec![200, 120, 160];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            [filter]
            cutoff_hz = 50.0

            [trials]
            lengths_mm = [100]
            "#,
        )
        .unwrap();
        assert_eq!(config.filter.cutoff_hz, 50.0);
        assert_eq!(config.filter.sample_rate_hz, 5000.0);
        assert_eq!(config.trials.lengths_mm, vec![100]);
        assert_eq!(config.trials.trials_per_length, 3);
        assert_eq!(config.crop.fraction, 0.1);
    }

    #[test]
    fn test_toml_roundtrip_preserves_config() {
        let mut config = AnalysisConfig::default();
        config.trials.include_degenerate = true;
        let text = config.to_toml_string().unwrap();
        let parsed: AnalysisConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
