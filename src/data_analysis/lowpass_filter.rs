// src/data_analysis/lowpass_filter.rs

use std::f64::consts::PI;

use crate::constants::FILTFILT_PAD_FACTOR;
use crate::error::ConfigError;

/// One second-order section in transposed direct form II, normalized so a0 == 1.
/// First-order sections leave b2 and a2 at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSection {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl FilterSection {
    /// Gain at 0 Hz.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Delay-line state that makes the section start in steady state for a unit step input.
    fn steady_state(&self) -> [f64; 2] {
        let g = self.dc_gain();
        [g - self.b0, self.b2 - self.a2 * g]
    }
}

/// Butterworth low-pass filter realized as cascaded sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthLowpass {
    sections: Vec<FilterSection>,
    order: usize,
}

/// Checks the filter design preconditions shared by the config layer and the filter itself.
pub fn validate_filter_params(
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: usize,
) -> Result<(), ConfigError> {
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Err(ConfigError::InvalidSampleRate(sample_rate_hz));
    }
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
        return Err(ConfigError::InvalidCutoff(cutoff_hz));
    }
    let nyquist_hz = 0.5 * sample_rate_hz;
    if cutoff_hz >= nyquist_hz {
        return Err(ConfigError::CutoffAboveNyquist {
            cutoff_hz,
            nyquist_hz,
        });
    }
    if order < 1 {
        return Err(ConfigError::InvalidFilterOrder(order));
    }
    Ok(())
}

impl ButterworthLowpass {
    /// Designs the digital filter by bilinear transform of the analog Butterworth prototype,
    /// pre-warped so the -3 dB point lands exactly on `cutoff_hz`.
    pub fn design(cutoff_hz: f64, sample_rate_hz: f64, order: usize) -> Result<Self, ConfigError> {
        validate_filter_params(cutoff_hz, sample_rate_hz, order)?;

        let k = (PI * cutoff_hz / sample_rate_hz).tan();
        let k2 = k * k;
        let mut sections = Vec::with_capacity(order.div_ceil(2));

        // Conjugate pole pairs: s^2 + 2 sin(theta) s + 1
        for pair in 0..order / 2 {
            let theta = PI * (2 * pair + 1) as f64 / (2 * order) as f64;
            let inv_q = 2.0 * theta.sin();
            let norm = 1.0 / (1.0 + k * inv_q + k2);
            let b0 = k2 * norm;
            sections.push(FilterSection {
                b0,
                b1: 2.0 * b0,
                b2: b0,
                a1: 2.0 * (k2 - 1.0) * norm,
                a2: (1.0 - k * inv_q + k2) * norm,
            });
        }

        // Odd orders keep one real pole: s + 1
        if order % 2 == 1 {
            let norm = 1.0 / (1.0 + k);
            let b0 = k * norm;
            sections.push(FilterSection {
                b0,
                b1: b0,
                b2: 0.0,
                a1: (k - 1.0) * norm,
                a2: 0.0,
            });
        }

        Ok(Self { sections, order })
    }

    pub fn sections(&self) -> &[FilterSection] {
        &self.sections
    }

    /// Number of samples reflected at each edge before zero-phase filtering.
    pub fn pad_length(&self) -> usize {
        FILTFILT_PAD_FACTOR * (self.order + 1)
    }

    /// Single causal pass. Each section starts in the steady state it would reach
    /// for a constant input equal to `data[0]`, which suppresses the start-up transient.
    pub fn filter_forward(&self, data: &[f64]) -> Vec<f64> {
        let mut output = data.to_vec();
        let Some(&first) = data.first() else {
            return output;
        };

        let mut section_input_level = first;
        for section in &self.sections {
            let [zi0, zi1] = section.steady_state();
            let mut z0 = zi0 * section_input_level;
            let mut z1 = zi1 * section_input_level;

            for sample in output.iter_mut() {
                let x = *sample;
                let y = section.b0 * x + z0;
                z0 = section.b1 * x - section.a1 * y + z1;
                z1 = section.b2 * x - section.a2 * y;
                *sample = y;
            }
            section_input_level *= section.dc_gain();
        }
        output
    }

    /// Zero-phase filtering: forward pass, backward pass, with odd extension at both edges.
    /// Output has the same length as the input and no phase lag.
    pub fn filtfilt(&self, data: &[f64]) -> Vec<f64> {
        let n = data.len();
        if n == 0 {
            return Vec::new();
        }
        let pad = self.pad_length().min(n - 1);

        let mut extended = Vec::with_capacity(n + 2 * pad);
        for i in (1..=pad).rev() {
            extended.push(2.0 * data[0] - data[i]);
        }
        extended.extend_from_slice(data);
        for i in 1..=pad {
            extended.push(2.0 * data[n - 1] - data[n - 1 - i]);
        }

        let mut forward = self.filter_forward(&extended);
        forward.reverse();
        let mut backward = self.filter_forward(&forward);
        backward.reverse();

        backward[pad..pad + n].to_vec()
    }
}

/// Designs a Butterworth low-pass and applies it forward and backward.
pub fn lowpass_filter(
    signal: &[f64],
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: usize,
) -> Result<Vec<f64>, ConfigError> {
    let filter = ButterworthLowpass::design(cutoff_hz, sample_rate_hz, order)?;
    Ok(filter.filtfilt(signal))
}
