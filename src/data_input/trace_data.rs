// src/data_input/trace_data.rs

use ndarray::Array1;

/// One row of a trial recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub time_sec: f64, // Timestamp (in seconds).
    pub level: f64,    // Quantisation level reported by the sensor.
}

/// A whole trial recording, time strictly increasing. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTrace {
    samples: Vec<RawSample>,
}

impl RawTrace {
    /// Returns None unless timestamps strictly increase.
    pub fn new(samples: Vec<RawSample>) -> Option<Self> {
        if samples.windows(2).all(|w| w[1].time_sec > w[0].time_sec) {
            Some(Self { samples })
        } else {
            None
        }
    }

    /// Builds a trace from parallel columns; None on length mismatch or unordered time.
    pub fn from_columns(time_sec: &[f64], level: &[f64]) -> Option<Self> {
        if time_sec.len() != level.len() {
            return None;
        }
        Self::new(
            time_sec
                .iter()
                .zip(level)
                .map(|(&time_sec, &level)| RawSample { time_sec, level })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.time_sec).collect()
    }

    pub fn levels(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.level).collect()
    }

    /// Average sample rate from consecutive timestamps, None with fewer than two samples.
    pub fn estimated_sample_rate(&self) -> Option<f64> {
        let mut total_delta = 0.0;
        let mut count = 0usize;
        for pair in self.samples.windows(2) {
            let delta = pair[1].time_sec - pair[0].time_sec;
            if delta > 1e-9 {
                total_delta += delta;
                count += 1;
            }
        }
        if count > 0 {
            Some(count as f64 / total_delta)
        } else {
            None
        }
    }
}
