// src/data_analysis/signal_crop.rs

use ndarray::{s, Array1};
use ndarray_stats::QuantileExt;

use crate::types::TracePair;

/// Returns the inclusive index range whose absolute value exceeds `fraction` of the peak,
/// or None when no sample does (empty, all-zero, or `fraction` too large).
pub fn crop_bounds(signal: &Array1<f64>, fraction: f64) -> Option<(usize, usize)> {
    let magnitude = signal.mapv(f64::abs);
    let peak = *magnitude.max().ok()?;
    let threshold = fraction * peak;

    let first = magnitude.iter().position(|&v| v > threshold)?;
    let last = magnitude.iter().rposition(|&v| v > threshold)?;
    Some((first, last))
}

/// Crops a trace to the region where the signal is active.
/// `time` and `signal` must have the same length; an inactive trace crops to zero length.
pub fn crop_signal(
    time: &Array1<f64>,
    signal: &Array1<f64>,
    fraction: f64,
) -> TracePair {
    debug_assert_eq!(time.len(), signal.len());
    match crop_bounds(signal, fraction) {
        Some((first, last)) => (
            time.slice(s![first..=last]).to_owned(),
            signal.slice(s![first..=last]).to_owned(),
        ),
        None => (Array1::zeros(0), Array1::zeros(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_crop_removes_quiet_edges() {
        let time = array![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let signal = array![0.01, -0.02, 0.5, -1.0, 0.8, 0.05, 0.0];
        let (t, x) = crop_signal(&time, &signal, 0.1);
        assert_eq!(t, array![0.2, 0.3, 0.4]);
        assert_eq!(x, array![0.5, -1.0, 0.8]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 0.1 * 1.0 == 0.1 exactly, so the 0.1 samples are not kept.
        let time = array![0.0, 1.0, 2.0, 3.0];
        let signal = array![0.1, 1.0, 0.2, 0.1];
        let (t, _) = crop_signal(&time, &signal, 0.1);
        assert_eq!(t, array![1.0, 2.0]);
    }

    #[test]
    fn test_interior_quiet_samples_kept() {
        let time = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let signal = array![0.0, 1.0, 0.0, -1.0, 0.0];
        let (t, x) = crop_signal(&time, &signal, 0.5);
        assert_eq!(t, array![1.0, 2.0, 3.0]);
        assert_eq!(x, array![1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_all_zero_signal_crops_to_empty() {
        let time = array![0.0, 1.0, 2.0];
        let signal = array![0.0, 0.0, 0.0];
        let (t, x) = crop_signal(&time, &signal, 0.1);
        assert!(t.is_empty());
        assert!(x.is_empty());
    }

    #[test]
    fn test_full_fraction_crops_to_empty() {
        // Nothing strictly exceeds the peak itself.
        let time = array![0.0, 1.0, 2.0];
        let signal = array![0.2, 1.0, -0.5];
        assert_eq!(crop_bounds(&signal, 1.0), None);
        let (t, _) = crop_signal(&time, &signal, 1.0);
        assert!(t.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert_eq!(crop_bounds(&empty, 0.1), None);
    }

    #[test]
    fn test_crop_is_idempotent() {
        let time: Array1<f64> = Array1::from_iter((0..500).map(|i| i as f64 * 0.001));
        let signal: Array1<f64> = Array1::from_iter((0..500).map(|i| {
            let t = i as f64 * 0.001;
            let envelope = if (100..400).contains(&i) { 1.0 } else { 0.02 };
            envelope * (2.0 * std::f64::consts::PI * 25.0 * t).sin()
        }));
        let (t1, x1) = crop_signal(&time, &signal, 0.1);
        let (t2, x2) = crop_signal(&t1, &x1, 0.1);
        assert!(!t1.is_empty());
        assert_eq!(t1, t2);
        assert_eq!(x1, x2);
    }
}
