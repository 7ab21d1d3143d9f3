// src/data_analysis/zero_crossings.rs

use ndarray::Array1;

/// Finds sign changes between consecutive samples.
/// Each crossing is reported at the grid time of the later sample (no interpolation);
/// a sample that is exactly zero never forms a crossing with its neighbours.
pub fn find_crossings(time: &Array1<f64>, signal: &Array1<f64>) -> Vec<f64> {
    let n = signal.len().min(time.len());
    let mut crossings = Vec::new();
    for i in 1..n {
        if signal[i - 1] * signal[i] < 0.0 {
            crossings.push(time[i]);
        }
    }
    crossings
}

/// Time between the first and last crossing, or 0 with fewer than two crossings.
pub fn crossing_span(crossings: &[f64]) -> f64 {
    match (crossings.first(), crossings.last()) {
        (Some(first), Some(last)) if crossings.len() > 1 => last - first,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::PI;

    #[test]
    fn test_reports_later_sample_time() {
        let time = array![0.0, 0.1, 0.2, 0.3];
        let signal = array![1.0, -1.0, -0.5, 2.0];
        assert_eq!(find_crossings(&time, &signal), vec![0.1, 0.3]);
    }

    #[test]
    fn test_exact_zero_is_not_a_crossing() {
        let time = array![0.0, 1.0, 2.0];
        let signal = array![1.0, 0.0, -1.0];
        assert!(find_crossings(&time, &signal).is_empty());
    }

    #[test]
    fn test_short_signals() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert!(find_crossings(&empty, &empty).is_empty());
        assert!(find_crossings(&array![0.0], &array![-1.0]).is_empty());
    }

    #[test]
    fn test_crossing_count_matches_periods() {
        // 7 full periods of a sine offset by a quarter sample so no sample sits on zero.
        let fs = 1000.0;
        let freq = 7.0;
        let n = 1000;
        let time: Array1<f64> = Array1::from_iter((0..n).map(|i| i as f64 / fs));
        let signal = time.mapv(|t| (2.0 * PI * freq * (t + 0.25 / fs)).sin());
        let count = find_crossings(&time, &signal).len();
        assert!((13..=15).contains(&count), "got {} crossings", count);
    }

    #[test]
    fn test_crossings_strictly_increasing() {
        let time: Array1<f64> = Array1::from_iter((0..400).map(|i| i as f64 * 0.005));
        let signal = time.mapv(|t| (2.0 * PI * 3.3 * t).cos());
        let crossings = find_crossings(&time, &signal);
        assert!(crossings.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_crossing_span() {
        assert_eq!(crossing_span(&[]), 0.0);
        assert_eq!(crossing_span(&[0.4]), 0.0);
        assert!((crossing_span(&[0.1, 0.2, 0.35]) - 0.25).abs() < 1e-12);
    }
}
