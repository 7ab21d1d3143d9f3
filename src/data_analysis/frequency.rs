// src/data_analysis/frequency.rs

/// Oscillation frequency from zero-crossing timing.
///
/// Two crossings make one cycle, so `n` crossings spanning `period_s` seconds
/// cover `(n - 1) / 2` cycles. Returns 0 when there is not enough data
/// (`n <= 1` or a non-positive period) rather than failing.
pub fn estimate_frequency(num_crossings: usize, period_s: f64) -> f64 {
    if num_crossings <= 1 || period_s <= 0.0 || !period_s.is_finite() {
        return 0.0;
    }
    let cycles = (num_crossings - 1) as f64 / 2.0;
    cycles / period_s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_from_crossings() {
        // 101 crossings over 1 s = 50 cycles
        assert!((estimate_frequency(101, 1.0) - 50.0).abs() < 1e-12);
        assert!((estimate_frequency(3, 0.1) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_data_is_zero() {
        assert_eq!(estimate_frequency(0, 1.0), 0.0);
        assert_eq!(estimate_frequency(1, 1.0), 0.0);
        assert_eq!(estimate_frequency(10, 0.0), 0.0);
        assert_eq!(estimate_frequency(10, -0.5), 0.0);
    }

    #[test]
    fn test_monotonic_in_crossing_count() {
        let period = 0.73;
        let mut previous = estimate_frequency(0, period);
        for n in 1..500 {
            let current = estimate_frequency(n, period);
            assert!(current >= previous);
            previous = current;
        }
    }
}
