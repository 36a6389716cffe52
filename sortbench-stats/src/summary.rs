//! Deviation Statistics
//!
//! Reduces a sequence of timing samples (milliseconds) to the dispersion
//! metrics reported by the deviation benchmark:
//! - Range (max - min)
//! - Mean
//! - Sample standard deviation (Bessel's correction)
//! - Coefficient of variation (stddev as a percentage of the mean)

use serde::{Deserialize, Serialize};

/// Summary of repeated timing samples
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviationStatistics {
    /// Number of samples reduced
    pub count: usize,
    /// Fastest sample
    pub min: f64,
    /// Slowest sample
    pub max: f64,
    /// `max - min`
    pub range: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation, `0.0` when fewer than two samples exist
    pub std_dev: f64,
    /// `std_dev / mean * 100`, `0.0` when the mean is zero
    pub coefficient_of_variation: f64,
}

/// Compute deviation statistics over `samples`.
///
/// Empty input yields all-zero statistics. A single sample has no spread, so
/// its standard deviation is defined as `0.0` rather than dividing by `n - 1 = 0`.
pub fn compute_summary(samples: &[f64]) -> DeviationStatistics {
    if samples.is_empty() {
        return DeviationStatistics::default();
    }

    let count = samples.len();

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mean = samples.iter().sum::<f64>() / count as f64;
    let std_dev = sample_std_dev(samples, mean);

    DeviationStatistics {
        count,
        min,
        max,
        range: max - min,
        mean,
        std_dev,
        coefficient_of_variation: coefficient_of_variation(std_dev, mean),
    }
}

/// Sample standard deviation around a precomputed mean
pub fn sample_std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let variance =
        samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Standard deviation expressed as a percentage of the mean
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        0.0
    } else {
        (std_dev / mean) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let summary = compute_summary(&[10.0, 20.0, 30.0]);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 30.0);
        assert!((summary.range - 20.0).abs() < f64::EPSILON);
        assert!((summary.mean - 20.0).abs() < f64::EPSILON);
        assert!((summary.std_dev - 10.0).abs() < 1e-9);
        assert!((summary.coefficient_of_variation - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_has_zero_deviation() {
        let summary = compute_summary(&[42.0]);

        assert_eq!(summary.count, 1);
        assert_eq!(summary.range, 0.0);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
        assert!(!summary.std_dev.is_nan());

        // Repeated calls give the same answer
        assert_eq!(compute_summary(&[42.0]), summary);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);

        assert_eq!(summary.count, 0);
        assert_eq!(summary, DeviationStatistics::default());
    }

    #[test]
    fn test_zero_mean_coefficient_of_variation() {
        let summary = compute_summary(&[0.0, 0.0, 0.0]);

        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_constant_samples_have_no_spread() {
        let summary = compute_summary(&[5.0, 5.0, 5.0, 5.0]);

        assert_eq!(summary.range, 0.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_unordered_input() {
        let summary = compute_summary(&[3.0, 1.0, 2.0]);

        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert!((summary.std_dev - 1.0).abs() < 1e-9);
    }
}
