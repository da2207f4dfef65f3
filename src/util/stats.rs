//! Statistical helpers for background characterization.

/// Arithmetic mean of a sample.
///
/// Returns `NaN` for an empty sample, which propagates through the qualifier
/// comparisons as a rejection.
pub(crate) fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

/// Mean absolute deviation around the sample mean.
///
/// Used instead of the standard deviation as a robust dispersion estimate
/// for background radiometry.
pub(crate) fn mean_abs_deviation(values: &[f32]) -> f32 {
    let center = mean(values);
    values.iter().map(|v| (v - center).abs()).sum::<f32>() / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::{mean, mean_abs_deviation};

    #[test]
    fn mean_of_constant_sample() {
        let values = [290.0f32; 8];
        assert!((mean(&values) - 290.0).abs() < 1e-6);
    }

    #[test]
    fn mad_of_constant_sample_is_zero() {
        let values = [300.0f32; 5];
        assert!(mean_abs_deviation(&values).abs() < 1e-6);
    }

    #[test]
    fn mad_of_symmetric_spread() {
        let values = [280.0f32, 300.0];
        assert!((mean(&values) - 290.0).abs() < 1e-6);
        assert!((mean_abs_deviation(&values) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn mad_is_robust_to_sign() {
        let values = [-2.0f32, 0.0, 2.0];
        assert!((mean_abs_deviation(&values) - 4.0 / 3.0).abs() < 1e-6);
    }
}
