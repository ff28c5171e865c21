//! Z-score outlier detection.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Default |z| threshold for flagging.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// One flagged entry: original position, raw value, signed z-score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlier {
    pub index: usize,
    pub value: f64,
    pub z: f64,
}

/// Flag entries whose |z| meets `z_threshold`, using the population
/// standard deviation (divide by N, not N−1).
///
/// Degenerate input never errors: an empty series, a constant series, or
/// a NaN-contaminated one all yield an empty list.
pub fn outliers(series: &[f64], z_threshold: f64) -> Vec<Outlier> {
    if series.is_empty() {
        return Vec::new();
    }

    let mean = series.iter().mean();
    let std = series.iter().population_std_dev();
    if !std.is_finite() || std <= 0.0 || !mean.is_finite() {
        return Vec::new();
    }

    series
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z = (value - mean) / std;
            (z.abs() >= z_threshold).then(|| Outlier { index, value, z })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_yields_empty() {
        assert!(outliers(&[], DEFAULT_Z_THRESHOLD).is_empty());
    }

    #[test]
    fn test_constant_series_yields_empty() {
        let series = [7.0; 20];
        assert!(outliers(&series, DEFAULT_Z_THRESHOLD).is_empty());
    }

    #[test]
    fn test_nan_contaminated_series_yields_empty() {
        let series = [1.0, 2.0, f64::NAN, 4.0];
        assert!(outliers(&series, DEFAULT_Z_THRESHOLD).is_empty());
    }

    #[test]
    fn test_single_spike_flagged() {
        // 19 values at 10.0 and one at 100.0 — the spike dominates.
        let mut series = vec![10.0; 19];
        series.push(100.0);

        let flagged = outliers(&series, 3.0);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].index, 19);
        assert_eq!(flagged[0].value, 100.0);
        assert!(flagged[0].z > 3.0);
    }

    #[test]
    fn test_negative_spike_has_negative_z() {
        let mut series = vec![50.0; 19];
        series.push(-40.0);

        let flagged = outliers(&series, 3.0);
        assert_eq!(flagged.len(), 1);
        assert!(flagged[0].z < -3.0);
    }

    #[test]
    fn test_population_std_dev_divides_by_n() {
        // For [0, 10]: population std = 5 (N), sample std ≈ 7.07 (N-1).
        // With threshold 1.0 both points are exactly |z| = 1 under the
        // population convention, so both must be flagged.
        let flagged = outliers(&[0.0, 10.0], 1.0);
        assert_eq!(flagged.len(), 2);
        assert!((flagged[0].z + 1.0).abs() < 1e-12);
        assert!((flagged[1].z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mild_variation_not_flagged() {
        let series = [9.8, 10.1, 10.0, 9.9, 10.2];
        assert!(outliers(&series, 3.0).is_empty());
    }
}
