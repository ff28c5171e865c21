//! Linear trend classification for ordered numeric series.

use std::fmt;

/// Default slope magnitude below which a series counts as flat.
pub const DEFAULT_MIN_ABS_SLOPE: f64 = 1e-6;

/// Trend classification for an ordered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendLabel {
    Upward,
    Downward,
    Flat,
    /// Fewer than 2 points — no slope can be fitted.
    InsufficientData,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upward => write!(f, "upward trend"),
            Self::Downward => write!(f, "downward trend"),
            Self::Flat => write!(f, "no significant trend"),
            Self::InsufficientData => write!(f, "no trend (insufficient data)"),
        }
    }
}

/// Classify the ordinary least-squares slope of `series` against its
/// 0-based index.
///
/// Deliberately a plain OLS fit, not a robust estimator — single outliers
/// pull the slope, and the outlier detector exists to flag them.
pub fn trend(series: &[f64], min_abs_slope: f64) -> TrendLabel {
    if series.len() < 2 {
        return TrendLabel::InsufficientData;
    }

    let slope = ols_slope(series);
    if slope > min_abs_slope {
        TrendLabel::Upward
    } else if slope < -min_abs_slope {
        TrendLabel::Downward
    } else {
        TrendLabel::Flat
    }
}

/// Closed-form OLS slope with x = 0, 1, ..., n-1.
fn ols_slope(y: &[f64]) -> f64 {
    let n = y.len() as f64;
    let sum_x = (n - 1.0) * n / 2.0;
    let sum_x2 = (n - 1.0) * n * (2.0 * n - 1.0) / 6.0;
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = y.iter().enumerate().map(|(i, v)| i as f64 * v).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upward_trend() {
        let series = [1.0, 2.0, 3.1, 3.9, 5.2];
        assert_eq!(trend(&series, DEFAULT_MIN_ABS_SLOPE), TrendLabel::Upward);
    }

    #[test]
    fn test_downward_trend() {
        let series = [10.0, 8.5, 7.9, 6.0, 5.5];
        assert_eq!(trend(&series, DEFAULT_MIN_ABS_SLOPE), TrendLabel::Downward);
    }

    #[test]
    fn test_flat_series() {
        let series = [2.0, 2.0, 2.0, 2.0];
        assert_eq!(trend(&series, DEFAULT_MIN_ABS_SLOPE), TrendLabel::Flat);
    }

    #[test]
    fn test_insufficient_data_never_panics() {
        assert_eq!(trend(&[], DEFAULT_MIN_ABS_SLOPE), TrendLabel::InsufficientData);
        assert_eq!(trend(&[42.0], DEFAULT_MIN_ABS_SLOPE), TrendLabel::InsufficientData);
    }

    #[test]
    fn test_exact_slope_on_perfect_line() {
        // y = 3x + 1 → slope exactly 3
        let series = [1.0, 4.0, 7.0, 10.0];
        let slope = ols_slope(&series);
        assert!((slope - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_controls_flat_band() {
        // Gentle slope of 0.001 per step
        let series = [0.0, 0.001, 0.002, 0.003];
        assert_eq!(trend(&series, 1e-6), TrendLabel::Upward);
        assert_eq!(trend(&series, 0.01), TrendLabel::Flat);
    }

    #[test]
    fn test_single_outlier_pulls_slope() {
        // OLS is sensitive by design; a large terminal spike flips the label.
        let series = [5.0, 5.0, 5.0, 5.0, 50.0];
        assert_eq!(trend(&series, DEFAULT_MIN_ABS_SLOPE), TrendLabel::Upward);
    }
}
