// src/data_analysis/outliers.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::OUTLIER_STD_THRESHOLD;

/// Summary statistics over the finite samples of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); `None` with fewer than two samples.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// Inclusive `[mean - k*std, mean + k*std]` band, if the deviation is defined.
    pub fn bounds(&self, threshold: f64) -> Option<(f64, f64)> {
        self.std_dev
            .map(|std| (self.mean - threshold * std, self.mean + threshold * std))
    }

    /// True when every finite sample is exactly zero.
    pub fn is_all_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }
}

/// Computes mean, sample standard deviation, min and max over the finite values.
/// Returns `None` when there are no finite values.
pub fn series_stats(values: &[f64]) -> Option<SeriesStats> {
    let finite: Array1<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let mean = finite.mean()?;
    let std_dev = (finite.len() >= 2).then(|| finite.std(1.0));
    let min = *finite.min().ok()?;
    let max = *finite.max().ok()?;
    Some(SeriesStats {
        count: finite.len(),
        mean,
        std_dev,
        min,
        max,
    })
}

/// Removes points lying more than `OUTLIER_STD_THRESHOLD` standard deviations from the mean.
pub fn filter_outliers(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    filter_outliers_with_threshold(points, OUTLIER_STD_THRESHOLD)
}

/// Keeps points whose value lies within `threshold` standard deviations of the mean.
///
/// Bounds are inclusive. Non-finite values are always dropped. With fewer than
/// two finite values the deviation is undefined and every finite point is kept.
pub fn filter_outliers_with_threshold(points: &[(f64, f64)], threshold: f64) -> Vec<(f64, f64)> {
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let bounds = series_stats(&values).and_then(|stats| stats.bounds(threshold));

    points
        .iter()
        .copied()
        .filter(|(_, v)| v.is_finite())
        .filter(|(_, v)| match bounds {
            Some((lower, upper)) => *v >= lower && *v <= upper,
            None => true,
        })
        .collect()
}

/// Number of finite samples outside the `OUTLIER_STD_THRESHOLD` band.
pub fn count_outliers(values: &[f64]) -> usize {
    let Some((lower, upper)) =
        series_stats(values).and_then(|stats| stats.bounds(OUTLIER_STD_THRESHOLD))
    else {
        return 0;
    };
    values
        .iter()
        .filter(|v| v.is_finite() && (**v < lower || **v > upper))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    #[test]
    fn test_series_stats_sample_std() {
        let stats = series_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Sample (ddof = 1) deviation: sqrt(32 / 7)
        assert!((stats.std_dev.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_series_stats_skips_nan() {
        let stats = series_stats(&[f64::NAN, 1.0, 3.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
        assert!(series_stats(&[f64::NAN]).is_none());
        assert!(series_stats(&[]).is_none());
    }

    #[test]
    fn test_single_sample_has_no_deviation() {
        let stats = series_stats(&[4.0]).unwrap();
        assert_eq!(stats.std_dev, None);
        assert_eq!(filter_outliers(&points(&[4.0])), points(&[4.0]));
    }

    #[test]
    fn test_removes_spike() {
        let mut values = vec![10.0; 20];
        values.push(1000.0);
        let filtered = filter_outliers(&points(&values));
        assert_eq!(filtered.len(), 20);
        assert!(filtered.iter().all(|(_, v)| *v == 10.0));
        assert_eq!(count_outliers(&values), 1);
    }

    #[test]
    fn test_constant_series_is_kept() {
        let values = vec![230.0; 5];
        assert_eq!(filter_outliers(&points(&values)).len(), 5);
        assert_eq!(count_outliers(&values), 0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // Zero deviation collapses the band onto the mean; inclusive bounds keep every sample.
        let stats = series_stats(&[7.0, 7.0, 7.0]).unwrap();
        assert_eq!(stats.bounds(3.0), Some((7.0, 7.0)));
        assert_eq!(filter_outliers(&points(&[7.0, 7.0, 7.0])).len(), 3);
    }

    #[test]
    fn test_nan_points_are_dropped() {
        let filtered = filter_outliers(&points(&[1.0, f64::NAN, 2.0]));
        assert_eq!(filtered, vec![(0.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_is_all_zero() {
        assert!(series_stats(&[0.0, 0.0]).unwrap().is_all_zero());
        assert!(!series_stats(&[0.0, 1.0]).unwrap().is_all_zero());
    }
}
