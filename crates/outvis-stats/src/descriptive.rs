//! Location statistics over samples with missing values.
//!
//! Free functions work on raw samples. [`SampleSummary`] sorts a sample once and
//! keeps the sorted present values so that the spread estimators in
//! [`estimators`] can reuse them.

use crate::{Statistic, UndefinedStatistic, estimators, percentiles, require_present};

/// Collects the present (non-NaN) values of `sample` in ascending order.
///
/// # Examples
///
/// ```
/// # use outvis_stats::descriptive::present_sorted;
/// let sorted = present_sorted(&[3.0, f64::NAN, 1.0, 2.0]);
/// assert_eq!(sorted, vec![1.0, 2.0, 3.0]);
/// ```
#[must_use]
pub fn present_sorted(sample: &[f64]) -> Vec<f64> {
    let mut values = sample
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);
    values
}

/// Arithmetic mean of the present values.
#[expect(clippy::cast_precision_loss)]
pub fn mean(sample: &[f64]) -> Result<f64, UndefinedStatistic> {
    let (sum, count) = sample
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return Err(UndefinedStatistic {
            statistic: Statistic::Mean,
            present: 0,
        });
    }
    Ok(sum / count as f64)
}

/// Median of the present values.
///
/// For an even count this is the midpoint of the two central values.
///
/// ```
/// # use outvis_stats::descriptive::median;
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
/// ```
pub fn median(sample: &[f64]) -> Result<f64, UndefinedStatistic> {
    median_sorted(&present_sorted(sample))
}

/// Median of sorted, present values.
pub fn median_sorted(sorted_values: &[f64]) -> Result<f64, UndefinedStatistic> {
    require_present(sorted_values, 1, Statistic::Median)?;
    Ok(percentiles::compute_percentile(sorted_values, 50.0))
}

/// Location summary of a sample, computed from a single sort.
///
/// Holds the sorted present values so that every spread estimator can be
/// evaluated without sorting again. Construction fails only when no value is
/// present; estimators with stricter requirements (the standard deviation
/// needs two values) fail lazily when asked for.
///
/// # Examples
///
/// ```
/// # use outvis_stats::descriptive::SampleSummary;
/// let summary = SampleSummary::new(&[5.0, 1.0, f64::NAN, 3.0]).unwrap();
/// assert_eq!(summary.count, 3);
/// assert_eq!(summary.missing, 1);
/// assert_eq!(summary.median, 3.0);
/// assert_eq!(summary.mean, 3.0);
/// assert_eq!(summary.q1, 2.0);
/// assert_eq!(summary.q3, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct SampleSummary {
    /// Number of present values.
    pub count: usize,
    /// Number of missing values.
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    sorted_values: Vec<f64>,
}

impl SampleSummary {
    /// Summarizes a raw sample.
    ///
    /// Missing values are counted in [`missing`](Self::missing) and left out of
    /// every statistic.
    ///
    /// # Arguments
    ///
    /// * `sample` - The values to summarize, in any order, `NaN` for missing
    ///
    /// # Returns
    ///
    /// A `SampleSummary` over the present values, or [`UndefinedStatistic`]
    /// when no value is present.
    pub fn new(sample: &[f64]) -> Result<Self, UndefinedStatistic> {
        let sorted_values = present_sorted(sample);
        let missing = sample.len() - sorted_values.len();
        Self::from_sorted(sorted_values, missing)
    }

    /// Builds a summary from values already sorted and stripped of missing values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Present values sorted in ascending order
    /// * `missing` - Number of missing values removed from the original sample
    ///
    /// # Returns
    ///
    /// A `SampleSummary` taking ownership of `sorted_values`, or
    /// [`UndefinedStatistic`] when `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sorted(sorted_values: Vec<f64>, missing: usize) -> Result<Self, UndefinedStatistic> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        let median = median_sorted(&sorted_values)?;
        let count = sorted_values.len();
        let mean = sorted_values.iter().sum::<f64>() / count as f64;
        Ok(Self {
            count,
            missing,
            min: sorted_values[0],
            max: sorted_values[count - 1],
            mean,
            median,
            q1: percentiles::compute_percentile(&sorted_values, 25.0),
            q3: percentiles::compute_percentile(&sorted_values, 75.0),
            sorted_values,
        })
    }

    /// The present values in ascending order.
    #[must_use]
    pub fn sorted_values(&self) -> &[f64] {
        &self.sorted_values
    }

    pub fn median_absolute_deviation(&self) -> Result<f64, UndefinedStatistic> {
        estimators::median_absolute_deviation_sorted(&self.sorted_values)
    }

    pub fn adjusted_median_absolute_deviation(&self) -> Result<f64, UndefinedStatistic> {
        estimators::adjusted_median_absolute_deviation_sorted(&self.sorted_values)
    }

    #[must_use]
    pub fn inter_quartile_range(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn standard_deviation(&self) -> Result<f64, UndefinedStatistic> {
        estimators::standard_deviation_sorted(&self.sorted_values)
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_mean_skips_missing() {
        assert_relative_eq!(mean(&[1.0, f64::NAN, 2.0, 6.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_mean_of_empty() {
        let err = mean(&[]).unwrap_err();
        assert_eq!(err.statistic, Statistic::Mean);
        assert_eq!(err.present, 0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[3.0, 1.0, 2.0, 10.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_median_of_missing_only() {
        let err = median(&[f64::NAN]).unwrap_err();
        assert_eq!(err.statistic, Statistic::Median);
    }

    #[test]
    fn test_summary_single_value() {
        let summary = SampleSummary::new(&[42.0]).unwrap();
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.max, 42.0);
        assert_eq!(summary.q1, 42.0);
        assert_eq!(summary.q3, 42.0);
        assert_eq!(summary.inter_quartile_range(), 0.0);
        assert_eq!(summary.median_absolute_deviation().unwrap(), 0.0);
        assert!(summary.standard_deviation().is_err());
    }

    #[test]
    fn test_summary_of_empty() {
        assert!(SampleSummary::new(&[]).is_err());
        assert!(SampleSummary::new(&[f64::NAN, f64::NAN]).is_err());
    }

    #[test]
    fn test_summary_matches_free_functions() {
        let values = [2.5, -1.0, 7.0, f64::NAN, 3.0, 3.0, 11.5];
        let summary = SampleSummary::new(&values).unwrap();
        assert_eq!(summary.mean, mean(&values).unwrap());
        assert_eq!(summary.median, median(&values).unwrap());
        assert_eq!(
            summary.standard_deviation().unwrap(),
            estimators::standard_deviation(&values).unwrap()
        );
        assert_eq!(
            summary.inter_quartile_range(),
            estimators::inter_quartile_range(&values).unwrap()
        );
    }
}
