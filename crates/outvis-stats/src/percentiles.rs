//! Linear-interpolation percentiles.
//!
//! Percentiles follow the "linear" method: for `n` sorted values the `p`-th
//! percentile sits at fractional rank `p / 100 * (n - 1)` and is interpolated
//! between the two neighbouring order statistics.

use crate::{Statistic, UndefinedStatistic, descriptive, require_present};

/// Precomputed percentile values for a dataset.
///
/// # Examples
///
/// ```
/// use outvis_stats::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(3.0));
/// assert_eq!(percentiles.get(25.0), Some(2.0));
/// assert_eq!(percentiles.get(90.0), None);
/// ```
#[derive(Debug, Clone)]
pub struct Percentiles {
    /// (percentile, value) pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted, present values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from an unsorted sample, skipping missing values.
    #[must_use]
    pub fn new(sample: &[f64], percentile_points: &[f64]) -> Self {
        let sorted = descriptive::present_sorted(sample);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a precomputed percentile.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes a single percentile from sorted, present values.
///
/// `percentile` is clamped to `0.0..=100.0`. Returns `f64::NAN` for an empty
/// slice.
///
/// # Examples
///
/// ```
/// use outvis_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 75.0), 3.25);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let rank = percentile.clamp(0.0, 100.0) / 100.0 * (sorted_values.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(sorted_values.len() - 1);
    let (low, high) = (sorted_values[lower], sorted_values[upper]);
    // equal neighbours may be infinite, where interpolating gives inf - inf
    if lower == upper || low.total_cmp(&high).is_eq() {
        return low;
    }
    low + (high - low) * (rank - rank.floor())
}

/// Computes the `percentile`-th percentile of a sample, skipping missing values.
///
/// Fails with [`UndefinedStatistic`] when no value is present.
pub fn percentile(sample: &[f64], percentile: f64) -> Result<f64, UndefinedStatistic> {
    let sorted = descriptive::present_sorted(sample);
    require_present(&sorted, 1, Statistic::Percentile)?;
    Ok(compute_percentile(&sorted, percentile))
}
