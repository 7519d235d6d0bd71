//! Spread estimators used to place outlier thresholds.
//!
//! Each estimator comes in two flavours: one taking a raw sample (missing values
//! allowed, any order) and a `*_sorted` variant taking present values in
//! ascending order, used by [`SampleSummary`](crate::descriptive::SampleSummary)
//! to avoid re-sorting.

use std::sync::LazyLock;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::{
    Statistic, UndefinedStatistic,
    descriptive::{self, present_sorted},
    percentiles, require_present,
};

/// Scale factor making the MAD a consistent estimator of the standard
/// deviation under normality.
pub const MAD_SCALE: f64 = 1.4826;

/// `1 / Φ⁻¹(0.75)`, the exact normal-consistency factor.
pub static ADJUSTED_MAD_SCALE: LazyLock<f64> = LazyLock::new(|| {
    let standard_normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    1.0 / standard_normal.inverse_cdf(0.75)
});

/// Median absolute deviation scaled by [`MAD_SCALE`].
///
/// ```
/// # use outvis_stats::estimators::median_absolute_deviation;
/// let mad = median_absolute_deviation(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
/// assert!((mad - 1.4826).abs() < 1e-12);
/// ```
pub fn median_absolute_deviation(sample: &[f64]) -> Result<f64, UndefinedStatistic> {
    median_absolute_deviation_sorted(&present_sorted(sample))
}

pub fn median_absolute_deviation_sorted(sorted_values: &[f64]) -> Result<f64, UndefinedStatistic> {
    let raw = raw_median_absolute_deviation(sorted_values, Statistic::MedianAbsoluteDeviation)?;
    Ok(raw * MAD_SCALE)
}

/// Median absolute deviation scaled by `1 / Φ⁻¹(0.75)`.
///
/// Numerically close to [`median_absolute_deviation`] but derived from the
/// standard normal quantile function instead of a rounded constant.
pub fn adjusted_median_absolute_deviation(sample: &[f64]) -> Result<f64, UndefinedStatistic> {
    adjusted_median_absolute_deviation_sorted(&present_sorted(sample))
}

pub fn adjusted_median_absolute_deviation_sorted(
    sorted_values: &[f64],
) -> Result<f64, UndefinedStatistic> {
    let raw = raw_median_absolute_deviation(
        sorted_values,
        Statistic::AdjustedMedianAbsoluteDeviation,
    )?;
    Ok(raw * *ADJUSTED_MAD_SCALE)
}

fn raw_median_absolute_deviation(
    sorted_values: &[f64],
    statistic: Statistic,
) -> Result<f64, UndefinedStatistic> {
    require_present(sorted_values, 1, statistic)?;
    let center = descriptive::median_sorted(sorted_values)?;
    let mut deviations = sorted_values
        .iter()
        .map(|v| (v - center).abs())
        .collect::<Vec<_>>();
    deviations.sort_by(f64::total_cmp);
    Ok(percentiles::compute_percentile(&deviations, 50.0))
}

/// 75th minus 25th percentile, both linearly interpolated.
pub fn inter_quartile_range(sample: &[f64]) -> Result<f64, UndefinedStatistic> {
    inter_quartile_range_sorted(&present_sorted(sample))
}

pub fn inter_quartile_range_sorted(sorted_values: &[f64]) -> Result<f64, UndefinedStatistic> {
    require_present(sorted_values, 1, Statistic::InterQuartileRange)?;
    Ok(percentiles::compute_percentile(sorted_values, 75.0)
        - percentiles::compute_percentile(sorted_values, 25.0))
}

/// Sample standard deviation with Bessel's correction.
///
/// Needs at least two present values.
///
/// ```
/// # use outvis_stats::estimators::standard_deviation;
/// let sd = standard_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
/// assert!(standard_deviation(&[5.0]).is_err());
/// ```
pub fn standard_deviation(sample: &[f64]) -> Result<f64, UndefinedStatistic> {
    standard_deviation_sorted(&present_sorted(sample))
}

#[expect(clippy::cast_precision_loss)]
pub fn standard_deviation_sorted(sorted_values: &[f64]) -> Result<f64, UndefinedStatistic> {
    require_present(sorted_values, 2, Statistic::StandardDeviation)?;
    let n = sorted_values.len() as f64;
    let mean = sorted_values.iter().sum::<f64>() / n;
    let squared_deviations = sorted_values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>();
    Ok((squared_deviations / (n - 1.0)).sqrt())
}
