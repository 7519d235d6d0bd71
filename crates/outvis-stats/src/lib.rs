//! Missing-value aware statistics for univariate outlier detection.
//!
//! Every function in this crate takes a plain `&[f64]` sample in which
//! `f64::NAN` marks a missing value. Missing values are skipped by every
//! reduction (order statistics, sums, counts) instead of poisoning the result.
//!
//! # Modules
//!
//! - [`descriptive`]: Present-value extraction, mean, median and a [`descriptive::SampleSummary`]
//!   that sorts a sample once and serves every estimator
//! - [`percentiles`]: Linear-interpolation percentiles
//! - [`estimators`]: MAD, adjusted MAD, IQR and standard deviation
//! - [`histogram`]: Equal-width histograms
//! - [`density`]: Gaussian kernel density estimation
//!
//! # Examples
//!
//! ## Computing the spread estimators
//!
//! ```
//! use outvis_stats::estimators;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 100.0];
//! let mad = estimators::median_absolute_deviation(&values).unwrap();
//! assert!((mad - 1.4826).abs() < 1e-12);
//!
//! let iqr = estimators::inter_quartile_range(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert!((iqr - 1.5).abs() < 1e-12);
//! ```
//!
//! ## Missing values are ignored
//!
//! ```
//! use outvis_stats::descriptive;
//!
//! let values = [1.0, f64::NAN, 3.0];
//! assert_eq!(descriptive::mean(&values).unwrap(), 2.0);
//! assert!(descriptive::mean(&[f64::NAN]).is_err());
//! ```

pub mod density;
pub mod descriptive;
pub mod estimators;
pub mod histogram;
pub mod percentiles;

/// A statistic that can fail on a degenerate sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Statistic {
    #[display("median")]
    Median,
    #[display("percentile")]
    Percentile,
    #[display("mean")]
    Mean,
    #[display("median absolute deviation")]
    MedianAbsoluteDeviation,
    #[display("adjusted median absolute deviation")]
    AdjustedMedianAbsoluteDeviation,
    #[display("inter-quartile range")]
    InterQuartileRange,
    #[display("standard deviation")]
    StandardDeviation,
    #[display("kernel density estimate")]
    KernelDensity,
}

/// A statistic could not be computed because too few values were present.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{statistic} is undefined for a sample with {present} present value(s)")]
pub struct UndefinedStatistic {
    /// The statistic that failed.
    pub statistic: Statistic,
    /// Number of non-missing values in the sample.
    pub present: usize,
}

/// Fails unless `present` holds at least `required` values.
pub(crate) fn require_present(
    present: &[f64],
    required: usize,
    statistic: Statistic,
) -> Result<(), UndefinedStatistic> {
    if present.len() < required {
        return Err(UndefinedStatistic {
            statistic,
            present: present.len(),
        });
    }
    Ok(())
}
