use outvis_stats::{UndefinedStatistic, descriptive::SampleSummary};
use serde::{Deserialize, Serialize};

use crate::formula::Formula;

/// Lower and upper outlier thresholds.
///
/// Values strictly outside `[lower, upper]` are flagged as outliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub lower: f64,
    pub upper: f64,
}

impl ThresholdPair {
    /// `center ± spread`.
    #[must_use]
    pub fn around(center: f64, spread: f64) -> Self {
        Self {
            lower: center - spread,
            upper: center + spread,
        }
    }

    /// Whether `value` lies within the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether a present `value` falls outside the bounds. Missing values are never outliers.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        !value.is_nan() && !self.contains(value)
    }

    /// Counts the values of `sample` below, within and above the bounds.
    ///
    /// ```
    /// # use outvis_threshold::threshold::ThresholdPair;
    /// let pair = ThresholdPair { lower: 0.0, upper: 10.0 };
    /// let classification = pair.classify(&[-1.0, 0.0, 5.0, 10.0, 11.0, 12.0, f64::NAN]);
    /// assert_eq!(classification.below, 1);
    /// assert_eq!(classification.within, 3);
    /// assert_eq!(classification.above, 2);
    /// assert_eq!(classification.missing, 1);
    /// assert_eq!(classification.outliers(), 3);
    /// ```
    #[must_use]
    pub fn classify(&self, sample: &[f64]) -> Classification {
        let mut classification = Classification::default();
        for &value in sample {
            if value.is_nan() {
                classification.missing += 1;
            } else if value < self.lower {
                classification.below += 1;
            } else if value > self.upper {
                classification.above += 1;
            } else {
                classification.within += 1;
            }
        }
        classification
    }
}

/// Position of sample values relative to a [`ThresholdPair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub below: usize,
    pub within: usize,
    pub above: usize,
    pub missing: usize,
}

impl Classification {
    #[must_use]
    pub fn outliers(&self) -> usize {
        self.below + self.above
    }
}

/// Computes the weighted outlier thresholds of `sample`.
///
/// Each method with a non-zero weight contributes `weight * bounds`, where
/// `bounds` is the method's own pair with its constant (see
/// [`Method::bounds`](crate::method::Method::bounds)). Weights are not
/// normalized or validated.
///
/// Fails with [`UndefinedStatistic`] when no value of the sample is present, or
/// when a method with non-zero weight cannot be estimated (the SD needs two
/// present values).
pub fn compute_threshold(
    sample: &[f64],
    formula: &Formula,
) -> Result<ThresholdPair, UndefinedStatistic> {
    let summary = SampleSummary::new(sample)?;
    compute_threshold_from_summary(&summary, formula)
}

/// [`compute_threshold`] on an already summarized sample.
pub fn compute_threshold_from_summary(
    summary: &SampleSummary,
    formula: &Formula,
) -> Result<ThresholdPair, UndefinedStatistic> {
    let mut threshold = ThresholdPair {
        lower: 0.0,
        upper: 0.0,
    };
    for method in formula.active_methods() {
        let weight = *formula.weights.get(method);
        let bounds = method.bounds(summary, *formula.constants.get(method))?;
        tracing::debug!(
            %method,
            weight,
            lower = bounds.lower,
            upper = bounds.upper,
            "method bounds"
        );
        threshold.lower += weight * bounds.lower;
        threshold.upper += weight * bounds.upper;
    }
    tracing::debug!(
        lower = threshold.lower,
        upper = threshold.upper,
        count = summary.count,
        "computed threshold"
    );
    Ok(threshold)
}
