//! Scoring a threshold against known labels.

use serde::Serialize;

use crate::threshold::ThresholdPair;

/// Confusion counts of a threshold against labeled values.
///
/// A value is "flagged" when it falls outside the threshold; a labeled outlier
/// that is flagged is a true positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl DetectionReport {
    /// Scores `pair` against `(value, is_labeled_outlier)` entries.
    ///
    /// ```
    /// # use outvis_threshold::{detection::DetectionReport, threshold::ThresholdPair};
    /// let pair = ThresholdPair { lower: -1.0, upper: 1.0 };
    /// let report = DetectionReport::new(&pair, [(0.0, false), (2.0, false), (5.0, true), (0.5, true)]);
    /// assert_eq!(report.true_positives, 1);
    /// assert_eq!(report.false_positives, 1);
    /// assert_eq!(report.true_negatives, 1);
    /// assert_eq!(report.false_negatives, 1);
    /// ```
    pub fn new<I>(pair: &ThresholdPair, entries: I) -> Self
    where
        I: IntoIterator<Item = (f64, bool)>,
    {
        let mut report = Self::default();
        for (value, is_outlier) in entries {
            match (pair.is_outlier(value), is_outlier) {
                (true, true) => report.true_positives += 1,
                (true, false) => report.false_positives += 1,
                (false, false) => report.true_negatives += 1,
                (false, true) => report.false_negatives += 1,
            }
        }
        report
    }

    /// Share of flagged values that are labeled outliers.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn precision(&self) -> Option<f64> {
        let flagged = self.true_positives + self.false_positives;
        (flagged > 0).then(|| self.true_positives as f64 / flagged as f64)
    }

    /// Share of labeled outliers that are flagged.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn recall(&self) -> Option<f64> {
        let outliers = self.true_positives + self.false_negatives;
        (outliers > 0).then(|| self.true_positives as f64 / outliers as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_undefined_without_flags() {
        let pair = ThresholdPair::around(0.0, 10.0);
        let report = DetectionReport::new(&pair, [(1.0, false), (2.0, false)]);
        assert_eq!(report.true_negatives, 2);
        assert_eq!(report.precision(), None);
        assert_eq!(report.recall(), None);
    }

    #[test]
    fn test_perfect_detection() {
        let pair = ThresholdPair::around(0.0, 1.0);
        let report = DetectionReport::new(&pair, [(0.0, false), (9.0, true), (-9.0, true)]);
        assert_eq!(report.precision(), Some(1.0));
        assert_eq!(report.recall(), Some(1.0));
    }
}
