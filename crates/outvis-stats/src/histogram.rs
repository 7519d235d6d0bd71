use std::ops::Range;

use crate::descriptive;

/// Equal-width histogram of the present values of a sample.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// Values covered by this bin (inclusive start, exclusive end). The last
    /// bin's end is nudged up so the maximum is included.
    pub range: Range<f64>,
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins spanning the sample range.
    ///
    /// Missing values are skipped. An empty sample or `num_bins == 0` gives an
    /// empty histogram; a sample without spread gets unit-width bins starting at
    /// its single value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use outvis_stats::histogram::Histogram;
    /// let histogram = Histogram::new(&[1.0, 2.0, 2.5, f64::NAN, 4.0], 3);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![1, 2, 1]);
    /// ```
    #[must_use]
    pub fn new(sample: &[f64], num_bins: usize) -> Self {
        Self::from_sorted(&descriptive::present_sorted(sample), num_bins)
    }

    /// Creates a histogram from sorted, present values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut range = max - min;
        if range < f64::EPSILON {
            range = num_bins as f64;
        }
        let bin_width = range / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|idx| {
                // recompute each edge from min to avoid accumulated error
                let start = min + (idx as f64) * bin_width;
                let mut end = min + ((idx + 1) as f64) * bin_width;
                if idx == num_bins - 1 {
                    end = end.max(max).next_up();
                }
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &value in sorted_values {
            let idx = (((value - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Histogram::new(&[], 5).bins.is_empty());
        assert!(Histogram::new(&[f64::NAN], 5).bins.is_empty());
        assert!(Histogram::new(&[1.0, 2.0], 0).bins.is_empty());
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new(&[0.0, 10.0], 5);
        assert_eq!(histogram.bins.len(), 5);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[4].count, 1);
        assert!(histogram.bins[4].range.contains(&10.0));
    }

    #[test]
    fn test_constant_sample() {
        let histogram = Histogram::new(&[3.0; 10], 4);
        assert_eq!(histogram.bins[0].count, 10);
        assert_eq!(histogram.total(), 10);
    }

    #[test]
    fn test_every_value_is_in_its_bin_range() {
        let values = (0..100).map(f64::from).map(|v| (v * 0.37).sin() * 50.0).collect::<Vec<_>>();
        let histogram = Histogram::new(&values, 7);
        assert_eq!(histogram.total(), 100);
        for value in values {
            let containing = histogram
                .bins
                .iter()
                .filter(|bin| bin.range.contains(&value))
                .count();
            assert_eq!(containing, 1, "value {value} should be in exactly one bin");
        }
    }
}
