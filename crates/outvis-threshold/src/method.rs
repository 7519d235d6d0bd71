use std::{fmt, str::FromStr};

use outvis_stats::{UndefinedStatistic, descriptive::SampleSummary};
use serde::{Deserialize, Serialize};

use crate::threshold::ThresholdPair;

/// A univariate outlier detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Median ± c · MAD (scaled by 1.4826)
    Mad,
    /// Median ± c · MAD (scaled by 1 / Φ⁻¹(0.75))
    AdjustedMad,
    /// Q1 - c · IQR, Q3 + c · IQR (Tukey's fences)
    Iqr,
    /// Mean ± c · SD
    Sd,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Mad, Method::AdjustedMad, Method::Iqr, Method::Sd];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Method::Mad => "mad",
            Method::AdjustedMad => "adjusted-mad",
            Method::Iqr => "iqr",
            Method::Sd => "sd",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Mad => "MAD",
            Method::AdjustedMad => "Adjusted MAD",
            Method::Iqr => "IQR",
            Method::Sd => "SD",
        }
    }

    /// The bounds this method alone places with multiplier `constant`.
    ///
    /// Fails when the method's spread estimator is undefined for the sample
    /// (only the standard deviation can fail once a summary exists).
    pub fn bounds(
        self,
        summary: &SampleSummary,
        constant: f64,
    ) -> Result<ThresholdPair, UndefinedStatistic> {
        let pair = match self {
            Method::Mad => {
                let spread = summary.median_absolute_deviation()?;
                ThresholdPair::around(summary.median, constant * spread)
            }
            Method::AdjustedMad => {
                let spread = summary.adjusted_median_absolute_deviation()?;
                ThresholdPair::around(summary.median, constant * spread)
            }
            Method::Iqr => {
                let spread = constant * summary.inter_quartile_range();
                ThresholdPair {
                    lower: summary.q1 - spread,
                    upper: summary.q3 + spread,
                }
            }
            Method::Sd => {
                let spread = summary.standard_deviation()?;
                ThresholdPair::around(summary.mean, constant * spread)
            }
        };
        Ok(pair)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown method '{input}' (expected one of: mad, adjusted-mad, iqr, sd)")]
pub struct ParseMethodError {
    pub input: String,
}

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Method::ALL
            .into_iter()
            .find(|m| m.id() == normalized)
            .ok_or_else(|| ParseMethodError {
                input: s.to_owned(),
            })
    }
}

/// One value per detection method.
///
/// Used for both the weights and the constants of a [`Formula`](crate::formula::Formula).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerMethod<T> {
    pub mad: T,
    pub adjusted_mad: T,
    pub iqr: T,
    pub sd: T,
}

impl<T> PerMethod<T> {
    /// Builds a value for every method from a function.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Method) -> T,
    {
        Self {
            mad: f(Method::Mad),
            adjusted_mad: f(Method::AdjustedMad),
            iqr: f(Method::Iqr),
            sd: f(Method::Sd),
        }
    }

    #[must_use]
    pub fn get(&self, method: Method) -> &T {
        match method {
            Method::Mad => &self.mad,
            Method::AdjustedMad => &self.adjusted_mad,
            Method::Iqr => &self.iqr,
            Method::Sd => &self.sd,
        }
    }

    pub fn get_mut(&mut self, method: Method) -> &mut T {
        match method {
            Method::Mad => &mut self.mad,
            Method::AdjustedMad => &mut self.adjusted_mad,
            Method::Iqr => &mut self.iqr,
            Method::Sd => &mut self.sd,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Method, &T)> + '_ {
        Method::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    pub fn map<U, F>(&self, mut f: F) -> PerMethod<U>
    where
        F: FnMut(Method, &T) -> U,
    {
        PerMethod::from_fn(|m| f(m, self.get(m)))
    }
}

impl PerMethod<f64> {
    /// Sum of all values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| *v).sum()
    }

    /// Rescales the values so that their absolute sum is 1.
    ///
    /// Leaves all-zero values untouched.
    ///
    /// ```
    /// # use outvis_threshold::method::PerMethod;
    /// let weights = PerMethod { mad: 2.0, adjusted_mad: 0.0, iqr: 1.0, sd: 1.0 };
    /// let normalized = weights.normalize_l1();
    /// assert_eq!(normalized.mad, 0.5);
    /// assert_eq!(normalized.sd, 0.25);
    /// ```
    #[must_use]
    pub fn normalize_l1(&self) -> Self {
        let norm = self.iter().map(|(_, v)| v.abs()).sum::<f64>();
        if norm > 0.0 {
            self.map(|_, v| v / norm)
        } else {
            *self
        }
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!("mad".parse::<Method>().unwrap(), Method::Mad);
        assert_eq!("Adjusted MAD".parse::<Method>().unwrap(), Method::AdjustedMad);
        assert_eq!("adjusted_mad".parse::<Method>().unwrap(), Method::AdjustedMad);
        assert_eq!(" IQR ".parse::<Method>().unwrap(), Method::Iqr);
        assert_eq!("SD".parse::<Method>().unwrap(), Method::Sd);
        let err = "zscore".parse::<Method>().unwrap_err();
        assert_eq!(err.input, "zscore");
    }

    #[test]
    fn test_display_round_trips() {
        for method in Method::ALL {
            assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_per_method_access() {
        let mut values = PerMethod::from_fn(|m| m.id().len());
        assert_eq!(*values.get(Method::AdjustedMad), "adjusted-mad".len());
        *values.get_mut(Method::Sd) = 10;
        assert_eq!(values.sd, 10);
        let methods = values.iter().map(|(m, _)| m).collect::<Vec<_>>();
        assert_eq!(methods, Method::ALL);
    }

    #[test]
    fn test_normalize_all_zero() {
        let weights = PerMethod::<f64>::default();
        assert_eq!(weights.normalize_l1(), weights);
    }

    #[test]
    fn test_iqr_bounds_use_quartiles() {
        let summary = SampleSummary::new(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let pair = Method::Iqr.bounds(&summary, 1.5).unwrap();
        assert_eq!(pair.lower, 1.75 - 1.5 * 1.5);
        assert_eq!(pair.upper, 3.25 + 1.5 * 1.5);
    }

    #[test]
    fn test_sd_bounds_fail_on_single_value() {
        let summary = SampleSummary::new(&[4.0]).unwrap();
        assert!(Method::Sd.bounds(&summary, 3.0).is_err());
        assert!(Method::Mad.bounds(&summary, 3.0).is_ok());
        assert!(Method::Iqr.bounds(&summary, 3.0).is_ok());
    }
}
