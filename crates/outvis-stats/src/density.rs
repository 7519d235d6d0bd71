//! Gaussian kernel density estimation.
//!
//! Bandwidth follows Scott's rule, `h = s * n^(-1/5)`, where `s` is the sample
//! standard deviation. This is the smoothing used by the usual density plots of
//! outlier-threshold charts.

use std::f64::consts::PI;

use crate::{Statistic, UndefinedStatistic, descriptive, estimators, require_present};

/// A Gaussian kernel density estimate over the present values of a sample.
///
/// # Examples
///
/// ```
/// # use outvis_stats::density::KernelDensity;
/// let kde = KernelDensity::new(&[-1.0, 0.0, 0.0, 1.0]).unwrap();
/// assert!(kde.evaluate(0.0) > kde.evaluate(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct KernelDensity {
    values: Vec<f64>,
    bandwidth: f64,
}

impl KernelDensity {
    /// Fits the estimate. Needs at least two present values.
    ///
    /// A sample without spread falls back to a unit bandwidth.
    #[expect(clippy::cast_precision_loss)]
    pub fn new(sample: &[f64]) -> Result<Self, UndefinedStatistic> {
        let values = descriptive::present_sorted(sample);
        require_present(&values, 2, Statistic::KernelDensity)?;
        let sd = estimators::standard_deviation_sorted(&values)?;
        let mut bandwidth = sd * (values.len() as f64).powf(-0.2);
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            bandwidth = 1.0;
        }
        Ok(Self { values, bandwidth })
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = self.values.len() as f64 * self.bandwidth * (2.0 * PI).sqrt();
        self.values
            .iter()
            .map(|v| {
                let z = (x - v) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }

    /// Evaluates the density at `points` evenly spaced positions over `[min, max]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate_grid(&self, min: f64, max: f64, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => vec![],
            1 => vec![(min, self.evaluate(min))],
            _ => {
                let step = (max - min) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = min + step * i as f64;
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }
}
