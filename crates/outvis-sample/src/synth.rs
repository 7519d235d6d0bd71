//! Synthetic samples from a skew-normal distribution.

use rand::Rng;
use rand_distr::SkewNormal;
use serde::{Deserialize, Serialize};

/// Parameters of a synthesized skew-normal sample.
///
/// `skewness` is the shape parameter: 0 gives a normal distribution, negative
/// values a left tail and positive values a right tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewNormalSpec {
    pub mean: f64,
    pub sd: f64,
    pub size: usize,
    pub skewness: f64,
}

impl Default for SkewNormalSpec {
    fn default() -> Self {
        Self {
            mean: 0.0,
            sd: 1.0,
            size: 10_000,
            skewness: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("invalid skew-normal parameters (mean={mean}, sd={sd}, skewness={skewness}): {reason}")]
pub struct InvalidSkewNormal {
    pub mean: f64,
    pub sd: f64,
    pub skewness: f64,
    pub reason: &'static str,
}

impl SkewNormalSpec {
    /// Draws `size` values.
    ///
    /// ```
    /// # use outvis_sample::synth::SkewNormalSpec;
    /// # use rand::SeedableRng as _;
    /// let spec = SkewNormalSpec { mean: 10.0, sd: 2.0, size: 500, skewness: 4.0 };
    /// let values = spec.generate(&mut rand::rngs::StdRng::seed_from_u64(3)).unwrap();
    /// assert_eq!(values.len(), 500);
    /// ```
    pub fn generate<R>(&self, rng: &mut R) -> Result<Vec<f64>, InvalidSkewNormal>
    where
        R: Rng + ?Sized,
    {
        let distribution = self.distribution()?;
        Ok((0..self.size).map(|_| rng.sample(distribution)).collect())
    }

    fn distribution(&self) -> Result<SkewNormal<f64>, InvalidSkewNormal> {
        let invalid = |reason| InvalidSkewNormal {
            mean: self.mean,
            sd: self.sd,
            skewness: self.skewness,
            reason,
        };
        if !self.mean.is_finite() || !self.skewness.is_finite() {
            return Err(invalid("mean and skewness must be finite"));
        }
        if !self.sd.is_finite() || self.sd <= 0.0 {
            return Err(invalid("standard deviation must be positive"));
        }
        SkewNormal::new(self.mean, self.sd, self.skewness)
            .map_err(|_| invalid("rejected by the skew-normal sampler"))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / 20_000.0
    }

    #[test]
    fn test_symmetric_sample_centers_on_mean() {
        let spec = SkewNormalSpec {
            mean: 5.0,
            sd: 1.0,
            size: 20_000,
            skewness: 0.0,
        };
        let values = spec.generate(&mut Pcg64Mcg::seed_from_u64(11)).unwrap();
        assert_eq!(values.len(), 20_000);
        assert!((mean(&values) - 5.0).abs() < 0.05);
    }

    #[test]
    fn test_positive_skew_shifts_right() {
        let spec = SkewNormalSpec {
            mean: 0.0,
            sd: 1.0,
            size: 20_000,
            skewness: 5.0,
        };
        let values = spec.generate(&mut Pcg64Mcg::seed_from_u64(11)).unwrap();
        // E[X] = sd * delta * sqrt(2 / pi), delta = a / sqrt(1 + a^2) ~ 0.98
        assert!(mean(&values) > 0.6);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        for spec in [
            SkewNormalSpec { sd: 0.0, ..Default::default() },
            SkewNormalSpec { sd: -1.0, ..Default::default() },
            SkewNormalSpec { mean: f64::NAN, ..Default::default() },
            SkewNormalSpec { skewness: f64::INFINITY, ..Default::default() },
        ] {
            assert!(spec.generate(&mut rng).is_err(), "{spec:?}");
        }
    }

    #[test]
    fn test_empty_size() {
        let spec = SkewNormalSpec { size: 0, ..Default::default() };
        assert!(spec.generate(&mut Pcg64Mcg::seed_from_u64(0)).unwrap().is_empty());
    }
}
