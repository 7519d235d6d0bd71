//! Mixing valid points and injected outliers at a contamination rate.

use rand::{Rng, seq::index};

use crate::labeled::{Label, LabeledDistribution};

/// Which source pool a draw came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PoolKind {
    #[display("base")]
    Base,
    #[display("outlier")]
    Outlier,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AssembleError {
    #[display("outlier rate must be between 0 and 1, got {rate}")]
    InvalidRate { rate: f64 },
    #[display("cannot draw {requested} values from the {pool} pool holding {available}")]
    InsufficientPoolSize {
        pool: PoolKind,
        requested: usize,
        available: usize,
    },
}

/// Number of outliers to add to `target_size` valid points so that outliers
/// make up `rate` of the combined set.
///
/// The count is `round(rate * target_size / (1 - rate))`, forced up to 1 when
/// it rounds to zero for a non-zero rate. A rate of exactly 1 asks for an
/// unbounded count and saturates to `usize::MAX`, which no pool can satisfy.
///
/// ```
/// # use outvis_sample::assemble::outlier_count;
/// assert_eq!(outlier_count(100, 0.10).unwrap(), 11);
/// assert_eq!(outlier_count(100, 0.0).unwrap(), 0);
/// assert_eq!(outlier_count(5, 0.001).unwrap(), 1);
/// assert!(outlier_count(100, 1.5).is_err());
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn outlier_count(target_size: usize, rate: f64) -> Result<usize, AssembleError> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(AssembleError::InvalidRate { rate });
    }
    if rate == 0.0 {
        return Ok(0);
    }
    // float-to-int casts saturate: inf -> usize::MAX, NaN (0 / 0) -> 0
    let count = (rate * target_size as f64 / (1.0 - rate)).round() as usize;
    Ok(count.max(1))
}

fn check_pool(kind: PoolKind, pool: &[f64], requested: usize) -> Result<(), AssembleError> {
    if requested > pool.len() {
        return Err(AssembleError::InsufficientPoolSize {
            pool: kind,
            requested,
            available: pool.len(),
        });
    }
    Ok(())
}

/// Draws `amount` distinct positions of `pool` uniformly, without replacement.
///
/// `amount` must not exceed the pool size.
fn draw<R>(rng: &mut R, pool: &[f64], amount: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

/// Builds a labeled distribution of `target_size` valid points drawn from
/// `base_pool` plus [`outlier_count`] outliers drawn from `outlier_pool`.
///
/// Both draws are uniform without replacement. Valid points come first, then
/// outliers. Both pools are checked before anything is drawn.
pub fn build_labeled_distribution<R>(
    rng: &mut R,
    base_pool: &[f64],
    target_size: usize,
    outlier_pool: &[f64],
    outlier_rate: f64,
) -> Result<LabeledDistribution, AssembleError>
where
    R: Rng + ?Sized,
{
    let num_outliers = outlier_count(target_size, outlier_rate)?;
    tracing::debug!(target_size, outlier_rate, num_outliers, "assembling labeled distribution");

    check_pool(PoolKind::Base, base_pool, target_size)?;
    check_pool(PoolKind::Outlier, outlier_pool, num_outliers)?;

    let valid = draw(rng, base_pool, target_size);
    let outliers = draw(rng, outlier_pool, num_outliers);
    Ok(LabeledDistribution::from_groups([
        (Label::Valid, valid.as_slice()),
        (Label::Outlier, outliers.as_slice()),
    ]))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn range_pool(range: std::ops::RangeInclusive<i32>) -> Vec<f64> {
        range.map(f64::from).collect()
    }

    #[test]
    fn test_contamination_of_combined_set() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let distribution = build_labeled_distribution(
            &mut rng,
            &range_pool(1..=1000),
            100,
            &range_pool(1..=50),
            0.10,
        )
        .unwrap();
        assert_eq!(distribution.count(Label::Valid), 100);
        assert_eq!(distribution.count(Label::Outlier), 11);
        assert_eq!(distribution.len(), 111);
    }

    #[test]
    fn test_zero_rate_has_no_outliers() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let distribution =
            build_labeled_distribution(&mut rng, &range_pool(1..=10), 10, &[], 0.0).unwrap();
        assert_eq!(distribution.count(Label::Outlier), 0);
        assert_eq!(distribution.count(Label::Valid), 10);
    }

    #[test]
    fn test_tiny_rate_forces_one_outlier() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let distribution = build_labeled_distribution(
            &mut rng,
            &range_pool(1..=10),
            5,
            &range_pool(100..=110),
            0.001,
        )
        .unwrap();
        assert_eq!(distribution.count(Label::Outlier), 1);
    }

    #[test]
    fn test_invalid_rate() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        for rate in [-0.1, 1.01, f64::NAN] {
            let err = build_labeled_distribution(&mut rng, &[1.0], 1, &[2.0], rate).unwrap_err();
            assert!(matches!(err, AssembleError::InvalidRate { .. }), "{rate}");
        }
    }

    #[test]
    fn test_full_rate_is_unsatisfiable() {
        assert_eq!(outlier_count(10, 1.0).unwrap(), usize::MAX);
        assert_eq!(outlier_count(0, 1.0).unwrap(), 1);
    }

    #[test]
    fn test_insufficient_pools() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let err = build_labeled_distribution(&mut rng, &range_pool(1..=5), 6, &range_pool(1..=5), 0.1)
            .unwrap_err();
        assert_eq!(
            err,
            AssembleError::InsufficientPoolSize {
                pool: PoolKind::Base,
                requested: 6,
                available: 5,
            }
        );

        let err = build_labeled_distribution(&mut rng, &range_pool(1..=100), 100, &[1.0, 2.0], 0.1)
            .unwrap_err();
        assert_eq!(
            err,
            AssembleError::InsufficientPoolSize {
                pool: PoolKind::Outlier,
                requested: 11,
                available: 2,
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot draw 11 values from the outlier pool holding 2"
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let base = range_pool(1..=500);
        let outliers = range_pool(1000..=1100);
        let first = build_labeled_distribution(&mut Pcg64Mcg::seed_from_u64(9), &base, 50, &outliers, 0.2)
            .unwrap();
        let second = build_labeled_distribution(&mut Pcg64Mcg::seed_from_u64(9), &base, 50, &outliers, 0.2)
            .unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_draws_come_from_pools_without_replacement(
            seed in any::<u64>(),
            target_size in 0_usize..200,
            rate in 0.0..0.5_f64,
        ) {
            // distinct pool values make repeated draws detectable
            let base = range_pool(0..=199);
            let outliers = range_pool(1000..=1199);
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let distribution = build_labeled_distribution(&mut rng, &base, target_size, &outliers, rate).unwrap();

            let mut seen = BTreeMap::new();
            for entry in distribution.iter() {
                let pool = match entry.label {
                    Label::Valid => &base,
                    Label::Outlier => &outliers,
                };
                prop_assert!(pool.contains(&entry.value));
                *seen.entry(entry.value.to_bits()).or_insert(0) += 1;
            }
            prop_assert!(seen.values().all(|&count| count == 1));
            prop_assert_eq!(distribution.count(Label::Valid), target_size);
            prop_assert_eq!(
                distribution.count(Label::Outlier),
                outlier_count(target_size, rate).unwrap()
            );
        }
    }
}
