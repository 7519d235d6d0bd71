//! Labeled sample distributions for exploring outlier thresholds.
//!
//! # Overview
//!
//! - [`assemble`]: Mix "valid" points drawn from a base pool with "outlier"
//!   points drawn from an outlier pool at a requested contamination rate
//! - [`labeled`]: The resulting [`LabeledDistribution`](labeled::LabeledDistribution)
//! - [`shape`]: Names of the base and outlier shapes shipped as sample tables
//! - [`synth`]: Skew-normal sample synthesis
//!
//! Randomness is always injected as `&mut R where R: Rng`, so a seeded
//! generator makes every draw reproducible.
//!
//! # Examples
//!
//! ```
//! use outvis_sample::{assemble::build_labeled_distribution, labeled::Label};
//! use rand::SeedableRng as _;
//!
//! let base = (1..=1000).map(f64::from).collect::<Vec<_>>();
//! let outliers = (1..=50).map(|v| f64::from(v) * 100.0).collect::<Vec<_>>();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let distribution = build_labeled_distribution(&mut rng, &base, 100, &outliers, 0.10).unwrap();
//! assert_eq!(distribution.count(Label::Valid), 100);
//! assert_eq!(distribution.count(Label::Outlier), 11);
//! ```

pub mod assemble;
pub mod labeled;
pub mod shape;
pub mod synth;
