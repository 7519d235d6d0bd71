//! Outlier thresholds from a weighted blend of spread estimators.
//!
//! A [`Formula`](formula::Formula) assigns a weight and a constant multiplier
//! to each [`Method`](method::Method). Every method contributes a lower/upper
//! bound pair; the final [`ThresholdPair`](threshold::ThresholdPair) is the
//! weight-multiplied sum of those pairs:
//!
//! ```text
//! upper = Σ weight_m * (center_m + constant_m * spread_m)
//! lower = Σ weight_m * (center_m - constant_m * spread_m)
//! ```
//!
//! The IQR method is anchored on the quartiles rather than a single center:
//! its pair is `(q1 - c * iqr, q3 + c * iqr)`.
//!
//! Selecting a single method is a one-hot weight vector
//! ([`Formula::single`](formula::Formula::single)); there is no separate code
//! path for it. Weights are used as given: they are not required to sum to one.
//!
//! # Examples
//!
//! ```
//! use outvis_threshold::{formula::Formula, method::Method, threshold::compute_threshold};
//!
//! let sample = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
//! let pair = compute_threshold(&sample, &Formula::single(Method::Sd, 2.0)).unwrap();
//! assert!((pair.upper - 2.0 * 2.160_246_899_469_287).abs() < 1e-12);
//! assert!((pair.lower + pair.upper).abs() < 1e-12);
//! ```

pub mod detection;
pub mod formula;
pub mod method;
pub mod threshold;
