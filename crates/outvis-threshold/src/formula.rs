use serde::{Deserialize, Serialize};

use crate::method::{Method, PerMethod};

/// Weights and constant multipliers for every detection method.
///
/// Built per request and treated as immutable once handed to
/// [`compute_threshold`](crate::threshold::compute_threshold). Fields missing
/// from a serialized formula fall back to zero weights and
/// [`Formula::DEFAULT_CONSTANTS`].
///
/// # Examples
///
/// ```
/// # use outvis_threshold::{formula::Formula, method::Method};
/// let formula: Formula = serde_json::from_str(r#"{ "weights": { "iqr": 1.0 } }"#).unwrap();
/// assert_eq!(formula, Formula::single(Method::Iqr, 1.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "FormulaConfig")]
pub struct Formula {
    pub weights: PerMethod<f64>,
    pub constants: PerMethod<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FormulaConfig {
    weights: PerMethod<Option<f64>>,
    constants: PerMethod<Option<f64>>,
}

impl From<FormulaConfig> for Formula {
    fn from(config: FormulaConfig) -> Self {
        Self {
            weights: config.weights.map(|_, w| w.unwrap_or(0.0)),
            constants: config
                .constants
                .map(|m, c| c.unwrap_or(*Self::DEFAULT_CONSTANTS.get(m))),
        }
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self {
            weights: PerMethod::default(),
            constants: Self::DEFAULT_CONSTANTS,
        }
    }
}

impl Formula {
    /// 3 for the deviation based methods, Tukey's 1.5 for the IQR.
    pub const DEFAULT_CONSTANTS: PerMethod<f64> = PerMethod {
        mad: 3.0,
        adjusted_mad: 3.0,
        iqr: 1.5,
        sd: 3.0,
    };

    /// A formula that applies one method alone (weight 1, all others 0).
    #[must_use]
    pub fn single(method: Method, constant: f64) -> Self {
        let mut formula = Self::default();
        *formula.weights.get_mut(method) = 1.0;
        *formula.constants.get_mut(method) = constant;
        formula
    }

    /// Methods that contribute to the threshold (non-zero weight).
    pub fn active_methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.weights
            .iter()
            .filter(|(_, weight)| **weight != 0.0)
            .map(|(method, _)| method)
    }

    /// Same constants, weights rescaled to sum to 1.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            weights: self.weights.normalize_l1(),
            constants: self.constants,
        }
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_single_is_one_hot() {
        let formula = Formula::single(Method::Sd, 2.5);
        assert_eq!(formula.weights.sd, 1.0);
        assert_eq!(formula.weights.mad, 0.0);
        assert_eq!(formula.weights.adjusted_mad, 0.0);
        assert_eq!(formula.weights.iqr, 0.0);
        assert_eq!(formula.constants.sd, 2.5);
        assert_eq!(formula.active_methods().collect::<Vec<_>>(), vec![Method::Sd]);
    }

    #[test]
    fn test_default_has_no_active_method() {
        assert_eq!(Formula::default().active_methods().count(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let formula = Formula {
            weights: PerMethod {
                mad: 0.25,
                adjusted_mad: 0.0,
                iqr: 0.5,
                sd: 0.25,
            },
            constants: PerMethod {
                mad: 2.0,
                adjusted_mad: 3.0,
                iqr: 1.0,
                sd: 4.5,
            },
        };
        let json = serde_json::to_string(&formula).unwrap();
        assert_eq!(serde_json::from_str::<Formula>(&json).unwrap(), formula);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let formula: Formula =
            serde_json::from_str(r#"{ "weights": { "mad": 0.5, "sd": 0.5 }, "constants": { "sd": 2.0 } }"#)
                .unwrap();
        assert_eq!(formula.weights.mad, 0.5);
        assert_eq!(formula.weights.iqr, 0.0);
        assert_eq!(formula.constants.sd, 2.0);
        assert_eq!(formula.constants.mad, 3.0);
        assert_eq!(formula.constants.iqr, 1.5);
    }

    #[test]
    fn test_normalized() {
        let mut formula = Formula::single(Method::Mad, 3.0);
        formula.weights.iqr = 3.0;
        let normalized = formula.normalized();
        assert_eq!(normalized.weights.mad, 0.25);
        assert_eq!(normalized.weights.iqr, 0.75);
        assert_eq!(normalized.constants, formula.constants);
    }
}
