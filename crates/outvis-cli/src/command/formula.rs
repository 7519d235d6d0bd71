use std::path::PathBuf;

use outvis_threshold::{
    formula::Formula,
    method::{Method, PerMethod},
};

use crate::util;

/// Threshold formula options shared by the commands.
///
/// Precedence: `--formula` file, then `--method`, then per-method overrides.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FormulaArg {
    /// Formula JSON file (`{"weights": {...}, "constants": {...}}`)
    #[arg(long)]
    formula: Option<PathBuf>,
    /// Use a single method with weight 1 (mad, adjusted-mad, iqr, sd)
    #[arg(long)]
    method: Option<Method>,
    /// Weight of the MAD bounds
    #[arg(long)]
    mad_weight: Option<f64>,
    /// Weight of the adjusted MAD bounds
    #[arg(long)]
    adjusted_mad_weight: Option<f64>,
    /// Weight of the IQR bounds
    #[arg(long)]
    iqr_weight: Option<f64>,
    /// Weight of the SD bounds
    #[arg(long)]
    sd_weight: Option<f64>,
    /// Multiplier of the MAD [default: 3]
    #[arg(long)]
    mad_constant: Option<f64>,
    /// Multiplier of the adjusted MAD [default: 3]
    #[arg(long)]
    adjusted_mad_constant: Option<f64>,
    /// Multiplier of the IQR [default: 1.5]
    #[arg(long)]
    iqr_constant: Option<f64>,
    /// Multiplier of the SD [default: 3]
    #[arg(long)]
    sd_constant: Option<f64>,
    /// Rescale the weights to sum to 1
    #[arg(long)]
    normalize: bool,
}

impl FormulaArg {
    pub(crate) fn to_formula(&self) -> anyhow::Result<Formula> {
        let mut formula = match &self.formula {
            Some(path) => util::read_json_file::<Formula, _>("formula", path)?,
            None => Formula::default(),
        };
        if let Some(method) = self.method {
            formula.weights = PerMethod::from_fn(|m| if m == method { 1.0 } else { 0.0 });
        }

        let overrides = [
            (Method::Mad, self.mad_weight, self.mad_constant),
            (
                Method::AdjustedMad,
                self.adjusted_mad_weight,
                self.adjusted_mad_constant,
            ),
            (Method::Iqr, self.iqr_weight, self.iqr_constant),
            (Method::Sd, self.sd_weight, self.sd_constant),
        ];
        for (method, weight, constant) in overrides {
            if let Some(weight) = weight {
                *formula.weights.get_mut(method) = weight;
            }
            if let Some(constant) = constant {
                *formula.constants.get_mut(method) = constant;
            }
        }

        if self.normalize {
            formula = formula.normalized();
        }
        if formula.active_methods().next().is_none() {
            tracing::warn!(
                "every formula weight is zero, both thresholds will be 0 (use --method or --<method>-weight)"
            );
        }
        Ok(formula)
    }
}
