use std::path::PathBuf;

use outvis_sample::{
    assemble,
    labeled::{Label, LabeledDistribution},
    shape::{DistributionShape, OutlierShape},
};
use outvis_stats::descriptive::SampleSummary;
use outvis_threshold::{
    detection::DetectionReport,
    formula::Formula,
    threshold::{self, Classification, ThresholdPair},
};
use ratatui::style::Color;
use serde::Serialize;

use crate::{
    chart, report,
    table::{self, Table, TableFormat},
    util,
};

use super::formula::FormulaArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Table of base distributions, one column per shape
    #[arg(long)]
    distributions: PathBuf,
    /// Table of outlier pools, one column per outlier shape
    #[arg(long)]
    outliers: PathBuf,
    /// Column separator of both tables
    #[arg(long, default_value = ";", value_parser = table::parse_separator)]
    separator: char,
    /// Whether the outlier table writes decimals with a comma
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    outliers_decimal_comma: bool,
    /// Base distribution shape (normal, asymmetrical, bimodal, sharp, flat)
    #[arg(long, default_value = "normal")]
    shape: DistributionShape,
    /// Outlier shape, e.g. `1_side_centered_extreme` or `outlier_2_side_dispersed_close`
    #[arg(long, default_value = "outlier_1_side_centered_extreme")]
    outlier_shape: OutlierShape,
    /// Number of valid points
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=1000))]
    size: u32,
    /// Outlier rate in percent of the combined set
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=40))]
    rate_percent: u8,
    #[command(flatten)]
    formula: FormulaArg,
    /// Random seed, drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Save the labeled distribution and the scores as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationResult<'a> {
    seed: u64,
    shape: String,
    outlier_shape: String,
    size: usize,
    outlier_rate: f64,
    formula: &'a Formula,
    threshold: ThresholdPair,
    classification: Classification,
    detection: DetectionReport,
    distribution: &'a LabeledDistribution,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let formula = arg.formula.to_formula()?;
    let distributions = Table::read(
        &arg.distributions,
        TableFormat {
            separator: arg.separator,
            decimal_comma: false,
        },
    )?;
    let outliers = Table::read(
        &arg.outliers,
        TableFormat {
            separator: arg.separator,
            decimal_comma: arg.outliers_decimal_comma,
        },
    )?;
    let base_pool = distributions.pool(&arg.shape.to_string())?;
    let outlier_pool = outliers.pool(&arg.outlier_shape.to_string())?;

    let size = arg.size as usize;
    let outlier_rate = f64::from(arg.rate_percent) / 100.0;
    let (seed, mut rng) = util::seeded_rng(arg.seed);
    let distribution = assemble::build_labeled_distribution(
        &mut rng,
        &base_pool,
        size,
        &outlier_pool,
        outlier_rate,
    )?;
    tracing::info!(
        valid = distribution.count(Label::Valid),
        outliers = distribution.count(Label::Outlier),
        "assembled labeled distribution"
    );

    let values = distribution.values();
    let summary = SampleSummary::new(&values)?;
    let threshold = threshold::compute_threshold_from_summary(&summary, &formula)?;
    let classification = threshold.classify(&values);
    let detection = DetectionReport::new(
        &threshold,
        distribution
            .iter()
            .map(|entry| (entry.value, entry.label.is_outlier())),
    );

    println!(
        "Simulation: {} + {} ({} valid, {} outliers)",
        arg.shape.title(),
        arg.outlier_shape.title(),
        distribution.count(Label::Valid),
        distribution.count(Label::Outlier)
    );
    println!();
    report::print_summary(&summary);
    println!();
    report::print_formula(&formula);
    println!();
    report::print_threshold(&threshold, &classification);
    report::print_detection(&detection);
    println!();

    let valid = distribution.values_with(Label::Valid);
    let outlier = distribution.values_with(Label::Outlier);
    let density = chart::DensityChart::new(
        format!("{} / {}", arg.shape.title(), arg.outlier_shape.title()),
        [
            ("valid", Color::Cyan, valid.as_slice()),
            ("outlier", Color::Yellow, outlier.as_slice()),
        ],
        Some(threshold),
    );
    print!("{}", density.to_text(chart::WIDTH, chart::HEIGHT));

    if let Some(path) = &arg.output {
        let result = SimulationResult {
            seed,
            shape: arg.shape.to_string(),
            outlier_shape: arg.outlier_shape.to_string(),
            size,
            outlier_rate,
            formula: &formula,
            threshold,
            classification,
            detection,
            distribution: &distribution,
        };
        util::Output::save_json(&result, path)?;
    }
    Ok(())
}
