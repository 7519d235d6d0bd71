use std::path::PathBuf;

use anyhow::Context;
use outvis_stats::descriptive::SampleSummary;
use outvis_threshold::{
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
pub(crate) struct VisualizeArg {
    /// Delimited table with a header line
    input: PathBuf,
    /// Column to analyze, the first one when omitted
    #[arg(long)]
    column: Option<String>,
    /// Column separator (`,`, `;` or `\t`)
    #[arg(long, default_value = ",", value_parser = table::parse_separator)]
    separator: char,
    /// Read decimals written with a comma
    #[arg(long)]
    decimal_comma: bool,
    #[command(flatten)]
    formula: FormulaArg,
    /// Save the threshold and classification as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct VisualizationResult<'a> {
    column: &'a str,
    formula: &'a Formula,
    threshold: ThresholdPair,
    classification: Classification,
}

pub(crate) fn run(arg: &VisualizeArg) -> anyhow::Result<()> {
    let formula = arg.formula.to_formula()?;
    let table = Table::read(
        &arg.input,
        TableFormat {
            separator: arg.separator,
            decimal_comma: arg.decimal_comma,
        },
    )?;
    let column = match &arg.column {
        Some(column) => column.as_str(),
        None => table
            .headers()
            .first()
            .map(String::as_str)
            .context("table has no columns")?,
    };
    let values = table.column(column)?;

    let summary = SampleSummary::new(values)
        .with_context(|| format!("Column '{column}' has no usable values"))?;
    let threshold = threshold::compute_threshold_from_summary(&summary, &formula)
        .with_context(|| format!("Failed to compute the threshold of column '{column}'"))?;
    let classification = threshold.classify(values);

    println!("Column: {column}");
    println!();
    report::print_summary(&summary);
    println!();
    report::print_value_histogram(&summary);
    println!();
    report::print_formula(&formula);
    println!();
    report::print_threshold(&threshold, &classification);
    println!();

    let density = chart::DensityChart::new(
        format!("{column} ({})", arg.input.display()),
        [(column, Color::Cyan, values)],
        Some(threshold),
    );
    print!("{}", density.to_text(chart::WIDTH, chart::HEIGHT));

    if let Some(path) = &arg.output {
        let result = VisualizationResult {
            column,
            formula: &formula,
            threshold,
            classification,
        };
        util::Output::save_json(&result, path)?;
    }
    Ok(())
}
