use std::path::PathBuf;

use anyhow::Context;
use outvis_sample::synth::SkewNormalSpec;
use outvis_stats::descriptive::SampleSummary;
use ratatui::style::Color;
use serde::Serialize;

use crate::{chart, report, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Location of the distribution
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    mean: f64,
    /// Scale of the distribution
    #[arg(long, default_value_t = 1.0)]
    sd: f64,
    /// Number of values to generate
    #[arg(long, default_value_t = 10_000)]
    size: usize,
    /// Skewness (shape) between -10 and 10, 0 for a normal distribution
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_skewness)]
    skewness: f64,
    /// Random seed, drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Save the generated values as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GeneratedSample<'a> {
    seed: u64,
    parameters: SkewNormalSpec,
    values: &'a [f64],
}

fn parse_skewness(s: &str) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|e| e.to_string())?;
    if (-10.0..=10.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("skewness {value} is outside -10..=10"))
    }
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let parameters = SkewNormalSpec {
        mean: arg.mean,
        sd: arg.sd,
        size: arg.size,
        skewness: arg.skewness,
    };
    let (seed, mut rng) = util::seeded_rng(arg.seed);
    let values = parameters.generate(&mut rng)?;
    tracing::info!(size = values.len(), "generated sample");

    match SampleSummary::new(&values) {
        Ok(summary) => {
            report::print_summary(&summary);
            println!();
            report::print_value_histogram(&summary);
            println!();
        }
        Err(e) => tracing::warn!("no summary: {e}"),
    }
    let title = format!(
        "Skew-normal (mean {}, sd {}, skewness {})",
        arg.mean, arg.sd, arg.skewness
    );
    let density = chart::DensityChart::new(title, [("sample", Color::Cyan, &values[..])], None);
    print!("{}", density.to_text(chart::WIDTH, chart::HEIGHT));

    if let Some(path) = &arg.output {
        let sample = GeneratedSample {
            seed,
            parameters,
            values: &values,
        };
        util::Output::save_json(&sample, path)
            .context("Failed to save generated sample")?;
    }
    Ok(())
}
