//! Plain-text report sections shared by the commands.

use std::fmt;

use outvis_stats::{descriptive::SampleSummary, histogram::Histogram, percentiles::Percentiles};
use outvis_threshold::{
    detection::DetectionReport,
    formula::Formula,
    method::Method,
    threshold::{Classification, ThresholdPair},
};

const PERCENTILE_POINTS: [f64; 7] = [1.0, 5.0, 25.0, 50.0, 75.0, 95.0, 99.0];
const HISTOGRAM_BINS: usize = 20;

pub(crate) fn print_summary(summary: &SampleSummary) {
    println!("Sample summary");
    println!("  count:    {} ({} missing)", summary.count, summary.missing);
    println!("  min/max:  {:.4} / {:.4}", summary.min, summary.max);
    println!("  mean:     {:.4}", summary.mean);
    println!("  median:   {:.4}", summary.median);
    match summary.standard_deviation() {
        Ok(sd) => println!("  sd:       {sd:.4}"),
        Err(e) => println!("  sd:       - ({e})"),
    }
    if let Ok(mad) = summary.median_absolute_deviation() {
        println!("  mad:      {mad:.4}");
    }
    println!("  iqr:      {:.4}", summary.inter_quartile_range());

    let percentiles = Percentiles::from_sorted(summary.sorted_values(), &PERCENTILE_POINTS);
    let line = percentiles
        .iter()
        .map(|(p, v)| format!("P{p:02}={v:.3}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {line}");
}

pub(crate) fn print_value_histogram(summary: &SampleSummary) {
    let histogram = Histogram::from_sorted(summary.sorted_values(), HISTOGRAM_BINS);
    println!("Histogram:");
    print_histogram(
        histogram
            .bins
            .iter()
            .map(|bin| (format!("{:.2}", bin.range.start), bin.count)),
    );
}

fn print_histogram<I, S>(data: I)
where
    I: Iterator<Item = (S, u64)>,
    S: fmt::Display,
{
    let data = data.collect::<Vec<_>>();
    let max_count = data.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let max_bar_width = 50;
    for (label, count) in &data {
        let bar_width = usize::try_from(count * max_bar_width / max_count).unwrap_or(0);
        println!("{:>15} | {:<5} {}", label, count, "#".repeat(bar_width));
    }
}

pub(crate) fn print_formula(formula: &Formula) {
    println!("Formula (weighted sum, not normalized):");
    for method in Method::ALL {
        println!(
            "  {:<13} weight {:>6.3}  constant {:>5.2}",
            method.name(),
            formula.weights.get(method),
            formula.constants.get(method)
        );
    }
}

pub(crate) fn print_threshold(threshold: &ThresholdPair, classification: &Classification) {
    println!(
        "Threshold: lower {:.4}, upper {:.4}",
        threshold.lower, threshold.upper
    );
    println!(
        "  below {}, within {}, above {} ({} outliers, {} missing)",
        classification.below,
        classification.within,
        classification.above,
        classification.outliers(),
        classification.missing
    );
}

pub(crate) fn print_detection(report: &DetectionReport) {
    let ratio = |value: Option<f64>| value.map_or_else(|| "-".to_owned(), |v| format!("{v:.3}"));
    println!("Detection against labels:");
    println!(
        "  true positives {}, false positives {}, true negatives {}, false negatives {}",
        report.true_positives,
        report.false_positives,
        report.true_negatives,
        report.false_negatives
    );
    println!(
        "  precision {}, recall {}",
        ratio(report.precision()),
        ratio(report.recall())
    );
}
