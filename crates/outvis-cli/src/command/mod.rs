use clap::{Parser, Subcommand};

use self::{generate::GenerateArg, simulate::SimulateArg, visualize::VisualizeArg};

mod formula;
mod generate;
mod simulate;
mod visualize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Synthesize a skew-normal sample and plot its density
    Generate(#[clap(flatten)] GenerateArg),
    /// Mix valid points with injected outliers and score a threshold formula
    Simulate(#[clap(flatten)] SimulateArg),
    /// Compute the threshold of a column from a user table
    Visualize(#[clap(flatten)] VisualizeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Visualize(arg) => visualize::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let args = CommandArgs::try_parse_from([
            "outvis",
            "simulate",
            "--distributions",
            "d.csv",
            "--outliers",
            "o.csv",
            "--shape",
            "bimodal",
            "--outlier-shape",
            "2_side_dispersed_close",
            "--rate-percent",
            "10",
            "--method",
            "iqr",
        ])
        .unwrap();
        assert!(matches!(args.mode, Mode::Simulate(_)));
    }

    #[test]
    fn test_reject_out_of_range_rate() {
        let result = CommandArgs::try_parse_from([
            "outvis",
            "simulate",
            "--distributions",
            "d.csv",
            "--outliers",
            "o.csv",
            "--rate-percent",
            "41",
        ]);
        assert!(result.is_err());
    }
}
