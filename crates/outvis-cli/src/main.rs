use tracing_subscriber::EnvFilter;

mod chart;
mod command;
mod report;
mod table;
mod util;

fn main() -> anyhow::Result<()> {
    init_tracing();
    command::run()
}

/// Logs go to stderr so that reports and JSON on stdout stay clean.
///
/// Filtering follows the `OUTVIS_LOG` environment variable, `info` by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("OUTVIS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
