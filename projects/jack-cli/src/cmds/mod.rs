mod analyze;
mod check;
mod tokens;

pub use analyze::AnalyzeArgs;
pub use check::CheckArgs;
pub use tokens::{TokensArgs, TreeArgs};

use jack_core::BatchReport;
use tracing::info;

/// Prints one line per failed unit to stderr and fails if any unit failed.
fn finish_batch(report: &BatchReport, success: &str, quiet: bool) -> anyhow::Result<()> {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(_) => info!("{} (OK)", outcome.source.display()),
            Err(e) => eprintln!("{}: {}", outcome.source.display(), e),
        }
    }

    if !report.is_success() {
        anyhow::bail!("{}", report.summary());
    }
    if !quiet {
        println!("{} ({})", success, report.summary());
    }
    Ok(())
}
