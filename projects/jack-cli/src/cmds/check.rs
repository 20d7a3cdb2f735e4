use clap::Args;
use jack_core::{analyze, collect_units, Action};
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// A .jack file, or a directory of them
    pub path: PathBuf,
}

impl CheckArgs {
    pub async fn run(&self, quiet: bool) -> anyhow::Result<()> {
        let units = collect_units(&self.path)?;
        if units.is_empty() {
            anyhow::bail!("no .jack files found in {}", self.path.display());
        }

        let report = analyze(units, Action::Check).await;
        super::finish_batch(&report, "check success", quiet)
    }
}
