use clap::Args;
use jack_core::{analyze, collect_units, Action, JackConfig, OutputConfig};
use jack_emit::OutputFormat;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// A .jack file, or a directory of them
    pub path: PathBuf,
    /// Output format (xml or json); overrides jack.toml
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
    /// Directory for the written files; defaults to next to each source
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
    /// Also write the token listing (<name>T.<ext>) of every file
    #[arg(short, long)]
    pub tokens: bool,
    /// Config file to use instead of ./jack.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl AnalyzeArgs {
    pub async fn run(&self, quiet: bool) -> anyhow::Result<()> {
        let config = JackConfig::load(self.config.as_deref())?;
        let output = self.merge(config.output);

        let units = collect_units(&self.path)?;
        if units.is_empty() {
            anyhow::bail!("no .jack files found in {}", self.path.display());
        }

        let report = analyze(units, Action::Write(output)).await;
        super::finish_batch(&report, "compile success", quiet)
    }

    /// Command line flags take precedence over the config file.
    fn merge(&self, mut output: OutputConfig) -> OutputConfig {
        if let Some(format) = self.format {
            output.format = format;
        }
        if let Some(dir) = &self.out_dir {
            output.dir = Some(dir.clone());
        }
        output.tokens |= self.tokens;
        output
    }
}
