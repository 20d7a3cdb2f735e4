use clap::Args;
use jack_core::Compiler;
use jack_emit::OutputFormat;
use std::path::PathBuf;

#[derive(Args)]
pub struct TokensArgs {
    /// The .jack file to tokenize
    pub file: PathBuf,
    #[arg(short, long, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,
}

impl TokensArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let tokens = Compiler::new().tokenize_file(&self.file)?;
        print!("{}", self.format.emitter().emit_tokens(&tokens)?);
        Ok(())
    }
}

#[derive(Args)]
pub struct TreeArgs {
    /// The .jack file to parse
    pub file: PathBuf,
    #[arg(short, long, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,
}

impl TreeArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let unit = Compiler::new().compile_file(&self.file)?;
        print!("{}", self.format.emitter().emit_tree(&unit.tree)?);
        Ok(())
    }
}
