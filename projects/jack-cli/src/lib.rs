use clap::{ArgAction, Parser, Subcommand};

mod cmds;
pub mod logger;

pub use cmds::{AnalyzeArgs, CheckArgs, TokensArgs, TreeArgs};

#[derive(Parser)]
#[command(name = "jackc", author, version, about = "Syntax analyzer for the Jack language", long_about = None)]
pub struct JackApplication {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: JackCommands,
}

#[derive(Subcommand)]
pub enum JackCommands {
    /// Parse a file or every .jack file in a directory and write the trees
    Analyze(AnalyzeArgs),
    /// Parse a file or directory without writing anything
    Check(CheckArgs),
    /// Print the token listing of one file
    Tokens(TokensArgs),
    /// Print the parse tree of one file
    Tree(TreeArgs),
}

impl JackApplication {
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.command {
            JackCommands::Analyze(args) => args.run(self.quiet).await,
            JackCommands::Check(args) => args.run(self.quiet).await,
            JackCommands::Tokens(args) => args.run(),
            JackCommands::Tree(args) => args.run(),
        }
    }
}
