use clap::Parser;
use jack_cli::{logger, JackApplication};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = JackApplication::parse();
    logger::init(cli.verbose, cli.quiet);

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            ExitCode::FAILURE
        }
    }
}
