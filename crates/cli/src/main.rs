mod cli;
mod command;
mod error;
mod logging;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    if let Err(err) = logging::init() {
        eprintln!("{err:?}");
        return ExitCode::FAILURE;
    }
    tracing::debug!(?cli, "parsed cli");
    match command::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}
