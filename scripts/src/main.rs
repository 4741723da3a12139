//! Deploys the NFT factory and NFT marketplace contracts and prints their addresses

use std::{io, process::ExitCode};

use clap::Parser;
use nft_deploy::{
    cli::{parse_error_exit_code, Cli},
    commands::run,
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout, parse errors to stderr
            let _ = e.print();
            return ExitCode::from(parse_error_exit_code(&e));
        }
    };

    // Logs go to stderr, stdout only carries the deployed addresses
    tracing_subscriber::fmt().pretty().with_writer(io::stderr).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("deployment failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
