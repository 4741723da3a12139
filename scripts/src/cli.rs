//! Definitions of CLI arguments for the deploy script.
//!
//! Every argument has a default so the script runs with no flags against a
//! local dev node.

use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};

use crate::constants::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_PKEY, DEFAULT_RPC_URL, NUM_DEPLOY_CONFIRMATIONS,
};

/// Deploy the NFT factory and NFT marketplace contracts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer
    #[arg(long = "pkey", env = "PKEY", default_value = DEFAULT_PKEY, hide_default_value = true)]
    pub priv_key: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Number of confirmations to await for each deployment
    #[arg(short, long, default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Optional path of a JSON file in which to record the deployed addresses
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,
}

/// The exit code for a failed argument parse.
///
/// Requests for help or version info succeed, every other parse error is a
/// failure like any other.
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
