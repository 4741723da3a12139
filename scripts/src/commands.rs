//! Implementation of the NFT deployment script

use std::io::{self, Write};

use alloy::primitives::Address;
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    cli::Cli,
    constants::NFT_CONTRACTS,
    errors::ScriptError,
    toolchain::{AlloyToolchain, Toolchain},
    types::DeploymentResult,
    utils::{setup_client, write_deployments},
};

/// Run the deploy script with the given arguments
pub async fn run(cli: Cli) -> Result<(), ScriptError> {
    let provider = setup_client(&cli.priv_key, &cli.rpc_url).await?;
    let toolchain =
        AlloyToolchain::new(provider, ArtifactStore::new(cli.artifacts), cli.confirmations);

    let deployments = deploy_nft_contracts(&toolchain, &mut io::stdout()).await?;

    if let Some(path) = cli.deployments_path {
        write_deployments(&path, &deployments)?;
        info!("Deployments written to {}", path.display());
    }

    Ok(())
}

/// Deploy the NFT factory and then the NFT marketplace, reporting both
/// addresses to `out` once both deployments are confirmed.
///
/// If either deployment fails nothing is reported, including the address of
/// an already-confirmed factory deployment.
pub async fn deploy_nft_contracts<T: Toolchain, W: Write>(
    toolchain: &T,
    out: &mut W,
) -> Result<Vec<DeploymentResult>, ScriptError> {
    let deployments = deploy_contracts(toolchain, &NFT_CONTRACTS).await?;
    report_deployments(&deployments, out)?;
    Ok(deployments)
}

/// Deploy the named contracts one at a time, in order.
///
/// The first failure aborts the remaining deployments.
pub async fn deploy_contracts<T: Toolchain>(
    toolchain: &T,
    names: &[&str],
) -> Result<Vec<DeploymentResult>, ScriptError> {
    let mut deployments = Vec::with_capacity(names.len());

    for name in names {
        info!("Deploying {}...", name);
        let factory = toolchain.contract_factory(name).await?;
        let address = toolchain.deploy(&factory).await?;

        if address == Address::ZERO {
            return Err(ScriptError::ContractDeployment(format!(
                "{} deployment returned the zero address",
                name
            )));
        }

        deployments.push(DeploymentResult {
            name: name.to_string(),
            address,
        });
    }

    Ok(deployments)
}

/// Write one line per deployment to `out`
pub fn report_deployments<W: Write>(
    deployments: &[DeploymentResult],
    out: &mut W,
) -> Result<(), ScriptError> {
    for deployment in deployments {
        writeln!(out, "{}", deployment).map_err(|e| ScriptError::Reporting(e.to_string()))?;
    }

    out.flush().map_err(|e| ScriptError::Reporting(e.to_string()))
}
