//! Utilities for the deploy script.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::{errors::ScriptError, types::DeploymentResult};

/// Sets up a signing provider for the given private key and RPC url,
/// checking that the network is reachable.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<DynProvider<Ethereum>, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let provider = DynProvider::new(ProviderBuilder::new().wallet(signer).connect_http(url));

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!(chain_id, %deployer, "Connected to {}", rpc_url);

    Ok(provider)
}

/// Record the deployed addresses in the JSON file at `file_path`,
/// keyed by contract name.
///
/// Existing entries for other contracts are preserved.
pub fn write_deployments(
    file_path: &Path,
    deployments: &[DeploymentResult],
) -> Result<(), ScriptError> {
    let mut parsed_json = if file_path.exists() {
        let contents = fs::read_to_string(file_path)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        serde_json::from_str::<Map<String, Value>>(&contents)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?
    } else {
        Map::new()
    };

    for deployment in deployments {
        parsed_json.insert(
            deployment.name.clone(),
            Value::String(format!("{:#x}", deployment.address)),
        );
    }

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    Ok(())
}
