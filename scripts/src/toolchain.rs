//! The blockchain toolchain the deploy script drives.
//!
//! The script only ever needs two things from the chain side: a contract
//! factory resolved by name, and a deployment that returns the created
//! address once confirmed.

use std::time::Duration;

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use tracing::{debug, info};

use crate::{
    artifacts::ArtifactStore,
    constants::{CHAIN_POLL_ATTEMPTS, CHAIN_POLL_INTERVAL_MS},
    errors::ScriptError,
    types::ContractFactory,
};

/// A toolchain capable of resolving and deploying contracts
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    /// Obtain a factory for the contract with the given name
    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, ScriptError>;

    /// Deploy the contract, await its confirmation, and return its address
    async fn deploy(&self, factory: &ContractFactory) -> Result<Address, ScriptError>;
}

/// A toolchain backed by local compilation artifacts and a JSON-RPC provider
pub struct AlloyToolchain {
    /// The signing provider used to send deployment transactions
    provider: DynProvider<Ethereum>,
    /// The compiled contract artifacts
    artifacts: ArtifactStore,
    /// The number of confirmations to await for each deployment
    confirmations: u64,
}

impl AlloyToolchain {
    /// Construct a toolchain from a provider and artifact store
    pub fn new(
        provider: DynProvider<Ethereum>,
        artifacts: ArtifactStore,
        confirmations: u64,
    ) -> Self {
        Self {
            provider,
            artifacts,
            confirmations,
        }
    }

    /// Poll for the receipt of the given transaction until it is mined
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ScriptError> {
        for _ in 0..CHAIN_POLL_ATTEMPTS {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            tokio::time::sleep(Duration::from_millis(CHAIN_POLL_INTERVAL_MS)).await;
        }

        Err(ScriptError::ContractDeployment(format!(
            "no receipt for transaction {} after {} attempts",
            tx_hash, CHAIN_POLL_ATTEMPTS
        )))
    }

    /// Wait until the block containing `receipt` has the configured number of
    /// confirmations. The inclusion block itself counts as the first.
    async fn wait_for_confirmations(
        &self,
        receipt: &TransactionReceipt,
    ) -> Result<(), ScriptError> {
        if self.confirmations <= 1 {
            return Ok(());
        }

        let mined_at = receipt.block_number.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt for transaction {} has no block number",
                receipt.transaction_hash
            ))
        })?;
        let target = mined_at + self.confirmations - 1;

        for _ in 0..CHAIN_POLL_ATTEMPTS {
            let latest = self
                .provider
                .get_block_number()
                .await
                .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

            if latest >= target {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(CHAIN_POLL_INTERVAL_MS)).await;
        }

        Err(ScriptError::ContractDeployment(format!(
            "transaction {} did not reach {} confirmations",
            receipt.transaction_hash, self.confirmations
        )))
    }
}

/// Read the created contract address out of a deployment receipt
fn deployed_address(name: &str, receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "{} deployment transaction {} reverted",
            name, receipt.transaction_hash
        )));
    }

    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "receipt for {} deployment has no contract address",
            name
        ))
    })
}

impl Toolchain for AlloyToolchain {
    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, ScriptError> {
        self.artifacts.contract_factory(name)
    }

    async fn deploy(&self, factory: &ContractFactory) -> Result<Address, ScriptError> {
        let tx = TransactionRequest::default().with_deploy_code(factory.bytecode.clone());

        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        let tx_hash = *pending_tx.tx_hash();
        debug!(%tx_hash, "{} deployment submitted", factory.name);

        let receipt = self.wait_for_receipt(tx_hash).await?;
        let address = deployed_address(&factory.name, &receipt)?;
        self.wait_for_confirmations(&receipt).await?;

        info!(
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "{} deployment confirmed",
            factory.name
        );

        Ok(address)
    }
}
