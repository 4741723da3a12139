//! Runs the deployment pipeline against artifacts on disk with a stubbed chain

use std::{cell::RefCell, fs, path::Path};

use alloy::primitives::Address;
use nft_deploy::{
    artifacts::ArtifactStore,
    commands::deploy_nft_contracts,
    errors::ScriptError,
    toolchain::Toolchain,
    types::ContractFactory,
};

/// A toolchain resolving real artifacts and "deploying" at sequential addresses
struct ArtifactBackedToolchain {
    /// The artifacts to resolve contracts from
    artifacts: ArtifactStore,
    /// The bytecode of every deployed contract, in order
    deployed: RefCell<Vec<Vec<u8>>>,
}

impl ArtifactBackedToolchain {
    /// Create a toolchain over the given artifacts directory
    fn new(root: &Path) -> Self {
        Self {
            artifacts: ArtifactStore::new(root),
            deployed: RefCell::new(Vec::new()),
        }
    }
}

impl Toolchain for ArtifactBackedToolchain {
    async fn contract_factory(&self, name: &str) -> Result<ContractFactory, ScriptError> {
        self.artifacts.contract_factory(name)
    }

    async fn deploy(&self, factory: &ContractFactory) -> Result<Address, ScriptError> {
        let mut deployed = self.deployed.borrow_mut();
        deployed.push(factory.bytecode.to_vec());
        Ok(Address::with_last_byte(deployed.len() as u8))
    }
}

/// Write a Hardhat artifact for `name` with the given bytecode under `root`
fn write_artifact(root: &Path, name: &str, bytecode: &str) {
    let dir = root.join("contracts").join(format!("{name}.sol"));
    fs::create_dir_all(&dir).unwrap();
    let artifact = format!(
        r#"{{ "contractName": "{name}", "abi": [], "bytecode": "{bytecode}" }}"#
    );
    fs::write(dir.join(format!("{name}.json")), artifact).unwrap();
}

#[tokio::test]
async fn test_deploys_factory_then_marketplace() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "NFTFactory", "0x01");
    write_artifact(dir.path(), "NFTMarketplace", "0x02");
    let toolchain = ArtifactBackedToolchain::new(dir.path());

    let mut out: Vec<u8> = Vec::new();
    let deployments = deploy_nft_contracts(&toolchain, &mut out).await.unwrap();

    assert_eq!(*toolchain.deployed.borrow(), vec![vec![0x01], vec![0x02]]);
    assert_eq!(deployments.len(), 2);

    let output = String::from_utf8(out).unwrap();
    assert_eq!(output.lines().count(), 2);
    assert!(output.contains(&format!(
        "NFTFactory contract deployed to address: {}",
        Address::with_last_byte(1)
    )));
    assert!(output.contains(&format!(
        "NFTMarketplace contract deployed to address: {}",
        Address::with_last_byte(2)
    )));
}

#[tokio::test]
async fn test_missing_marketplace_artifact_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "NFTFactory", "0x01");
    let toolchain = ArtifactBackedToolchain::new(dir.path());

    let mut out: Vec<u8> = Vec::new();
    let res = deploy_nft_contracts(&toolchain, &mut out).await;

    assert!(matches!(res, Err(ScriptError::ArtifactResolution(_))));
    assert_eq!(toolchain.deployed.borrow().len(), 1);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_missing_factory_artifact_deploys_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "NFTMarketplace", "0x02");
    let toolchain = ArtifactBackedToolchain::new(dir.path());

    let mut out: Vec<u8> = Vec::new();
    let res = deploy_nft_contracts(&toolchain, &mut out).await;

    assert!(res.is_err());
    assert!(toolchain.deployed.borrow().is_empty());
    assert!(out.is_empty());
}
