//! Constants used in the deploy script

/// The name of the NFT factory contract
pub const NFT_FACTORY_CONTRACT: &str = "NFTFactory";

/// The name of the NFT marketplace contract
pub const NFT_MARKETPLACE_CONTRACT: &str = "NFTMarketplace";

/// The contracts deployed by the script, in deployment order
pub const NFT_CONTRACTS: [&str; 2] = [NFT_FACTORY_CONTRACT, NFT_MARKETPLACE_CONTRACT];

/// The default RPC url, a local dev node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default deployer private key, the first default account in an Anvil / Hardhat node
pub const DEFAULT_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default directory containing compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The interval between polls of the node for receipts and block numbers
pub const CHAIN_POLL_INTERVAL_MS: u64 = 1_000;

/// The number of times to poll the node before giving up on a deployment
pub const CHAIN_POLL_ATTEMPTS: usize = 300;

/// The extension of a contract artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of the per-source directories artifacts are written to
pub const SOURCE_DIR_SUFFIX: &str = ".sol";

/// The name of the Hardhat build info directory, which is skipped during resolution
pub const BUILD_INFO_DIR: &str = "build-info";

/// The separator between source path and contract name in a fully-qualified name
pub const FULLY_QUALIFIED_NAME_SEPARATOR: char = ':';
