//! Type definitions used throughout the deploy script

use std::fmt::{self, Display};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes},
};

/// A handle capable of producing a deployment transaction for a named,
/// compiled contract
#[derive(Clone, Debug)]
pub struct ContractFactory {
    /// The name of the contract
    pub name: String,
    /// The ABI of the contract
    pub abi: JsonAbi,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

impl ContractFactory {
    /// Construct a factory from its parts
    pub fn new(name: impl Into<String>, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            abi,
            bytecode,
        }
    }
}

/// The outcome of a confirmed contract deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    /// The name of the deployed contract
    pub name: String,
    /// The address at which the contract was created
    pub address: Address,
}

impl Display for DeploymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contract deployed to address: {}", self.name, self.address)
    }
}
