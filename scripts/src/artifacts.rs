//! Resolution of compiled contract artifacts by contract name.
//!
//! Artifacts are expected in the layout emitted by Hardhat and Foundry,
//! i.e. `<root>/**/<Source>.sol/<Name>.json`. Either a bare contract name
//! (`NFTFactory`) or a fully-qualified one (`contracts/NFT.sol:NFTFactory`)
//! may be used to look an artifact up.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{
        ARTIFACT_EXTENSION, BUILD_INFO_DIR, FULLY_QUALIFIED_NAME_SEPARATOR, SOURCE_DIR_SUFFIX,
    },
    errors::ScriptError,
    types::ContractFactory,
};

/// A compilation artifact, as written by Hardhat or Foundry
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract ABI
    abi: JsonAbi,
    /// The contract creation bytecode
    bytecode: RawBytecode,
}

/// The creation bytecode of an artifact.
///
/// Hardhat stores it as a bare hex string, Foundry nests it under `object`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat format
    Hex(String),
    /// Foundry format
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl RawBytecode {
    /// The hex-encoded bytecode, regardless of format
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(hex) => hex,
            RawBytecode::Object { object } => object,
        }
    }
}

/// A directory of compiled contract artifacts
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the given contract identifier to a contract factory
    pub fn contract_factory(&self, identifier: &str) -> Result<ContractFactory, ScriptError> {
        let path = self.find_artifact(identifier)?;
        debug!("Resolved {} to artifact {}", identifier, path.display());

        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?;

        let name = identifier
            .rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR)
            .map_or(identifier, |(_, name)| name);
        parse_artifact(name, &contents)
    }

    /// Find the path of the artifact for the given contract identifier
    fn find_artifact(&self, identifier: &str) -> Result<PathBuf, ScriptError> {
        if !self.root.is_dir() {
            return Err(ScriptError::ArtifactResolution(format!(
                "artifacts directory {} does not exist",
                self.root.display()
            )));
        }

        if let Some((source, name)) = identifier.rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR) {
            let file_name = artifact_file_name(name);
            // Hardhat keeps the full source path, Foundry only the source file name
            let source_dirs = [
                Some(self.root.join(source)),
                Path::new(source).file_name().map(|f| self.root.join(f)),
            ];

            return source_dirs
                .into_iter()
                .flatten()
                .map(|dir| dir.join(&file_name))
                .find(|path| path.is_file())
                .ok_or_else(|| {
                    ScriptError::ArtifactResolution(format!(
                        "artifact for {} not found",
                        identifier
                    ))
                });
        }

        let mut matches = Vec::new();
        collect_artifacts(&self.root, &artifact_file_name(identifier), &mut matches)?;
        matches.sort();

        match matches.len() {
            0 => Err(ScriptError::ArtifactResolution(format!(
                "artifact for {} not found in {}",
                identifier,
                self.root.display()
            ))),
            1 => Ok(matches.remove(0)),
            _ => Err(ScriptError::ArtifactResolution(format!(
                "multiple artifacts for {} found, use a fully-qualified name: {}",
                identifier,
                matches
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// The file name of the artifact for the given contract name
fn artifact_file_name(name: &str) -> String {
    format!("{}.{}", name, ARTIFACT_EXTENSION)
}

/// Whether the artifact at `path` sits in a `<Source>.sol` directory
fn in_source_dir(path: &Path) -> bool {
    path.parent()
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
        .is_some_and(|dir| dir.ends_with(SOURCE_DIR_SUFFIX))
}

/// Recursively collect all artifacts named `file_name` under `dir`.
///
/// Build info directories and symlinked directories are skipped.
fn collect_artifacts(
    dir: &Path,
    file_name: &str,
    matches: &mut Vec<PathBuf>,
) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir).map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?;

    for entry in entries {
        let entry = entry.map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?;
        // `DirEntry::file_type` does not follow symlinks
        let file_type = entry
            .file_type()
            .map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?;
        let path = entry.path();

        if file_type.is_dir() {
            if entry.file_name() == BUILD_INFO_DIR {
                continue;
            }
            collect_artifacts(&path, file_name, matches)?;
        } else if file_type.is_file() && entry.file_name() == file_name && in_source_dir(&path) {
            matches.push(path);
        }
    }

    Ok(())
}

/// Parse a contract factory out of the contents of an artifact file
pub fn parse_artifact(name: &str, contents: &str) -> Result<ContractFactory, ScriptError> {
    let artifact: RawArtifact =
        serde_json::from_str(contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    let bytecode = Bytes::from_str(artifact.bytecode.as_hex()).map_err(|e| {
        ScriptError::ArtifactParsing(format!(
            "invalid bytecode for {} (unlinked libraries?): {}",
            name, e
        ))
    })?;

    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{} is abstract or an interface and cannot be deployed",
            name
        )));
    }

    // The script deploys every contract without constructor arguments
    if let Some(constructor) = &artifact.abi.constructor {
        if !constructor.inputs.is_empty() {
            return Err(ScriptError::CalldataConstruction(format!(
                "constructor of {} expects {} arguments, none supplied",
                name,
                constructor.inputs.len()
            )));
        }
    }

    Ok(ContractFactory::new(name, artifact.abi, bytecode))
}
