//! Compiled artifact lookup
//!
//! Reads Truffle/Hardhat build artifacts (`build/contracts/<Name>.json`) as
//! well as Foundry output, where `bytecode` is an object with an `object` field.

use std::path::{Path, PathBuf};

use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;

use crate::core::ArtifactResolver;
use crate::models::ContractArtifact;
use crate::utils::{DeployError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

#[derive(Deserialize)]
struct RawArtifact {
    #[serde(rename = "contractName")]
    contract_name: Option<String>,
    abi: Abi,
    bytecode: RawBytecode,
}

/// Artifact directory on disk
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl ArtifactResolver for ArtifactStore {
    fn resolve(&self, name: &str) -> Result<ContractArtifact> {
        let path = self.path_for(name);
        tracing::debug!("Loading artifact {} from {}", name, path.display());

        if !path.is_file() {
            return Err(DeployError::ArtifactNotFound(name.to_string()));
        }

        let raw = std::fs::read_to_string(&path)?;
        parse_artifact(name, &raw)
    }
}

/// Parse artifact JSON; `name` is used when the file carries no `contractName`
pub fn parse_artifact(name: &str, json: &str) -> Result<ContractArtifact> {
    let invalid = |reason: String| DeployError::InvalidArtifact {
        name: name.to_string(),
        reason,
    };

    let raw: RawArtifact = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;

    let code = match raw.bytecode {
        RawBytecode::Hex(code) => code,
        RawBytecode::Object { object } => object,
    };
    let bytes = hex::decode(code.trim().trim_start_matches("0x"))
        .map_err(|e| invalid(format!("bytecode is not valid hex ({}), unlinked libraries?", e)))?;

    let artifact = ContractArtifact::new(
        raw.contract_name.unwrap_or_else(|| name.to_string()),
        raw.abi,
        Bytes::from(bytes),
    );

    if !artifact.is_deployable() {
        return Err(invalid("empty bytecode (interface or abstract contract)".into()));
    }

    tracing::debug!("Artifact {}: {} bytes of bytecode", artifact.contract_name, artifact.bytecode.len());
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TRUFFLE: &str = r#"{
        "contractName": "ODON",
        "abi": [
            {"type": "function", "name": "initialize", "inputs": [], "outputs": [], "stateMutability": "nonpayable"}
        ],
        "bytecode": "0x6080604052"
    }"#;

    const FOUNDRY: &str = r#"{
        "abi": [],
        "bytecode": {"object": "0x6080604052", "linkReferences": {}}
    }"#;

    #[test]
    fn test_parse_truffle_artifact() {
        let artifact = parse_artifact("ODON", TRUFFLE).unwrap();
        assert_eq!(artifact.contract_name, "ODON");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact.has_function("initialize"));
    }

    #[test]
    fn test_parse_foundry_artifact() {
        let artifact = parse_artifact("Box", FOUNDRY).unwrap();
        assert_eq!(artifact.contract_name, "Box");
        assert_eq!(artifact.bytecode.len(), 5);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let json = r#"{"contractName": "IODON", "abi": [], "bytecode": "0x"}"#;
        let err = parse_artifact("IODON", json).unwrap_err();
        assert!(matches!(err, DeployError::InvalidArtifact { .. }));
    }

    #[test]
    fn test_unlinked_bytecode_rejected() {
        let json = r#"{"abi": [], "bytecode": "0x6080__$abc$__"}"#;
        assert!(matches!(
            parse_artifact("Linked", json),
            Err(DeployError::InvalidArtifact { .. })
        ));
    }

    #[test]
    fn test_store_resolves_by_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ODON.json"), TRUFFLE).unwrap();

        let store = ArtifactStore::new(dir.path());
        let artifact = store.resolve("ODON").unwrap();
        assert_eq!(artifact.contract_name, "ODON");

        let missing = store.resolve("ODON_V2").unwrap_err();
        assert!(matches!(missing, DeployError::ArtifactNotFound(ref n) if n == "ODON_V2"));
    }
}
