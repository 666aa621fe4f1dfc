use ethers::abi::Abi;
use ethers::types::Bytes;

/// Compiled contract: ABI plus creation bytecode
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn new(contract_name: impl Into<String>, abi: Abi, bytecode: Bytes) -> Self {
        Self {
            contract_name: contract_name.into(),
            abi,
            bytecode,
        }
    }

    /// Does the ABI declare a function with this name (any overload)?
    pub fn has_function(&self, name: &str) -> bool {
        self.abi.functions.contains_key(name)
    }

    /// Interfaces and abstract contracts compile to empty bytecode
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}
