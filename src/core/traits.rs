use async_trait::async_trait;
use ethers::abi::Token;
use ethers::types::{Address, Bytes, H256};
use crate::models::{ContractArtifact, DeployOptions, DeployedProxy};
use crate::utils::Result;

/// Resolves a contract name to its compiled artifact
pub trait ArtifactResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<ContractArtifact>;
}

/// Core abstraction: anything that can put an upgradeable proxy on chain
#[async_trait]
pub trait ProxyDeployer: Send + Sync {
    /// Deploy the implementation and a new proxy in front of it
    async fn deploy_proxy(
        &self,
        artifact: &ContractArtifact,
        options: DeployOptions,
    ) -> Result<DeployedProxy>;

    /// Point an existing proxy at a freshly deployed implementation
    async fn upgrade_proxy(
        &self,
        proxy: Address,
        artifact: &ContractArtifact,
        options: DeployOptions,
    ) -> Result<DeployedProxy>;
}

/// Signed access to a chain: the transactions a proxy deployment needs
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Deploy `artifact` with constructor arguments; returns address and tx hash
    async fn deploy_contract(&self, artifact: &ContractArtifact, args: Vec<Token>) -> Result<(Address, H256)>;

    /// Send calldata to a contract and wait for the receipt
    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<Option<H256>>;

    async fn is_contract(&self, address: Address) -> Result<bool>;

    async fn get_storage(&self, address: Address, slot: H256) -> Result<H256>;
}
