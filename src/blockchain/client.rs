use async_trait::async_trait;
use ethers::abi::Token;
use ethers::prelude::*;
use std::sync::Arc;
use crate::core::ChainClient;
use crate::models::{ContractArtifact, DeployerContext};
use crate::utils::{Result, DeployError};

/// Provider with a local signing wallet attached
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Blockchain RPC client that signs with the deployer's key
pub struct BlockchainClient {
    client: Arc<SignerClient>,
    chain_id: u64,
}

impl BlockchainClient {
    /// Connect and attach the deployer key
    pub async fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| DeployError::RpcError(
                ProviderError::CustomError(format!("Invalid RPC URL: {}", e))
            ))?;

        // Get chain ID
        let chain_id = provider.get_chainid().await?.as_u64();

        tracing::info!("Connected to chain ID: {}", chain_id);

        let wallet = private_key
            .trim()
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|e| DeployError::SignerError(format!("Failed to parse private key: {}", e)))?
            .with_chain_id(chain_id);

        tracing::debug!("Deployer account: {:?}", wallet.address());

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            chain_id,
        })
    }

    /// Deployer context for this connection
    pub fn context(&self) -> DeployerContext {
        DeployerContext::new(self.client.address(), self.chain_id, self.network_name())
    }

    /// Get chain ID
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get chain name
    pub fn chain_name(&self) -> &'static str {
        match self.chain_id {
            1 => "Ethereum Mainnet",
            11155111 => "Sepolia",
            17000 => "Holesky",
            1337 | 31337 => "Local Development",
            _ => "Unknown Chain",
        }
    }

    /// Short network name used for manifest files
    pub fn network_name(&self) -> &'static str {
        match self.chain_id {
            1 => "mainnet",
            11155111 => "sepolia",
            17000 => "holesky",
            1337 | 31337 => "development",
            _ => "unknown",
        }
    }
}

#[async_trait]
impl ChainClient for BlockchainClient {
    async fn deploy_contract(&self, artifact: &ContractArtifact, args: Vec<Token>) -> Result<(Address, H256)> {
        tracing::debug!("{} bytecode length: {} bytes", artifact.contract_name, artifact.bytecode.len());

        let factory = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            self.client.clone(),
        );

        let deployer = factory
            .deploy_tokens(args)
            .map_err(|e| DeployError::ContractError(format!("{}: {}", artifact.contract_name, e)))?;
        let (contract, receipt) = deployer
            .send_with_receipt()
            .await
            .map_err(|e| DeployError::ContractError(format!("{} deployment failed: {}", artifact.contract_name, e)))?;

        Ok((contract.address(), receipt.transaction_hash))
    }

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<Option<H256>> {
        let tx = TransactionRequest::new().to(to).data(data);

        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(|e| DeployError::ContractError(format!("call to {:?}: {}", to, e)))?;
        let receipt = pending.await?;

        match receipt {
            Some(r) if r.status == Some(U64::zero()) => Err(DeployError::ContractError(format!(
                "call to {:?} reverted in {:?}",
                to, r.transaction_hash
            ))),
            receipt => Ok(receipt.map(|r| r.transaction_hash)),
        }
    }

    async fn is_contract(&self, address: Address) -> Result<bool> {
        let code = self.client.inner().get_code(address, None).await?;
        Ok(!code.is_empty())
    }

    async fn get_storage(&self, address: Address, slot: H256) -> Result<H256> {
        let value = self.client.inner().get_storage_at(address, slot, None).await?;
        Ok(value)
    }
}
