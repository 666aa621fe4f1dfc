//! On-chain proxy deployer
//!
//! Deploys the implementation, then the proxy from its OpenZeppelin artifact,
//! and records the result in the network manifest. Upgrades deploy a new
//! implementation and switch the proxy over, either through the
//! implementation's own upgrade entry point (UUPS) or the `ProxyAdmin`
//! (transparent). Both OZ 4 and OZ 5 proxy contracts are supported.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::Token;
use ethers::types::{Address, Bytes, H256};

use crate::contracts::names;
use crate::core::{ArtifactResolver, ChainClient, ProxyDeployer};
use crate::manifest::Manifest;
use crate::models::{ContractArtifact, DeployOptions, DeployedProxy, DeployerContext, Initializer, ProxyKind};
use crate::proxy::{
    address_from_slot, admin_layout, admin_slot, admin_upgrade_calldata, encode_initializer,
    implementation_slot, uups_upgrade_calldata, validate_kind, AdminLayout,
};
use crate::utils::{DeployError, Result};

/// Proxy-side artifacts, resolved before any transaction goes out
enum ProxyArtifacts {
    Uups {
        proxy: ContractArtifact,
    },
    Transparent {
        proxy: ContractArtifact,
        admin: ContractArtifact,
    },
}

pub struct OnchainProxyDeployer {
    chain: Arc<dyn ChainClient>,
    artifacts: Arc<dyn ArtifactResolver>,
    manifest_dir: Option<PathBuf>,
}

impl OnchainProxyDeployer {
    /// `artifacts` must also provide the proxy contracts (`ERC1967Proxy`, ...)
    pub fn new(chain: Arc<dyn ChainClient>, artifacts: Arc<dyn ArtifactResolver>) -> Self {
        Self {
            chain,
            artifacts,
            manifest_dir: None,
        }
    }

    /// Record deployments under this directory
    pub fn with_manifest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.manifest_dir = Some(dir.into());
        self
    }

    fn proxy_artifacts(&self, kind: ProxyKind) -> Result<ProxyArtifacts> {
        Ok(match kind {
            ProxyKind::Uups => ProxyArtifacts::Uups {
                proxy: self.artifacts.resolve(names::ERC1967_PROXY)?,
            },
            ProxyKind::Transparent => ProxyArtifacts::Transparent {
                proxy: self.artifacts.resolve(names::TRANSPARENT_PROXY)?,
                admin: self.artifacts.resolve(names::PROXY_ADMIN)?,
            },
        })
    }

    async fn deploy(&self, artifact: &ContractArtifact, args: Vec<Token>) -> Result<(Address, H256)> {
        tracing::info!("📦 Deploying {}", artifact.contract_name);
        let (address, tx) = self.chain.deploy_contract(artifact, args).await?;
        tracing::info!("✅ {} deployed at {:?}", artifact.contract_name, address);
        Ok((address, tx))
    }

    async fn read_slot_address(&self, proxy: Address, slot: H256) -> Result<Address> {
        let value = self.chain.get_storage(proxy, slot).await?;
        Ok(address_from_slot(value))
    }

    async fn send(&self, label: &str, to: Address, data: Bytes) -> Result<Option<H256>> {
        tracing::debug!("Sending {} to {:?}: 0x{}", label, to, hex::encode(&data));
        self.chain.send_transaction(to, data).await
    }

    fn record(&self, context: &DeployerContext, deployed: &DeployedProxy) -> Result<()> {
        let Some(dir) = &self.manifest_dir else {
            return Ok(());
        };
        let path = Manifest::path_for(dir, context);
        let mut manifest = Manifest::load(&path)?;
        manifest.record(deployed.clone());
        manifest.save(&path)?;
        tracing::debug!("Manifest updated: {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl ProxyDeployer for OnchainProxyDeployer {
    async fn deploy_proxy(
        &self,
        artifact: &ContractArtifact,
        options: DeployOptions,
    ) -> Result<DeployedProxy> {
        validate_kind(artifact, options.kind)?;
        let data = encode_initializer(artifact, &options.initializer)?;
        let plan = self.proxy_artifacts(options.kind)?;

        let (implementation, _) = self.deploy(artifact, Vec::new()).await?;

        let (address, tx_hash) = match &plan {
            ProxyArtifacts::Uups { proxy } => {
                let args = vec![Token::Address(implementation), Token::Bytes(data.to_vec())];
                self.deploy(proxy, args).await?
            }
            ProxyArtifacts::Transparent { proxy, admin } => {
                // OZ 4 takes the admin contract, OZ 5 the owner of the admin it creates
                let admin_arg = match admin_layout(admin) {
                    AdminLayout::Standalone => self.deploy(admin, Vec::new()).await?.0,
                    AdminLayout::ProxyOwned => options.deployer.account,
                };
                let args = vec![
                    Token::Address(implementation),
                    Token::Address(admin_arg),
                    Token::Bytes(data.to_vec()),
                ];
                self.deploy(proxy, args).await?
            }
        };

        let admin = match plan {
            ProxyArtifacts::Uups { .. } => None,
            ProxyArtifacts::Transparent { .. } => Some(self.read_slot_address(address, admin_slot()).await?),
        };

        let deployed = DeployedProxy {
            contract: artifact.contract_name.clone(),
            address,
            implementation,
            kind: options.kind,
            admin,
            tx_hash: Some(tx_hash),
        };

        tracing::info!("🎉 {} proxy for {} at {:?}", options.kind, artifact.contract_name, address);
        self.record(&options.deployer, &deployed)?;
        Ok(deployed)
    }

    async fn upgrade_proxy(
        &self,
        proxy: Address,
        artifact: &ContractArtifact,
        options: DeployOptions,
    ) -> Result<DeployedProxy> {
        validate_kind(artifact, options.kind)?;

        if !self.chain.is_contract(proxy).await? {
            return Err(DeployError::ProxyNotFound(format!("{:?}", proxy)));
        }

        // Upgrades only call into the new implementation when asked to
        let call_data = match &options.initializer {
            Initializer::Call { .. } => Some(encode_initializer(artifact, &options.initializer)?),
            _ => None,
        };
        let admin_artifact = match options.kind {
            ProxyKind::Uups => None,
            ProxyKind::Transparent => Some(self.artifacts.resolve(names::PROXY_ADMIN)?),
        };

        let (implementation, _) = self.deploy(artifact, Vec::new()).await?;

        let (tx_hash, admin) = match admin_artifact {
            None => {
                let data = uups_upgrade_calldata(artifact, implementation, call_data);
                (self.send("UUPS upgrade", proxy, data).await?, None)
            }
            Some(admin_artifact) => {
                let admin = self.read_slot_address(proxy, admin_slot()).await?;
                if admin.is_zero() {
                    return Err(DeployError::ProxyNotFound(format!("{:?} has no ERC-1967 admin", proxy)));
                }
                tracing::debug!("ProxyAdmin for {:?}: {:?}", proxy, admin);

                let data = admin_upgrade_calldata(&admin_artifact, proxy, implementation, call_data);
                (self.send("ProxyAdmin upgrade", admin, data).await?, Some(admin))
            }
        };

        let current = self.read_slot_address(proxy, implementation_slot()).await?;
        if current != implementation {
            return Err(DeployError::UpgradeNotApplied {
                proxy: format!("{:?}", proxy),
                found: format!("{:?}", current),
            });
        }

        let deployed = DeployedProxy {
            contract: artifact.contract_name.clone(),
            address: proxy,
            implementation,
            kind: options.kind,
            admin,
            tx_hash,
        };

        tracing::info!("🎉 Proxy {:?} now points at {} ({:?})", proxy, artifact.contract_name, implementation);
        self.record(&options.deployer, &deployed)?;
        Ok(deployed)
    }
}
