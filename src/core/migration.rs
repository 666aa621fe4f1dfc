//! Migration trigger
//!
//! A migration resolves a contract artifact by name and hands it to a
//! [`ProxyDeployer`], either to deploy a new proxy or to upgrade one.

use ethers::types::Address;

use crate::core::{ArtifactResolver, ProxyDeployer};
use crate::models::{DeployOptions, DeployedProxy, DeployerContext, ProxyKind};
use crate::utils::Result;

/// Contract deployed by the initial migration
pub const INITIAL_CONTRACT: &str = "ODON";

/// One migration step: deploy a new proxy, or upgrade an existing one
#[derive(Debug, Clone, PartialEq)]
pub enum Migration {
    Deploy {
        contract: String,
        options: DeployOptions,
    },
    Upgrade {
        proxy: Address,
        contract: String,
        options: DeployOptions,
    },
}

impl Migration {
    pub fn deploy(contract: impl Into<String>, options: DeployOptions) -> Self {
        Migration::Deploy {
            contract: contract.into(),
            options,
        }
    }

    pub fn upgrade(proxy: Address, contract: impl Into<String>, options: DeployOptions) -> Self {
        Migration::Upgrade {
            proxy,
            contract: contract.into(),
            options,
        }
    }

    pub fn contract(&self) -> &str {
        match self {
            Migration::Deploy { contract, .. } | Migration::Upgrade { contract, .. } => contract,
        }
    }

    /// Resolve the artifact, then issue exactly one deployer call.
    ///
    /// Errors are returned as produced by the resolver or the deployer.
    pub async fn execute(
        self,
        artifacts: &dyn ArtifactResolver,
        deployer: &dyn ProxyDeployer,
    ) -> Result<DeployedProxy> {
        let artifact = artifacts.resolve(self.contract())?;

        match self {
            Migration::Deploy { options, .. } => {
                tracing::info!("🚀 Deploying {} behind a {} proxy", artifact.contract_name, options.kind);
                deployer.deploy_proxy(&artifact, options).await
            }
            Migration::Upgrade { proxy, options, .. } => {
                tracing::info!("⬆️  Upgrading proxy {:?} to {}", proxy, artifact.contract_name);
                deployer.upgrade_proxy(proxy, &artifact, options).await
            }
        }
    }
}

/// Initial migration: deploy `ODON` behind a UUPS proxy.
pub async fn run_migration(
    deployer_context: DeployerContext,
    artifacts: &dyn ArtifactResolver,
    deployer: &dyn ProxyDeployer,
) -> Result<()> {
    let options = DeployOptions::new(deployer_context, ProxyKind::Uups);

    Migration::deploy(INITIAL_CONTRACT, options)
        .execute(artifacts, deployer)
        .await?;

    Ok(())
}
