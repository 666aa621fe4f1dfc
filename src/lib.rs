pub mod artifacts;
pub mod contracts;
pub mod manifest;
pub mod proxy;

pub mod core;
pub mod models;
pub mod blockchain;
pub mod deployer;
pub mod utils;

pub use core::{run_migration, ArtifactResolver, Migration, ProxyDeployer};
pub use models::{ContractArtifact, DeployOptions, DeployedProxy, DeployerContext, Initializer, ProxyKind};
pub use utils::{DeployError, Result};
