pub mod artifact;
pub mod options;
pub mod deployment;

pub use artifact::ContractArtifact;
pub use options::{DeployOptions, DeployerContext, Initializer, ProxyKind};
pub use deployment::DeployedProxy;
