pub mod traits;
pub mod migration;

pub use traits::{ArtifactResolver, ChainClient, ProxyDeployer};
pub use migration::{run_migration, Migration, INITIAL_CONTRACT};
