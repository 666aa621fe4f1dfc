pub mod onchain;

pub use onchain::OnchainProxyDeployer;
