//! Proxy contract interfaces
//!
//! Bindings for the calls made on already-deployed proxies:
//! - UUPS upgrades go through the proxy to the implementation's `upgradeTo`
//! - Transparent upgrades go through the proxy's `ProxyAdmin`
//!
//! The proxy contracts themselves are deployed from artifacts, see [`names`].
pub mod uups;
pub mod proxy_admin;
pub use uups::IUUPSUpgradeable;
pub use proxy_admin::IProxyAdmin;

/// Artifact names of the OpenZeppelin proxy contracts
pub mod names {
    /// ERC-1967 proxy used for UUPS deployments
    pub const ERC1967_PROXY: &str = "ERC1967Proxy";

    /// Transparent proxy, `constructor(address logic, address admin, bytes data)`
    pub const TRANSPARENT_PROXY: &str = "TransparentUpgradeableProxy";

    /// Admin contract owning transparent proxies
    pub const PROXY_ADMIN: &str = "ProxyAdmin";
}
