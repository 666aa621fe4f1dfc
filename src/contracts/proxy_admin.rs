//! ProxyAdmin interface for transparent proxies
use ethers::prelude::*;

abigen!(
    IProxyAdmin,
    r#"[
        function owner() external view returns (address)
        function getProxyImplementation(address proxy) external view returns (address)
        function getProxyAdmin(address proxy) external view returns (address)
        function upgrade(address proxy, address implementation) external
        function upgradeAndCall(address proxy, address implementation, bytes data) external payable
    ]"#,
);
