//! UUPS (ERC-1822) upgrade entry points, called through the proxy
use ethers::prelude::*;

abigen!(
    IUUPSUpgradeable,
    r#"[
        function proxiableUUID() external view returns (bytes32)
        function upgradeTo(address newImplementation) external
        function upgradeToAndCall(address newImplementation, bytes data) external payable
        event Upgraded(address indexed implementation)
    ]"#,
);
