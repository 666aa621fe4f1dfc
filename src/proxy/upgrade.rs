//! Upgrade call selection across OpenZeppelin 4 and 5
//!
//! OZ 5 dropped `upgradeTo` from UUPS implementations and `upgrade` from
//! `ProxyAdmin`; only the `...AndCall` forms remain, taking empty data for a
//! plain upgrade. OZ 5 transparent proxies also deploy their own `ProxyAdmin`
//! and take the admin's owner as constructor argument.

use ethers::abi::AbiEncode;
use ethers::types::{Address, Bytes};

use crate::contracts::proxy_admin::{UpgradeAndCallCall, UpgradeCall};
use crate::contracts::uups::{UpgradeToAndCallCall, UpgradeToCall};
use crate::models::ContractArtifact;

/// Who creates the `ProxyAdmin` of a transparent proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminLayout {
    /// OZ 4: deploy `ProxyAdmin` first, pass its address to the proxy
    Standalone,

    /// OZ 5: the proxy deploys its own admin, owned by `initialOwner`
    ProxyOwned,
}

/// OZ 5 `ProxyAdmin` takes its initial owner in the constructor
pub fn admin_layout(proxy_admin: &ContractArtifact) -> AdminLayout {
    match proxy_admin.abi.constructor() {
        Some(ctor) if ctor.inputs.len() == 1 => AdminLayout::ProxyOwned,
        _ => AdminLayout::Standalone,
    }
}

/// Calldata sent to a UUPS proxy to switch to `implementation`
pub fn uups_upgrade_calldata(
    artifact: &ContractArtifact,
    implementation: Address,
    call: Option<Bytes>,
) -> Bytes {
    let encoded = match call {
        None if artifact.has_function("upgradeTo") => UpgradeToCall {
            new_implementation: implementation,
        }
        .encode(),
        call => UpgradeToAndCallCall {
            new_implementation: implementation,
            data: call.unwrap_or_default(),
        }
        .encode(),
    };
    Bytes::from(encoded)
}

/// Calldata sent to a `ProxyAdmin` to upgrade `proxy`
pub fn admin_upgrade_calldata(
    proxy_admin: &ContractArtifact,
    proxy: Address,
    implementation: Address,
    call: Option<Bytes>,
) -> Bytes {
    let encoded = match call {
        None if proxy_admin.has_function("upgrade") => UpgradeCall {
            proxy,
            implementation,
        }
        .encode(),
        call => UpgradeAndCallCall {
            proxy,
            implementation,
            data: call.unwrap_or_default(),
        }
        .encode(),
    };
    Bytes::from(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::{Abi, AbiDecode};
    use serde_json::json;

    fn artifact(abi: serde_json::Value) -> ContractArtifact {
        let abi: Abi = serde_json::from_value(abi).unwrap();
        ContractArtifact::new("Artifact", abi, Bytes::from(vec![0x60, 0x80]))
    }

    fn function(name: &str, inputs: serde_json::Value) -> serde_json::Value {
        json!({"type": "function", "name": name, "inputs": inputs, "outputs": [], "stateMutability": "nonpayable"})
    }

    #[test]
    fn test_admin_layout() {
        let oz4 = artifact(json!([]));
        let oz5 = artifact(json!([
            {"type": "constructor", "inputs": [{"name": "initialOwner", "type": "address"}], "stateMutability": "nonpayable"}
        ]));

        assert_eq!(admin_layout(&oz4), AdminLayout::Standalone);
        assert_eq!(admin_layout(&oz5), AdminLayout::ProxyOwned);
    }

    #[test]
    fn test_uups_prefers_upgrade_to_when_declared() {
        let oz4 = artifact(json!([function("upgradeTo", json!([{"name": "newImplementation", "type": "address"}]))]));
        let implementation = Address::repeat_byte(0x42);

        let data = uups_upgrade_calldata(&oz4, implementation, None);
        let call = UpgradeToCall::decode(&data).unwrap();
        assert_eq!(call.new_implementation, implementation);
    }

    #[test]
    fn test_uups_falls_back_to_upgrade_to_and_call() {
        let oz5 = artifact(json!([function(
            "upgradeToAndCall",
            json!([{"name": "newImplementation", "type": "address"}, {"name": "data", "type": "bytes"}])
        )]));
        let implementation = Address::repeat_byte(0x42);

        let data = uups_upgrade_calldata(&oz5, implementation, None);
        assert!(UpgradeToCall::decode(&data).is_err());
        let call = UpgradeToAndCallCall::decode(&data).unwrap();
        assert_eq!(call.new_implementation, implementation);
        assert!(call.data.is_empty());

        let with_call = uups_upgrade_calldata(&oz5, implementation, Some(Bytes::from(vec![0x81, 0x29, 0xfc, 0x1c])));
        let call = UpgradeToAndCallCall::decode(&with_call).unwrap();
        assert_eq!(call.data.to_vec(), vec![0x81, 0x29, 0xfc, 0x1c]);
    }

    #[test]
    fn test_admin_upgrade_per_generation() {
        let proxy = Address::repeat_byte(0x01);
        let implementation = Address::repeat_byte(0x02);

        let oz4 = artifact(json!([function(
            "upgrade",
            json!([{"name": "proxy", "type": "address"}, {"name": "implementation", "type": "address"}])
        )]));
        let call = UpgradeCall::decode(admin_upgrade_calldata(&oz4, proxy, implementation, None)).unwrap();
        assert_eq!((call.proxy, call.implementation), (proxy, implementation));

        let oz5 = artifact(json!([]));
        let call = UpgradeAndCallCall::decode(admin_upgrade_calldata(&oz5, proxy, implementation, None)).unwrap();
        assert_eq!((call.proxy, call.implementation), (proxy, implementation));
        assert!(call.data.is_empty());
    }
}
