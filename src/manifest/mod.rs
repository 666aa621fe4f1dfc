//! Deployment manifest
//!
//! One JSON file per network (`<network>-<chain_id>.json`) listing the proxies
//! deployed there, so later upgrades can find a proxy by contract name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{DeployedProxy, DeployerContext};
use crate::utils::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub proxies: Vec<DeployedProxy>,
}

impl Manifest {
    pub fn path_for(dir: &Path, context: &DeployerContext) -> PathBuf {
        dir.join(format!("{}-{}.json", context.network, context.chain_id))
    }

    /// Load a manifest; a missing file is an empty manifest
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Insert or update the entry for this proxy address.
    ///
    /// An entry keeps the contract name it was first deployed under, so a
    /// proxy upgraded to `ODON_V2` is still found as `ODON`.
    pub fn record(&mut self, proxy: DeployedProxy) {
        match self.proxies.iter_mut().find(|p| p.address == proxy.address) {
            Some(existing) => {
                let contract = std::mem::take(&mut existing.contract);
                *existing = DeployedProxy { contract, ..proxy };
            }
            None => self.proxies.push(proxy),
        }
    }

    /// Most recently recorded proxy for a contract name
    pub fn latest_for(&self, contract: &str) -> Option<&DeployedProxy> {
        self.proxies.iter().rev().find(|p| p.contract == contract)
    }

    /// Proxy to upgrade: the latest one recorded under any of `names`,
    /// else the network's only proxy
    pub fn find_proxy(&self, names: &[&str]) -> Option<&DeployedProxy> {
        names
            .iter()
            .find_map(|name| self.latest_for(name))
            .or(match self.proxies.as_slice() {
                [only] => Some(only),
                _ => None,
            })
    }
}
