use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

use super::options::ProxyKind;

/// Handle to a proxy created (or upgraded) on chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedProxy {
    pub contract: String,
    pub address: Address,
    pub implementation: Address,
    pub kind: ProxyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<H256>,
}

impl std::fmt::Display for DeployedProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "              PROXY DEPLOYMENT")?;
        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        writeln!(f, "Contract:       {}", self.contract)?;
        writeln!(f, "Kind:           {}", self.kind)?;
        writeln!(f, "Proxy:          {:?}", self.address)?;
        writeln!(f, "Implementation: {:?}", self.implementation)?;

        if let Some(admin) = self.admin {
            writeln!(f, "Admin:          {:?}", admin)?;
        }
        if let Some(tx) = self.tx_hash {
            writeln!(f, "Transaction:    {:?}", tx)?;
        }

        writeln!(f, "═══════════════════════════════════════════════════════════")?;
        Ok(())
    }
}
