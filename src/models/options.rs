use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::DeployError;

/// Proxy strategy used to front an implementation contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    /// Upgrade logic lives in the implementation (ERC-1822)
    #[default]
    Uups,

    /// Upgrade logic lives in the proxy, driven by a ProxyAdmin
    Transparent,
}

impl ProxyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyKind::Uups => "uups",
            ProxyKind::Transparent => "transparent",
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyKind {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uups" => Ok(ProxyKind::Uups),
            "transparent" => Ok(ProxyKind::Transparent),
            other => Err(DeployError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Account and network a deployment is submitted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployerContext {
    pub account: Address,
    pub chain_id: u64,
    pub network: String,
}

impl DeployerContext {
    pub fn new(account: Address, chain_id: u64, network: impl Into<String>) -> Self {
        Self {
            account,
            chain_id,
            network: network.into(),
        }
    }
}

/// Which function (if any) the proxy calls on its implementation at construction
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Initializer {
    /// Call `initialize()` when the ABI declares a zero-argument `initialize`
    #[default]
    Default,

    /// Call `name` with JSON-typed arguments
    Call {
        name: String,
        args: Vec<serde_json::Value>,
    },

    /// Deploy without an initializer call
    Skip,
}

/// Deployment configuration passed into the proxy deployer
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOptions {
    pub deployer: DeployerContext,
    pub kind: ProxyKind,
    pub initializer: Initializer,
}

impl DeployOptions {
    pub fn new(deployer: DeployerContext, kind: ProxyKind) -> Self {
        Self {
            deployer,
            kind,
            initializer: Initializer::Default,
        }
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }
}
