use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Invalid artifact {name}: {reason}")]
    InvalidArtifact { name: String, reason: String },

    #[error("Unsupported proxy kind: {0}")]
    UnsupportedKind(String),

    #[error("Contract {contract} is not compatible with {kind} proxies: {reason}")]
    IncompatibleKind {
        contract: String,
        kind: String,
        reason: String,
    },

    #[error("Initializer error: {0}")]
    Initializer(String),

    #[error("No proxy recorded for {0}")]
    ProxyNotFound(String),

    #[error("Upgrade not applied: proxy {proxy} still points at {found}")]
    UpgradeNotApplied { proxy: String, found: String },

    #[error("RPC error: {0}")]
    RpcError(#[from] ethers::providers::ProviderError),

    #[error("Contract call failed: {0}")]
    ContractError(String),

    #[error("Signer error: {0}")]
    SignerError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
