pub mod client;

pub use client::{BlockchainClient, SignerClient};
