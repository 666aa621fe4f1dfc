//! ERC-1967 storage slots
//!
//! Proxies keep their implementation and admin addresses at
//! `keccak256(label) - 1` so they never collide with the implementation's
//! own storage layout.

use ethers::types::{Address, H256, U256};
use sha3::{Digest, Keccak256};

pub const IMPLEMENTATION_LABEL: &str = "eip1967.proxy.implementation";
pub const ADMIN_LABEL: &str = "eip1967.proxy.admin";

/// Calculate an ERC-1967 slot
///
/// Formula: keccak256(label) - 1
pub fn eip1967_slot(label: &str) -> H256 {
    let hash = Keccak256::digest(label.as_bytes());
    let slot = U256::from_big_endian(&hash[..]) - U256::one();

    let mut bytes = [0u8; 32];
    slot.to_big_endian(&mut bytes);
    H256::from(bytes)
}

/// Slot holding the implementation address
pub fn implementation_slot() -> H256 {
    eip1967_slot(IMPLEMENTATION_LABEL)
}

/// Slot holding the admin address (transparent proxies)
pub fn admin_slot() -> H256 {
    eip1967_slot(ADMIN_LABEL)
}

/// Addresses are stored right-aligned in the slot
pub fn address_from_slot(value: H256) -> Address {
    Address::from_slice(&value.as_bytes()[12..])
}
