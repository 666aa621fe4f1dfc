//! ERC-1967 proxy helpers
//!
//! Slot derivation for reading a proxy's implementation/admin, the checks run
//! on an implementation before it is put behind a proxy, and the upgrade
//! calldata for each OpenZeppelin generation.

mod slots;
mod upgrade;
mod validation;

pub use slots::{address_from_slot, admin_slot, eip1967_slot, implementation_slot};
pub use upgrade::{admin_layout, admin_upgrade_calldata, uups_upgrade_calldata, AdminLayout};
pub use validation::{encode_initializer, validate_kind};
