pub mod errors;

pub use errors::{DeployError, Result};
