//! biggim-common — Shared error type, configuration, and HTTP transport
//! used across the BigGIM client crates.

pub mod config;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{BigGimError, Result};
