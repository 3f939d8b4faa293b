//! Hardware-device signing library
//!
//! Signs arbitrary messages and simple single-input transactions with a
//! hardware signing device, without the device ever exposing private
//! key material. The caller supplies a source address and intent; this
//! crate recovers the derivation path behind the address, assembles a
//! balanced transaction, and delegates all signing to the device.
//!
//! # Architecture
//!
//! - **policy**: static address-prefix policy table (network, path
//!   root, script kinds)
//! - **wallet**: derivation-path model and the bounded brute-force
//!   resolver that recovers a path from an address
//! - **tx**: UTXO script classification, transaction assembly, and the
//!   signing orchestrator
//! - **device**: the signing-device capability interface
//! - **api**: chain-data lookups for previous outputs
//!
//! # Trust model
//!
//! The device is trusted to return addresses and signatures, never
//! keys. Chain-data responses feed assembly but are validated against
//! the caller's intent before any signing call.

pub mod api;
pub mod device;
pub mod error;
pub mod policy;
pub mod tx;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export key types for convenience
pub use error::{ErrorCode, SignerError, SignerResult};
pub use types::*;

pub use tx::{assemble, classify, classify_script_type, run, RunOptions};
pub use wallet::{resolve, DerivationPath, SearchBounds, ACCOUNT_LIMIT, HARDENED, INDEX_LIMIT};
