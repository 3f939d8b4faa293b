//! Wallet Module
//!
//! Derivation-path modelling and resolution of addresses back to the
//! paths that produce them.

pub mod derivation_path;
pub mod resolver;

pub use derivation_path::{DerivationPath, HARDENED};
pub use resolver::{resolve, SearchBounds, ACCOUNT_LIMIT, INDEX_LIMIT};
