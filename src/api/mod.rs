//! Chain-data API clients
//!
//! Read-only lookups against a remote chain-data service. The service
//! reports previous-output amounts and script categories; both are
//! treated as authoritative for assembly but validated against the
//! caller's intent before anything is signed.

mod providers;

pub use providers::*;

use bitcoin::Txid;
use serde::{Deserialize, Serialize};

use crate::error::SignerResult;

/// Metadata of one previous transaction output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrevOutput {
    /// Amount in satoshis
    pub value: u64,
    /// Script category as the provider reports it, e.g. "pay-to-pubkey-hash"
    pub script_type: String,
}

/// Capability interface for previous-output lookups.
///
/// Calls are read-only and idempotent; a run may invoke this more than
/// once for the same output.
pub trait ChainData {
    fn get_output(&self, prev_hash: &Txid, index: u32) -> SignerResult<PrevOutput>;
}
