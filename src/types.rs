//! Shared types for the signer
//!
//! All data structures that cross module boundaries are defined here
//! for consistent serialization.

use bitcoin::Txid;
use serde::{Deserialize, Serialize};

use crate::wallet::DerivationPath;

// =============================================================================
// Network Types
// =============================================================================

/// Supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Main,
    Test,
}

impl Network {
    /// Coin name as the device protocol expects it
    pub fn coin_name(&self) -> &'static str {
        match self {
            Network::Main => "Bitcoin",
            Network::Test => "Testnet",
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Network::Test)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.coin_name())
    }
}

// =============================================================================
// Script Kinds
// =============================================================================

/// Input script kinds the device can spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputScriptKind {
    /// Legacy pay-to-pubkey-hash spend
    SpendAddress,
    /// Segwit-in-P2SH spend
    SpendP2shWitness,
}

/// Output script kinds the device can pay to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputScriptKind {
    /// Plain address output
    PayToAddress,
    /// Segwit-in-P2SH output
    PayToP2shWitness,
}

// =============================================================================
// UTXO Types
// =============================================================================

/// Reference to a spendable previous output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoReference {
    pub prev_hash: Txid,
    pub output_index: u32,
}

impl std::fmt::Display for UtxoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prev_hash, self.output_index)
    }
}

/// A previous output with the data needed to spend it.
///
/// Amount and script kind come from the chain-data service and are
/// validated against the caller's intent before signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtxoInfo {
    pub reference: UtxoReference,
    /// Amount in satoshis
    pub amount: u64,
    pub script_kind: InputScriptKind,
}

// =============================================================================
// Transaction Descriptors
// =============================================================================

/// Single transaction input, ready for the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxInputDescriptor {
    pub path: DerivationPath,
    pub prev_hash: Txid,
    pub prev_index: u32,
    pub script_kind: InputScriptKind,
    /// Amount in satoshis
    pub amount: u64,
}

/// Single transaction output, ready for the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxOutputDescriptor {
    /// Amount in satoshis
    pub amount: u64,
    pub script_kind: OutputScriptKind,
    pub address: String,
}

/// A fully assembled single-input transaction.
///
/// Output ordering is fixed: the payment output comes first, the change
/// output (when present) second. Serialization is order-sensitive, so
/// callers must not reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledTransaction {
    pub input: TxInputDescriptor,
    pub outputs: Vec<TxOutputDescriptor>,
}

// =============================================================================
// Signing Intent and Results
// =============================================================================

/// Transaction portion of a signing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub prev_hash: Txid,
    pub prev_index: u32,
    pub destination: String,
    /// Amount to send, in satoshis
    pub amount: u64,
    /// Total fee, in satoshis
    pub fee: u64,
}

/// Top-level signing request: a message, a transaction, or both
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningIntent {
    /// Address the signature(s) must come from
    pub address: String,
    pub message: Option<String>,
    pub transaction: Option<TransactionRequest>,
}

impl SigningIntent {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.transaction.is_none()
    }
}

/// A signed message as returned by the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedMessage {
    pub address: String,
    /// Signature bytes, base64-encoded
    pub signature: String,
}

/// A signed transaction as returned by the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// One DER signature per input, hex-encoded
    pub signatures: Vec<String>,
    /// Fully serialized transaction, hex-encoded
    pub raw_tx: String,
}

/// Combined result of one signing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigningOutcome {
    pub message: Option<SignedMessage>,
    pub transaction: Option<SignedTransaction>,
}

/// An address together with the derivation path that produces it.
///
/// Only ever created by a successful path resolution; consumed by the
/// assembler and orchestrator, never cached across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub address: String,
    pub path: DerivationPath,
}
