//! BIP-32 derivation paths
//!
//! Paths here always have the fixed shape `purpose'/coin'/account'/chain/index`:
//! a hardened policy root, a hardened account, the chain selector
//! (0 external, 1 internal/change) and the address index. A path is
//! immutable once built; the change-chain sibling is a new value.

use serde::{Deserialize, Serialize};

/// Hardened offset for BIP-32 derivation
pub const HARDENED: u32 = 0x8000_0000;

/// Standard BIP purposes
pub mod bip_purposes {
    pub const BIP44: u32 = 44; // Legacy (P2PKH)
    pub const BIP49: u32 = 49; // SegWit compatible (P2SH-P2WPKH)
}

/// Coin types from SLIP-0044
pub mod coin_types {
    pub const BITCOIN: u32 = 0;
    pub const BITCOIN_TESTNET: u32 = 1;
}

/// A full derivation path as raw BIP-32 child numbers.
///
/// Each component carries the hardened bit directly, which is the form
/// the device protocol consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// Build `root / account' / chain / index` from a hardened policy root.
    pub fn from_root(root: &[u32], account: u32, chain: u32, index: u32) -> Self {
        let mut components = Vec::with_capacity(root.len() + 3);
        components.extend_from_slice(root);
        components.push(account | HARDENED);
        components.push(chain);
        components.push(index);
        Self(components)
    }

    /// Raw child numbers, hardened bit included
    pub fn as_child_numbers(&self) -> &[u32] {
        &self.0
    }

    /// The chain selector component (0 external, 1 change)
    pub fn chain(&self) -> u32 {
        self.0[self.0.len() - 2]
    }

    /// The trailing address index component
    pub fn address_index(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    /// The hardened account component, without the hardened bit
    pub fn account(&self) -> u32 {
        self.0[self.0.len() - 3] & !HARDENED
    }

    /// Same path with the chain selector replaced.
    ///
    /// `with_chain(1)` yields the internal/change sibling used for
    /// change outputs.
    pub fn with_chain(&self, chain: u32) -> Self {
        let mut components = self.0.clone();
        let pos = components.len() - 2;
        components[pos] = chain;
        Self(components)
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m")?;
        for component in &self.0 {
            if component & HARDENED != 0 {
                write!(f, "/{}'", component & !HARDENED)?;
            } else {
                write!(f, "/{}", component)?;
            }
        }
        Ok(())
    }
}
