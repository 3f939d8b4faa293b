//! Derivation path resolution
//!
//! The device exposes no reverse lookup from address to path, so the
//! path behind a given address is recovered by a bounded brute-force
//! search: derive candidate addresses on the device and compare. The
//! search space and visiting order are fixed, which keeps an
//! exhausted search a clean "not found" instead of a hang.

use crate::device::DeviceClient;
use crate::error::SignerResult;
use crate::log_debug;
use crate::log_info;
use crate::policy;
use crate::types::ResolvedAddress;
use crate::wallet::DerivationPath;

/// Accounts searched per prefix policy
pub const ACCOUNT_LIMIT: u32 = 5;
/// Address indexes searched per account and chain
pub const INDEX_LIMIT: u32 = 100;

/// Bounds of the three-dimensional candidate space.
///
/// Larger bounds find addresses further from default wallet usage, at
/// one device round-trip per extra candidate.
#[derive(Debug, Clone, Copy)]
pub struct SearchBounds {
    pub accounts: u32,
    pub indexes: u32,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            accounts: ACCOUNT_LIMIT,
            indexes: INDEX_LIMIT,
        }
    }
}

impl SearchBounds {
    /// Total number of candidate paths (and device calls) a full
    /// search visits: accounts x indexes x 2 chains.
    pub fn candidate_count(&self) -> u64 {
        self.accounts as u64 * self.indexes as u64 * 2
    }
}

/// Search the device for the path that produces `target`.
///
/// Candidates are visited in a fixed order: account outer, address
/// index middle, chain inner (external before change). Each candidate
/// costs one `get_address` round-trip. Returns `Ok(None)` when the
/// bounded space is exhausted without a match; an address that is not
/// on this device is an expected outcome, not a fault.
pub fn resolve(
    target: &str,
    device: &mut dyn DeviceClient,
    bounds: SearchBounds,
) -> SignerResult<Option<ResolvedAddress>> {
    let policy = policy::policy_for_address(target)?;

    log_debug!(
        "resolver",
        "searching derivation space",
        address = target,
        accounts = bounds.accounts,
        indexes = bounds.indexes,
    );

    for account in 0..bounds.accounts {
        for index in 0..bounds.indexes {
            for chain in 0..2u32 {
                let path = DerivationPath::from_root(policy.path_root, account, chain, index);
                let candidate =
                    device.get_address(policy.network, &path, policy.input_script)?;

                if candidate == target {
                    log_info!(
                        "resolver",
                        "derivation path found",
                        address = target,
                        path = path,
                    );
                    return Ok(Some(ResolvedAddress {
                        address: candidate,
                        path,
                    }));
                }
            }
        }
    }

    Ok(None)
}
