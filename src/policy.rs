//! Address prefix policies
//!
//! Static mapping from an address's leading character to the network it
//! belongs to, the derivation-path root the device uses for it, and the
//! input/output script kinds it spends and pays with. The table is
//! compiled in and never mutated; an unrecognized prefix is a lookup
//! failure, not a default.

use crate::error::{SignerError, SignerResult};
use crate::types::{InputScriptKind, Network, OutputScriptKind};
use crate::wallet::derivation_path::{bip_purposes, coin_types, HARDENED};

/// Policy attached to one recognized address prefix
#[derive(Debug, Clone, Copy)]
pub struct AddressPrefixPolicy {
    pub prefix: char,
    pub network: Network,
    /// Hardened `purpose'/coin'` root the full path is built from
    pub path_root: &'static [u32],
    pub input_script: InputScriptKind,
    pub output_script: OutputScriptKind,
}

const BIP44_MAIN: &[u32] = &[
    bip_purposes::BIP44 | HARDENED,
    coin_types::BITCOIN | HARDENED,
];
const BIP44_TEST: &[u32] = &[
    bip_purposes::BIP44 | HARDENED,
    coin_types::BITCOIN_TESTNET | HARDENED,
];
const BIP49_MAIN: &[u32] = &[
    bip_purposes::BIP49 | HARDENED,
    coin_types::BITCOIN | HARDENED,
];
const BIP49_TEST: &[u32] = &[
    bip_purposes::BIP49 | HARDENED,
    coin_types::BITCOIN_TESTNET | HARDENED,
];

/// All recognized prefixes. Exactly one policy per prefix.
pub const POLICIES: &[AddressPrefixPolicy] = &[
    AddressPrefixPolicy {
        prefix: '1',
        network: Network::Main,
        path_root: BIP44_MAIN,
        input_script: InputScriptKind::SpendAddress,
        output_script: OutputScriptKind::PayToAddress,
    },
    AddressPrefixPolicy {
        prefix: '3',
        network: Network::Main,
        path_root: BIP49_MAIN,
        input_script: InputScriptKind::SpendP2shWitness,
        output_script: OutputScriptKind::PayToP2shWitness,
    },
    AddressPrefixPolicy {
        prefix: 'm',
        network: Network::Test,
        path_root: BIP44_TEST,
        input_script: InputScriptKind::SpendAddress,
        output_script: OutputScriptKind::PayToAddress,
    },
    AddressPrefixPolicy {
        prefix: 'n',
        network: Network::Test,
        path_root: BIP44_TEST,
        input_script: InputScriptKind::SpendAddress,
        output_script: OutputScriptKind::PayToAddress,
    },
    AddressPrefixPolicy {
        prefix: '2',
        network: Network::Test,
        path_root: BIP49_TEST,
        input_script: InputScriptKind::SpendP2shWitness,
        output_script: OutputScriptKind::PayToP2shWitness,
    },
];

/// Look up the policy for a prefix character
pub fn lookup(prefix: char) -> Option<&'static AddressPrefixPolicy> {
    POLICIES.iter().find(|policy| policy.prefix == prefix)
}

/// Look up the policy for an address, failing with the offending value
pub fn policy_for_address(address: &str) -> SignerResult<&'static AddressPrefixPolicy> {
    let prefix = address.chars().next().ok_or_else(|| {
        SignerError::unsupported_address_format("empty address")
    })?;

    lookup(prefix).ok_or_else(|| {
        SignerError::unsupported_address_format(format!(
            "address {} has unrecognized prefix '{}'",
            address, prefix
        ))
    })
}
