//! Test doubles for the device and chain-data capabilities
//!
//! The fakes are deterministic so resolver and assembler behavior can
//! be asserted exactly, including how many device round-trips a run
//! makes.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use bitcoin::Txid;

use hwsigner::api::{ChainData, PrevOutput};
use hwsigner::device::{DeviceClient, DeviceError};
use hwsigner::{
    DerivationPath, InputScriptKind, Network, SignedTransaction, SignerError, SignerResult,
    TxInputDescriptor, TxOutputDescriptor,
};

/// A device whose address generation is a pure, collision-free mapping
/// from derivation path to address string, with the correct prefix for
/// the requested network and script kind.
#[derive(Default)]
pub struct FakeDevice {
    pub get_address_calls: u32,
    pub sign_message_calls: u32,
    pub sign_tx_calls: u32,
    pub closed: bool,
    /// Simulate the operator declining the message on the device
    pub reject_messages: bool,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// The address this device derives at the given coordinates.
    pub fn address_at(
        network: Network,
        script_kind: InputScriptKind,
        account: u32,
        chain: u32,
        index: u32,
    ) -> String {
        let prefix = match (network, script_kind) {
            (Network::Main, InputScriptKind::SpendAddress) => '1',
            (Network::Main, InputScriptKind::SpendP2shWitness) => '3',
            (Network::Test, InputScriptKind::SpendAddress) => 'm',
            (Network::Test, InputScriptKind::SpendP2shWitness) => '2',
        };
        format!("{}fake{}q{}q{}", prefix, account, chain, index)
    }
}

impl DeviceClient for FakeDevice {
    fn get_address(
        &mut self,
        network: Network,
        path: &DerivationPath,
        script_kind: InputScriptKind,
    ) -> Result<String, DeviceError> {
        self.get_address_calls += 1;
        Ok(Self::address_at(
            network,
            script_kind,
            path.account(),
            path.chain(),
            path.address_index(),
        ))
    }

    fn sign_message(
        &mut self,
        _network: Network,
        path: &DerivationPath,
        message: &str,
        _script_kind: InputScriptKind,
    ) -> Result<Vec<u8>, DeviceError> {
        self.sign_message_calls += 1;
        if self.reject_messages {
            return Err(DeviceError::Rejected("declined on device".to_string()));
        }
        Ok(format!("sig:{}:{}", path, message).into_bytes())
    }

    fn sign_tx(
        &mut self,
        _network: Network,
        input: &TxInputDescriptor,
        outputs: &[TxOutputDescriptor],
    ) -> Result<SignedTransaction, DeviceError> {
        self.sign_tx_calls += 1;
        let payload = outputs
            .iter()
            .map(|o| format!("{}={}", o.address, o.amount))
            .collect::<Vec<_>>()
            .join("&");
        Ok(SignedTransaction {
            signatures: vec![hex::encode(format!("sig:{}", input.path))],
            raw_tx: hex::encode(payload),
        })
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// In-memory chain data keyed by (previous hash, output index)
#[derive(Default)]
pub struct FakeChainData {
    outputs: HashMap<(Txid, u32), PrevOutput>,
    pub calls: Cell<u32>,
}

impl FakeChainData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, prev_hash: Txid, index: u32, value: u64, script_type: &str) -> Self {
        self.outputs.insert(
            (prev_hash, index),
            PrevOutput {
                value,
                script_type: script_type.to_string(),
            },
        );
        self
    }
}

impl ChainData for FakeChainData {
    fn get_output(&self, prev_hash: &Txid, index: u32) -> SignerResult<PrevOutput> {
        self.calls.set(self.calls.get() + 1);
        self.outputs
            .get(&(*prev_hash, index))
            .cloned()
            .ok_or_else(|| {
                SignerError::invalid_input(format!(
                    "transaction {} has no output at index {}",
                    prev_hash, index
                ))
            })
    }
}

/// A well-formed but arbitrary transaction id for tests
pub fn test_txid() -> Txid {
    use std::str::FromStr;
    Txid::from_str("4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b").unwrap()
}
