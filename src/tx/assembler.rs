//! Transaction assembly
//!
//! Builds the single input descriptor and the one-or-two output
//! descriptors (payment, optional change) from a resolved source
//! address, the UTXO being spent, and the caller's amounts. Balance is
//! validated before anything is built and before any signing call.

use crate::device::DeviceClient;
use crate::error::{SignerError, SignerResult};
use crate::log_info;
use crate::policy;
use crate::types::{
    AssembledTransaction, Network, ResolvedAddress, TxInputDescriptor, TxOutputDescriptor,
    UtxoInfo,
};

/// Internal/change chain selector of a BIP-44/49 path
const CHANGE_CHAIN: u32 = 1;

/// Assemble a single-input transaction.
///
/// Output ordering is part of the contract: the payment output is at
/// index 0, the change output (when change is strictly positive) at
/// index 1. Deriving the change address costs one extra device
/// round-trip; a zero-change transaction makes none.
pub fn assemble(
    resolved: &ResolvedAddress,
    utxo: &UtxoInfo,
    destination: &str,
    send_amount: u64,
    fee: u64,
    device: &mut dyn DeviceClient,
    network: Network,
) -> SignerResult<AssembledTransaction> {
    let required = send_amount.checked_add(fee).ok_or_else(|| {
        SignerError::invalid_input(format!(
            "send amount {} plus fee {} overflows",
            send_amount, fee
        ))
    })?;

    if required > utxo.amount {
        return Err(SignerError::insufficient_funds(format!(
            "UTXO amount of {} sats is too small for sending {} sats with {} sats fee",
            utxo.amount, send_amount, fee
        )));
    }

    let input = TxInputDescriptor {
        path: resolved.path.clone(),
        prev_hash: utxo.reference.prev_hash,
        prev_index: utxo.reference.output_index,
        script_kind: utxo.script_kind,
        amount: utxo.amount,
    };

    // The payment output's script kind follows the destination's own
    // prefix, independent of the source address type.
    let destination_policy = policy::policy_for_address(destination)?;
    let mut outputs = vec![TxOutputDescriptor {
        amount: send_amount,
        script_kind: destination_policy.output_script,
        address: destination.to_string(),
    }];

    let change = utxo.amount - send_amount - fee;
    if change > 0 {
        let change_path = resolved.path.with_chain(CHANGE_CHAIN);
        let source_policy = policy::policy_for_address(&resolved.address)?;
        let change_address =
            device.get_address(network, &change_path, source_policy.input_script)?;
        let change_policy = policy::policy_for_address(&change_address)?;

        log_info!(
            "assembler",
            "routing change to the internal chain",
            change_sats = change,
            change_address = change_address,
            path = change_path,
        );

        outputs.push(TxOutputDescriptor {
            amount: change,
            script_kind: change_policy.output_script,
            address: change_address,
        });
    }

    Ok(AssembledTransaction { input, outputs })
}
