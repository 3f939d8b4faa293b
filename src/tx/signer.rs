//! Signing orchestration
//!
//! Sequences one signing run: validate the intent, resolve the signing
//! address's derivation path, then hand the message and/or the
//! assembled transaction to the device. Failures are fail-fast: when
//! both a message and a transaction are requested, the message is
//! signed first and its failure aborts the run before the transaction
//! is attempted. Nothing is retried and nothing survives an aborted
//! run.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::api::ChainData;
use crate::device::DeviceClient;
use crate::error::{SignerError, SignerResult};
use crate::log_info;
use crate::policy;
use crate::tx::{assemble, classify};
use crate::types::{
    Network, SignedMessage, SigningIntent, SigningOutcome, UtxoInfo, UtxoReference,
};
use crate::wallet::{self, SearchBounds};

/// Options of one signing run
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Main-network signing is refused unless explicitly enabled.
    pub allow_mainnet: bool,
    pub bounds: SearchBounds,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            allow_mainnet: false,
            bounds: SearchBounds::default(),
        }
    }
}

/// Run one signing invocation against the device.
pub fn run(
    intent: &SigningIntent,
    device: &mut dyn DeviceClient,
    chain_data: &dyn ChainData,
    options: RunOptions,
) -> SignerResult<SigningOutcome> {
    if intent.is_empty() {
        return Err(SignerError::nothing_to_sign(
            "nothing to sign: provide a message and/or a transaction",
        ));
    }

    // Network gating happens before any device round-trip.
    let source_policy = policy::policy_for_address(&intent.address)?;
    let network = source_policy.network;
    if network == Network::Main && !options.allow_mainnet {
        return Err(SignerError::mainnet_disabled(format!(
            "address {} is a main-network address; re-run with mainnet signing enabled",
            intent.address
        )));
    }

    let resolved = wallet::resolve(&intent.address, device, options.bounds)?.ok_or_else(|| {
        SignerError::address_not_on_device(format!(
            "address {} was not found on the connected device within {} candidate paths",
            intent.address,
            options.bounds.candidate_count()
        ))
    })?;

    log_info!(
        "signer",
        "signing from resolved address",
        address = resolved.address,
        path = resolved.path,
    );

    let mut outcome = SigningOutcome::default();

    if let Some(message) = &intent.message {
        let signature =
            device.sign_message(network, &resolved.path, message, source_policy.input_script)?;
        outcome.message = Some(SignedMessage {
            address: resolved.address.clone(),
            signature: BASE64.encode(signature),
        });
    }

    if let Some(request) = &intent.transaction {
        let reference = UtxoReference {
            prev_hash: request.prev_hash,
            output_index: request.prev_index,
        };

        let script_kind = classify(&reference, chain_data)?;
        let prev_output = chain_data.get_output(&reference.prev_hash, reference.output_index)?;
        let utxo = UtxoInfo {
            reference,
            amount: prev_output.value,
            script_kind,
        };

        log_info!(
            "signer",
            "spending previous output",
            utxo = reference,
            amount_sats = utxo.amount,
            send_sats = request.amount,
            fee_sats = request.fee,
            destination = request.destination,
        );

        let assembled = assemble(
            &resolved,
            &utxo,
            &request.destination,
            request.amount,
            request.fee,
            device,
            network,
        )?;

        let signed = device.sign_tx(network, &assembled.input, &assembled.outputs)?;
        outcome.transaction = Some(signed);
    }

    device.close();
    Ok(outcome)
}
