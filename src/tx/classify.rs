//! UTXO script classification
//!
//! Maps the chain-data service's reported script category of a previous
//! output onto the device's input-script-kind enumeration.

use crate::api::ChainData;
use crate::error::{SignerError, SignerResult};
use crate::log_debug;
use crate::types::{InputScriptKind, UtxoReference};

/// Script category names as the chain-data provider reports them
pub mod script_categories {
    pub const PAY_TO_PUBKEY_HASH: &str = "pay-to-pubkey-hash";
    pub const PAY_TO_SCRIPT_HASH: &str = "pay-to-script-hash";
}

/// Map a reported script category to an input script kind.
///
/// A pay-to-script-hash output is treated as a wrapped-segwit spend.
/// The chain data cannot tell a wrapped-segwit script from any other
/// P2SH script, and the device has no plain-P2SH input kind, so a
/// legacy P2SH output is misclassified here rather than rejected.
pub fn classify_script_type(raw: &str) -> SignerResult<InputScriptKind> {
    match raw {
        script_categories::PAY_TO_PUBKEY_HASH => Ok(InputScriptKind::SpendAddress),
        script_categories::PAY_TO_SCRIPT_HASH => Ok(InputScriptKind::SpendP2shWitness),
        other => Err(SignerError::unsupported_script_kind(format!(
            "script type \"{}\" has no device input kind",
            other
        ))),
    }
}

/// Fetch a previous output's metadata and classify its script kind
pub fn classify(
    reference: &UtxoReference,
    chain_data: &dyn ChainData,
) -> SignerResult<InputScriptKind> {
    let output = chain_data.get_output(&reference.prev_hash, reference.output_index)?;

    log_debug!(
        "classify",
        "previous output fetched",
        utxo = reference,
        script_type = output.script_type,
    );

    classify_script_type(&output.script_type).map_err(|e| {
        e.with_details(format!("previous output {}", reference))
    })
}
