//! End-to-end signing flows against deterministic fakes

mod common;

use common::{test_txid, FakeChainData, FakeDevice};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use hwsigner::{
    policy, resolve, run, tx, ErrorCode, InputScriptKind, Network, OutputScriptKind, RunOptions,
    SearchBounds, SigningIntent, TransactionRequest,
};

const BOUNDS: SearchBounds = SearchBounds {
    accounts: 2,
    indexes: 5,
};

fn options() -> RunOptions {
    RunOptions {
        allow_mainnet: false,
        bounds: BOUNDS,
    }
}

// =============================================================================
// Resolver
// =============================================================================

#[test]
fn resolver_finds_the_path_behind_an_address() {
    let mut device = FakeDevice::new();
    let target = FakeDevice::address_at(Network::Test, InputScriptKind::SpendP2shWitness, 1, 0, 3);

    let resolved = resolve(&target, &mut device, BOUNDS).unwrap().unwrap();

    assert_eq!(resolved.address, target);
    assert_eq!(resolved.path.account(), 1);
    assert_eq!(resolved.path.chain(), 0);
    assert_eq!(resolved.path.address_index(), 3);
    assert_eq!(resolved.path.to_string(), "m/49'/1'/1'/0/3");

    // fixed visiting order: account outer, index middle, chain inner.
    // (1, 0, 3) is the 17th candidate.
    assert_eq!(device.get_address_calls, 17);
    assert!(u64::from(device.get_address_calls) <= BOUNDS.candidate_count());
}

#[test]
fn resolver_finds_change_chain_addresses_too() {
    let mut device = FakeDevice::new();
    let target = FakeDevice::address_at(Network::Test, InputScriptKind::SpendAddress, 0, 1, 0);

    let resolved = resolve(&target, &mut device, BOUNDS).unwrap().unwrap();
    assert_eq!(resolved.path.chain(), 1);
}

#[test]
fn resolver_exhausts_the_whole_space_before_giving_up() {
    let mut device = FakeDevice::new();

    let resolved = resolve("mNotOnThisDevice", &mut device, BOUNDS).unwrap();

    assert!(resolved.is_none());
    // never fewer, never more than accounts * indexes * 2 calls
    assert_eq!(u64::from(device.get_address_calls), BOUNDS.candidate_count());
}

#[test]
fn resolver_rejects_unknown_prefixes_without_touching_the_device() {
    let mut device = FakeDevice::new();

    let err = resolve("9unrecognized", &mut device, BOUNDS).unwrap_err();

    assert_eq!(err.code, ErrorCode::UnsupportedAddressFormat);
    assert_eq!(device.get_address_calls, 0);
}

// =============================================================================
// Orchestrated transaction signing
// =============================================================================

fn source_address() -> String {
    FakeDevice::address_at(Network::Test, InputScriptKind::SpendP2shWitness, 1, 0, 3)
}

fn tx_intent(amount: u64, fee: u64) -> SigningIntent {
    SigningIntent {
        address: source_address(),
        message: None,
        transaction: Some(TransactionRequest {
            prev_hash: test_txid(),
            prev_index: 0,
            destination: "mdestinationaddress".to_string(),
            amount,
            fee,
        }),
    }
}

#[test]
fn transaction_with_change_pays_first_and_returns_the_rest() {
    let mut device = FakeDevice::new();
    let chain_data =
        FakeChainData::new().with_output(test_txid(), 0, 100_000, "pay-to-script-hash");

    let outcome = run(&tx_intent(50_000, 1_000), &mut device, &chain_data, options()).unwrap();

    let signed = outcome.transaction.unwrap();
    let payload = String::from_utf8(hex::decode(&signed.raw_tx).unwrap()).unwrap();

    // payment output first, change output second, change at chain 1 of the
    // same account/index
    let change_address =
        FakeDevice::address_at(Network::Test, InputScriptKind::SpendP2shWitness, 1, 1, 3);
    assert_eq!(
        payload,
        format!("mdestinationaddress=50000&{}=49000", change_address)
    );

    assert_eq!(device.sign_tx_calls, 1);
    // amount lookup + script classification are separate read-only calls
    assert_eq!(chain_data.calls.get(), 2);
    assert!(device.closed);
}

#[test]
fn exact_spend_produces_a_single_output() {
    let mut device = FakeDevice::new();
    let chain_data =
        FakeChainData::new().with_output(test_txid(), 0, 51_000, "pay-to-script-hash");

    let outcome = run(&tx_intent(50_000, 1_000), &mut device, &chain_data, options()).unwrap();

    let signed = outcome.transaction.unwrap();
    let payload = String::from_utf8(hex::decode(&signed.raw_tx).unwrap()).unwrap();
    assert_eq!(payload, "mdestinationaddress=50000");
}

#[test]
fn insufficient_funds_stops_before_signing() {
    let mut device = FakeDevice::new();
    let chain_data =
        FakeChainData::new().with_output(test_txid(), 0, 50_000, "pay-to-script-hash");

    let err = run(&tx_intent(49_500, 1_000), &mut device, &chain_data, options()).unwrap_err();

    assert_eq!(err.code, ErrorCode::InsufficientFunds);
    assert_eq!(device.sign_tx_calls, 0);
}

#[test]
fn unsupported_previous_script_is_a_hard_failure() {
    let mut device = FakeDevice::new();
    let chain_data = FakeChainData::new().with_output(test_txid(), 0, 100_000, "null-data");

    let err = run(&tx_intent(50_000, 1_000), &mut device, &chain_data, options()).unwrap_err();

    assert_eq!(err.code, ErrorCode::UnsupportedScriptKind);
    assert_eq!(device.sign_tx_calls, 0);
}

#[test]
fn legacy_previous_output_spends_as_a_legacy_input() {
    assert_eq!(
        tx::classify_script_type("pay-to-pubkey-hash").unwrap(),
        InputScriptKind::SpendAddress
    );
    assert_eq!(
        tx::classify_script_type("pay-to-script-hash").unwrap(),
        InputScriptKind::SpendP2shWitness
    );
}

// =============================================================================
// Orchestrated message signing
// =============================================================================

#[test]
fn message_signature_comes_back_base64_encoded() {
    let mut device = FakeDevice::new();
    let chain_data = FakeChainData::new();
    let intent = SigningIntent {
        address: source_address(),
        message: Some("hello device".to_string()),
        transaction: None,
    };

    let outcome = run(&intent, &mut device, &chain_data, options()).unwrap();

    let signed = outcome.message.unwrap();
    assert_eq!(signed.address, source_address());

    let decoded = BASE64.decode(&signed.signature).unwrap();
    let decoded = String::from_utf8(decoded).unwrap();
    assert_eq!(decoded, "sig:m/49'/1'/1'/0/3:hello device");

    assert_eq!(device.sign_message_calls, 1);
    assert_eq!(chain_data.calls.get(), 0);
}

#[test]
fn message_rejection_fails_fast_and_skips_the_transaction() {
    let mut device = FakeDevice {
        reject_messages: true,
        ..FakeDevice::new()
    };
    let chain_data =
        FakeChainData::new().with_output(test_txid(), 0, 100_000, "pay-to-script-hash");
    let intent = SigningIntent {
        message: Some("hello device".to_string()),
        ..tx_intent(50_000, 1_000)
    };

    let err = run(&intent, &mut device, &chain_data, options()).unwrap_err();

    assert_eq!(err.code, ErrorCode::DeviceRejected);
    // fail-fast: the transaction half is never attempted
    assert_eq!(device.sign_tx_calls, 0);
    assert_eq!(chain_data.calls.get(), 0);
}

#[test]
fn message_and_transaction_sign_in_one_run() {
    let mut device = FakeDevice::new();
    let chain_data =
        FakeChainData::new().with_output(test_txid(), 0, 100_000, "pay-to-script-hash");
    let intent = SigningIntent {
        message: Some("proof of control".to_string()),
        ..tx_intent(50_000, 1_000)
    };

    let outcome = run(&intent, &mut device, &chain_data, options()).unwrap();

    assert!(outcome.message.is_some());
    assert!(outcome.transaction.is_some());
    assert_eq!(device.sign_message_calls, 1);
    assert_eq!(device.sign_tx_calls, 1);
}

// =============================================================================
// Intent validation and network gating
// =============================================================================

#[test]
fn empty_intent_never_reaches_the_device() {
    let mut device = FakeDevice::new();
    let chain_data = FakeChainData::new();
    let intent = SigningIntent {
        address: source_address(),
        message: None,
        transaction: None,
    };

    let err = run(&intent, &mut device, &chain_data, options()).unwrap_err();

    assert_eq!(err.code, ErrorCode::NothingToSign);
    assert_eq!(device.get_address_calls, 0);
}

#[test]
fn mainnet_addresses_are_refused_before_the_search_begins() {
    let mut device = FakeDevice::new();
    let chain_data = FakeChainData::new();
    let intent = SigningIntent {
        address: FakeDevice::address_at(Network::Main, InputScriptKind::SpendAddress, 0, 0, 0),
        message: Some("hello".to_string()),
        transaction: None,
    };

    let err = run(&intent, &mut device, &chain_data, options()).unwrap_err();

    assert_eq!(err.code, ErrorCode::MainnetDisabled);
    assert_eq!(device.get_address_calls, 0);

    // the same run succeeds once mainnet signing is enabled
    let opts = RunOptions {
        allow_mainnet: true,
        bounds: BOUNDS,
    };
    let outcome = run(&intent, &mut device, &chain_data, opts).unwrap();
    assert!(outcome.message.is_some());
}

#[test]
fn unresolvable_address_reports_not_on_device() {
    let mut device = FakeDevice::new();
    let chain_data = FakeChainData::new();
    let intent = SigningIntent {
        address: "mNotOnThisDevice".to_string(),
        message: Some("hello".to_string()),
        transaction: None,
    };

    let err = run(&intent, &mut device, &chain_data, options()).unwrap_err();

    assert_eq!(err.code, ErrorCode::AddressNotOnDevice);
    assert!(err.message.contains("mNotOnThisDevice"));
    assert_eq!(device.sign_message_calls, 0);
}

// =============================================================================
// Policy table
// =============================================================================

#[test]
fn every_policy_pairs_script_kinds_with_its_path_purpose() {
    for p in policy::POLICIES {
        let wrapped = p.input_script == InputScriptKind::SpendP2shWitness;
        assert_eq!(
            wrapped,
            p.output_script == OutputScriptKind::PayToP2shWitness,
            "policy '{}' mixes script families",
            p.prefix
        );
    }
}
