use std::str::FromStr;

use anyhow::Context;
use bitcoin::Txid;
use clap::Parser;

use hwsigner::api::BlockCypherApi;
use hwsigner::{
    device, policy, tx, utils, RunOptions, SearchBounds, SignerError, SigningIntent,
    TransactionRequest,
};

/// Sign a message or a simple transaction with a hardware signing device
#[derive(Parser)]
#[command(name = "hwsigner", version)]
struct Cli {
    /// Address to sign from
    #[arg(short, long)]
    addr: String,

    /// Sign the given message
    #[arg(short, long)]
    msg: Option<String>,

    /// Sign a transaction. Amounts are in satoshis; the fee is the total fee.
    #[arg(
        short,
        long,
        num_args = 5,
        value_names = ["PREV_HASH", "PREV_INDEX", "DEST_ADDRESS", "AMOUNT", "FEE"]
    )]
    tx: Option<Vec<String>>,

    /// Allow signing from main-network addresses
    #[arg(long)]
    allow_mainnet: bool,

    /// Verbose debug logging on stderr
    #[arg(long)]
    debug: bool,
}

fn parse_tx_request(values: &[String]) -> anyhow::Result<TransactionRequest> {
    let prev_hash = Txid::from_str(&values[0])
        .with_context(|| format!("invalid previous transaction hash {}", values[0]))?;
    let prev_index: u32 = values[1]
        .parse()
        .with_context(|| format!("invalid previous output index {}", values[1]))?;
    let destination = values[2].clone();
    let amount: u64 = values[3]
        .parse()
        .with_context(|| format!("invalid send amount {}", values[3]))?;
    let fee: u64 = values[4]
        .parse()
        .with_context(|| format!("invalid fee {}", values[4]))?;

    Ok(TransactionRequest {
        prev_hash,
        prev_index,
        destination,
        amount,
        fee,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        utils::logging::enable_debug();
    }

    let transaction = cli.tx.as_deref().map(parse_tx_request).transpose()?;
    let intent = SigningIntent {
        address: cli.addr,
        message: cli.msg,
        transaction,
    };

    if intent.is_empty() {
        return Err(SignerError::nothing_to_sign(
            "nothing to sign: provide --msg and/or --tx",
        )
        .into());
    }

    let network = policy::policy_for_address(&intent.address)?.network;
    let chain_data = BlockCypherApi::for_network(network)?;

    let mut device = device::enumerate().into_iter().next().ok_or_else(|| {
        SignerError::device_unavailable("no signing device found; connect a device and retry")
    })?;

    let options = RunOptions {
        allow_mainnet: cli.allow_mainnet,
        bounds: SearchBounds::default(),
    };
    let outcome = tx::run(&intent, device.as_mut(), &chain_data, options)?;

    if let Some(signed) = &outcome.message {
        println!("Signature: {}", signed.signature);
    }
    if let Some(signed) = &outcome.transaction {
        println!("Signed transaction: {}", signed.raw_tx);
    }

    Ok(())
}
