//! Chain-data providers
//!
//! BlockCypher-backed implementation of the [`ChainData`] capability.

use std::time::Duration;

use bitcoin::Txid;

use crate::api::{ChainData, PrevOutput};
use crate::error::{SignerError, SignerResult};
use crate::types::Network;

/// BlockCypher REST client
pub struct BlockCypherApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl BlockCypherApi {
    /// Client for the given network's public BlockCypher endpoint
    pub fn for_network(network: Network) -> SignerResult<Self> {
        let base_url = match network {
            Network::Main => "https://api.blockcypher.com/v1/btc/main",
            Network::Test => "https://api.blockcypher.com/v1/btc/test3",
        };
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> SignerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                SignerError::network_error(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[derive(serde::Deserialize)]
struct TxResponse {
    outputs: Vec<TxOutputResponse>,
}

#[derive(serde::Deserialize)]
struct TxOutputResponse {
    value: u64,
    script_type: String,
}

impl ChainData for BlockCypherApi {
    fn get_output(&self, prev_hash: &Txid, index: u32) -> SignerResult<PrevOutput> {
        let url = format!("{}/txs/{}", self.base_url, prev_hash);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(SignerError::network_error(format!(
                "chain-data lookup for {} returned HTTP {}",
                prev_hash,
                response.status()
            )));
        }

        let tx: TxResponse = response.json().map_err(|e| {
            SignerError::parse_error(format!(
                "malformed chain-data response for {}: {}",
                prev_hash, e
            ))
        })?;

        let output = tx.outputs.get(index as usize).ok_or_else(|| {
            SignerError::invalid_input(format!(
                "transaction {} has no output at index {} ({} outputs)",
                prev_hash,
                index,
                tx.outputs.len()
            ))
        })?;

        Ok(PrevOutput {
            value: output.value,
            script_type: output.script_type.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls_per_network() {
        let main = BlockCypherApi::for_network(Network::Main).unwrap();
        assert!(main.base_url.ends_with("/btc/main"));

        let test = BlockCypherApi::for_network(Network::Test).unwrap();
        assert!(test.base_url.ends_with("/btc/test3"));
    }

    #[test]
    fn test_output_metadata_deserializes() {
        let body = r#"{
            "outputs": [
                {"value": 100000, "script_type": "pay-to-pubkey-hash"},
                {"value": 49000, "script_type": "pay-to-script-hash"}
            ]
        }"#;
        let tx: TxResponse = serde_json::from_str(body).unwrap();
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs[1].value, 49000);
        assert_eq!(tx.outputs[1].script_type, "pay-to-script-hash");
    }
}
