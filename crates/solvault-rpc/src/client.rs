//! RPC client for ledger operations.
//!
//! HTTP client for making JSON-RPC calls to the ledger node.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use solvault_types::{Blockhash, Pubkey};

/// RPC client.
///
/// Explicitly constructed with its endpoint; pass it into the
/// components that need ledger access.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
}

/// RPC request.
#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

/// RPC response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RpcResponse<T> {
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// RPC error.
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i32,
    message: String,
}

/// Wrapper the ledger puts around context-carrying results.
#[derive(Debug, Deserialize)]
struct RpcValue<T> {
    value: T,
}

/// `getLatestBlockhash` result payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
    #[allow(dead_code)]
    last_valid_block_height: u64,
}

impl RpcClient {
    /// Create a new RPC client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Make an RPC call.
    pub async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> anyhow::Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        tracing::debug!("RPC call: {}", method);
        let response = self.client.post(&self.url).json(&request).send().await?;

        let rpc_response: RpcResponse<T> = response.json().await?;

        if let Some(error) = rpc_response.error {
            anyhow::bail!("RPC error {}: {}", error.code, error.message);
        }

        rpc_response
            .result
            .ok_or_else(|| anyhow::anyhow!("Empty result"))
    }

    // ============ Convenience Methods ============

    /// Get balance in lamports.
    pub async fn get_balance(&self, pubkey: &Pubkey) -> anyhow::Result<u64> {
        let result: RpcValue<u64> = self
            .call("getBalance", json!([pubkey.to_base58()]))
            .await?;
        Ok(result.value)
    }

    /// Get the latest blockhash for anchoring a new transaction.
    pub async fn get_latest_blockhash(&self) -> anyhow::Result<Blockhash> {
        let result: RpcValue<LatestBlockhash> = self
            .call(
                "getLatestBlockhash",
                json!([{"commitment": "finalized"}]),
            )
            .await?;
        result
            .value
            .blockhash
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid blockhash in response: {}", e))
    }

    /// Submit signed transaction wire bytes. Returns the transaction
    /// signature as reported by the node.
    pub async fn send_transaction(&self, signed_tx: &[u8]) -> anyhow::Result<String> {
        self.call(
            "sendTransaction",
            json!([BASE64.encode(signed_tx), {"encoding": "base64"}]),
        )
        .await
    }

    /// Estimate the fee for a serialized (unsigned) message. `None`
    /// means the node could not price it — callers typically fall back
    /// to the flat per-signature default.
    pub async fn get_fee_for_message(&self, message: &[u8]) -> anyhow::Result<Option<u64>> {
        let result: RpcValue<Option<u64>> = self
            .call(
                "getFeeForMessage",
                json!([BASE64.encode(message), {"commitment": "finalized"}]),
            )
            .await?;
        Ok(result.value)
    }

    /// Request a dev-cluster airdrop. Returns the faucet transaction
    /// signature.
    pub async fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> anyhow::Result<String> {
        self.call("requestAirdrop", json!([pubkey.to_base58(), lamports]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_envelope_with_result() {
        let json = r#"{"jsonrpc":"2.0","result":{"value":5000},"id":1}"#;
        let resp: RpcResponse<RpcValue<u64>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result.unwrap().value, 5000);
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_response_envelope_with_error() {
        let json = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"bad params"},"id":1}"#;
        let resp: RpcResponse<RpcValue<u64>> = serde_json::from_str(json).unwrap();
        assert!(resp.result.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32602);
        assert_eq!(err.message, "bad params");
    }

    #[test]
    fn test_latest_blockhash_payload_parses() {
        let json = r#"{"value":{"blockhash":"J7rBdM6AecPDEZp8aPq5iPSNKVkU5Q76F3oAV4eW5wsW","lastValidBlockHeight":3090}}"#;
        let value: RpcValue<LatestBlockhash> = serde_json::from_str(json).unwrap();
        let blockhash: Blockhash = value.value.blockhash.parse().unwrap();
        assert_eq!(
            blockhash.to_base58(),
            "J7rBdM6AecPDEZp8aPq5iPSNKVkU5Q76F3oAV4eW5wsW"
        );
    }

    #[test]
    fn test_fee_value_may_be_null() {
        let json = r#"{"value":null}"#;
        let value: RpcValue<Option<u64>> = serde_json::from_str(json).unwrap();
        assert_eq!(value.value, None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = RpcClient::new("http://127.0.0.1:9");
        let result = client.get_balance(&Pubkey::from_bytes([1u8; 32])).await;
        assert!(result.is_err());
    }
}
