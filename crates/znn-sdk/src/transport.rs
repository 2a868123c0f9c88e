//! Transport layer for RPC communication

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::SdkError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get JSON response
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError>;
}

/// Helper to deserialize response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// RPC method
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

/// Mock transport for testing
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    default_responses: Arc<Mutex<HashMap<String, Value>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        // Fresh account on a chain at momentum 1 with enough fused plasma
        defaults.insert("ledger.getFrontierAccountBlock".to_string(), Value::Null);
        defaults.insert(
            "ledger.getFrontierMomentum".to_string(),
            json!({
                "version": 1,
                "chainIdentifier": 1,
                "hash": "0".repeat(64),
                "previousHash": "0".repeat(64),
                "height": 1,
                "timestamp": 0,
                "data": "",
                "changesHash": "0".repeat(64),
                "publicKey": "",
                "signature": "",
                "producer": "z1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqsggv2f"
            }),
        );
        defaults.insert("ledger.getAccountBlockByHash".to_string(), Value::Null);
        defaults.insert("ledger.publishRawTransaction".to_string(), Value::Null);
        defaults.insert(
            "embedded.plasma.getRequiredPoWForAccountBlock".to_string(),
            json!({
                "availablePlasma": 21000,
                "basePlasma": 21000,
                "requiredDifficulty": 0
            }),
        );

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(Mutex::new(defaults)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a mock response for a specific method
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(method.to_string(), response);
    }

    /// Clear custom responses
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Requests received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Methods requested so far, oldest first
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method: method.to_string(),
                params,
            });

        // Check custom responses first
        let custom_response = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(method)
            .cloned();

        if let Some(response) = custom_response {
            return Ok(response);
        }

        // Fall back to defaults
        let default_response = self
            .default_responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(method)
            .cloned();

        if let Some(response) = default_response {
            return Ok(response);
        }

        Err(SdkError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Create a transport whose requests time out after `timeout`
    pub fn with_timeout(url: &str, timeout: std::time::Duration) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        })
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let id = self.next_id();
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(id, method, "rpc request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            tracing::debug!(id, method, code = error.code, "rpc error");
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        // `null` is a valid result (absent frontier, accepted publication)
        Ok(response.result)
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_default_responses() {
        let transport = MockTransport::new();

        let result = transport
            .request_json("ledger.getFrontierAccountBlock", vec![])
            .await
            .unwrap();
        assert_eq!(result, Value::Null);

        let result = transport
            .request_json("embedded.plasma.getRequiredPoWForAccountBlock", vec![])
            .await
            .unwrap();
        assert_eq!(result["basePlasma"], 21000);
    }

    #[tokio::test]
    async fn test_mock_transport_custom_response() {
        let transport = MockTransport::new();
        transport.set_response("ledger.publishRawTransaction", Value::String("rejected".into()));

        let result = transport
            .request_json("ledger.publishRawTransaction", vec![])
            .await
            .unwrap();
        assert_eq!(result, Value::String("rejected".to_string()));

        transport.clear_responses();
        let result = transport
            .request_json("ledger.publishRawTransaction", vec![])
            .await
            .unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn test_mock_transport_records_calls() {
        let transport = MockTransport::new();
        transport
            .request_json("ledger.getFrontierMomentum", vec![])
            .await
            .unwrap();
        transport
            .request_json("ledger.getAccountBlockByHash", vec![json!("ab")])
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].method, "ledger.getAccountBlockByHash");
        assert_eq!(calls[1].params, vec![json!("ab")]);
    }

    #[tokio::test]
    async fn test_mock_transport_unknown_method() {
        let transport = MockTransport::new();
        let result = transport.request_json("unknown_method", vec![]).await;
        assert!(matches!(result, Err(SdkError::Rpc { code: -32601, .. })));
    }
}
