//! JSON-RPC 2.0 transport over HTTP.
//!
//! ## Methods
//!
//! | Call | Params | Result |
//! |---|---|---|
//! | `getAccount` | `{account}` | `{id, sequence}` |
//! | `simulateTransaction` | `{transaction}` | `{results: [{retval}]}` or `{error}` |
//! | `prepareTransaction` | `{transaction}` | `{transaction, minResourceFee}` or `{error}` |
//! | `sendTransaction` | `{transaction}` | `{status, hash, errorResult}` |
//! | `getTransaction` | `{hash}` | `{status, returnValue}` |
//!
//! `transaction` is always an envelope as produced by the call builder or
//! the signer. Values are tagged JSON ([`ScValue`]); 64- and 128-bit
//! integers may arrive as strings or numbers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::trace;

use crate::client::builder::{CallRequest, PreparedCall, SignedEnvelope};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::rpc::{RpcTransport, SendResponse, SimulationResponse, TxStatus};
use crate::types::{AccountState, ScValue};

/// Production transport backed by `reqwest`.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Create a transport for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Create a transport from client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.rpc_url.clone(), config.request_timeout())
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(method, id, "rpc request");

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!("{} returned HTTP {}: {}", method, status, text)));
        }

        let envelope: RpcEnvelope<R> = response.json().await?;
        if let Some(err) = envelope.error {
            return Err(Error::Transport(format!("{} failed ({}): {}", method, err.code, err.message)));
        }
        envelope
            .result
            .ok_or_else(|| Error::Transport(format!("{} returned neither result nor error", method)))
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn get_account(&self, account_id: &str) -> Result<AccountState> {
        let wire: AccountWire = self.call("getAccount", json!({ "account": account_id })).await?;
        let sequence = wire.sequence.parse_i64("sequence")?;
        Ok(AccountState::new(wire.id, sequence))
    }

    async fn simulate(&self, call: &CallRequest) -> Result<SimulationResponse> {
        let wire: SimulateWire = self
            .call("simulateTransaction", json!({ "transaction": call.envelope()? }))
            .await?;
        if let Some(message) = wire.error {
            return Ok(SimulationResponse::Error { message });
        }
        let return_value = wire.results.into_iter().next().and_then(|entry| entry.retval);
        Ok(SimulationResponse::Success { return_value })
    }

    async fn prepare(&self, call: &CallRequest) -> Result<PreparedCall> {
        let wire: PrepareWire = self
            .call("prepareTransaction", json!({ "transaction": call.envelope()? }))
            .await?;
        if let Some(message) = wire.error {
            return Err(Error::Simulation(message));
        }
        let envelope = wire
            .transaction
            .ok_or_else(|| Error::Transport("prepareTransaction returned no transaction".into()))?;
        let resource_fee = match wire.min_resource_fee {
            Some(fee) => u64::try_from(fee.parse_i64("minResourceFee")?)
                .map_err(|_| Error::Transport("minResourceFee is negative".into()))?,
            None => 0,
        };
        Ok(PreparedCall {
            envelope,
            resource_fee,
        })
    }

    async fn send(&self, envelope: &SignedEnvelope) -> Result<SendResponse> {
        let wire: SendWire = self
            .call("sendTransaction", json!({ "transaction": envelope.envelope }))
            .await?;
        match wire.status.as_str() {
            "PENDING" | "DUPLICATE" => match wire.hash {
                Some(hash) if !hash.is_empty() => Ok(SendResponse::Accepted { hash }),
                _ => Err(Error::Transport(format!(
                    "sendTransaction returned {} without a hash",
                    wire.status
                ))),
            },
            "ERROR" | "TRY_AGAIN_LATER" => Ok(SendResponse::Rejected {
                reason: wire.error_result.unwrap_or_else(|| wire.status.clone()),
            }),
            other => Err(Error::Transport(format!("unknown send status {:?}", other))),
        }
    }

    async fn get_transaction_status(&self, hash: &str) -> Result<TxStatus> {
        let wire: TransactionWire = self.call("getTransaction", json!({ "hash": hash })).await?;
        match wire.status.as_str() {
            "NOT_FOUND" => Ok(TxStatus::NotFound),
            "SUCCESS" => Ok(TxStatus::Success(wire.return_value)),
            "FAILED" => Ok(TxStatus::Failed),
            other => Err(Error::Transport(format!("unknown transaction status {:?}", other))),
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Deserialize)]
struct RpcEnvelope<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Integer that may be sent as a JSON number or a decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireInt {
    Number(i64),
    Text(String),
}

impl WireInt {
    fn parse_i64(&self, field: &str) -> Result<i64> {
        match self {
            WireInt::Number(n) => Ok(*n),
            WireInt::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::Transport(format!("{} is not an integer: {:?}", field, s))),
        }
    }
}

#[derive(Deserialize)]
struct AccountWire {
    id: String,
    sequence: WireInt,
}

#[derive(Deserialize)]
struct SimulateWire {
    error: Option<String>,
    #[serde(default)]
    results: Vec<SimulateEntry>,
}

#[derive(Deserialize)]
struct SimulateEntry {
    retval: Option<ScValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrepareWire {
    error: Option<String>,
    transaction: Option<String>,
    min_resource_fee: Option<WireInt>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendWire {
    status: String,
    hash: Option<String>,
    error_result: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire {
    status: String,
    return_value: Option<ScValue>,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_int_accepts_both_forms() {
        let n: WireInt = serde_json::from_str("42").unwrap();
        let s: WireInt = serde_json::from_str("\"123456789012\"").unwrap();
        assert_eq!(n.parse_i64("sequence").unwrap(), 42);
        assert_eq!(s.parse_i64("sequence").unwrap(), 123_456_789_012);

        let bad: WireInt = serde_json::from_str("\"twelve\"").unwrap();
        assert!(matches!(bad.parse_i64("sequence"), Err(Error::Transport(_))));
    }

    #[test]
    fn test_envelope_with_error_object() {
        let raw = r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32602,"message":"invalid params"}}"#;
        let envelope: RpcEnvelope<TransactionWire> = serde_json::from_str(raw).unwrap();
        assert!(envelope.result.is_none());
        let err = envelope.error.unwrap();
        assert_eq!(err.code, -32602);
        assert_eq!(err.message, "invalid params");
    }

    #[test]
    fn test_simulate_wire_empty_results() {
        let wire: SimulateWire = serde_json::from_str("{}").unwrap();
        assert!(wire.error.is_none());
        assert!(wire.results.is_empty());
    }

    #[test]
    fn test_new_transport_ids_start_at_one() {
        let transport = HttpTransport::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.url(), "http://localhost:8000");
        assert_eq!(transport.next_id.load(Ordering::Relaxed), 1);
    }
}
