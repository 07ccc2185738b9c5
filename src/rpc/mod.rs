//! RPC transport boundary.
//!
//! The core never talks to the network directly. Every round-trip goes
//! through an [`RpcTransport`], which keeps the invokers testable against
//! an in-memory transport and lets the production [`HttpTransport`] be
//! swapped for anything that speaks the same five calls.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::builder::{CallRequest, PreparedCall, SignedEnvelope};
use crate::error::Result;
use crate::types::{AccountState, ScValue};

pub use http::HttpTransport;

// ============================================================================
// Responses
// ============================================================================

/// Result of simulating a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationResponse {
    /// Simulation ran; the contract may or may not have returned a value
    Success {
        /// Decoded return value
        return_value: Option<ScValue>,
    },
    /// Simulation was rejected
    Error {
        /// Transport diagnostic, verbatim
        message: String,
    },
}

/// Result of handing a signed envelope to the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendResponse {
    /// Accepted for inclusion; the outcome is not known yet
    Accepted {
        /// Submission hash
        hash: String,
    },
    /// Refused before acceptance
    Rejected {
        /// Network diagnostic
        reason: String,
    },
}

/// Status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    /// Not yet visible to the node; poll again
    NotFound,
    /// Executed successfully
    Success(Option<ScValue>),
    /// Executed and failed
    Failed,
}

// ============================================================================
// RpcTransport
// ============================================================================

/// The five network calls the client depends on.
///
/// Implementations report their own failures (connection, protocol,
/// decoding) as [`Error::Transport`](crate::error::Error::Transport).
/// A failed `prepare` is a simulation failure and must be reported as
/// [`Error::Simulation`](crate::error::Error::Simulation).
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Fetch live sequence state for an account.
    async fn get_account(&self, account_id: &str) -> Result<AccountState>;

    /// Simulate a call without submitting it.
    async fn simulate(&self, call: &CallRequest) -> Result<SimulationResponse>;

    /// Re-simulate a call and attach the resource data it needs to execute.
    async fn prepare(&self, call: &CallRequest) -> Result<PreparedCall>;

    /// Submit a signed envelope.
    async fn send(&self, envelope: &SignedEnvelope) -> Result<SendResponse>;

    /// Look up a submitted transaction.
    async fn get_transaction_status(&self, hash: &str) -> Result<TxStatus>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    async fn get_account(&self, account_id: &str) -> Result<AccountState> {
        (**self).get_account(account_id).await
    }

    async fn simulate(&self, call: &CallRequest) -> Result<SimulationResponse> {
        (**self).simulate(call).await
    }

    async fn prepare(&self, call: &CallRequest) -> Result<PreparedCall> {
        (**self).prepare(call).await
    }

    async fn send(&self, envelope: &SignedEnvelope) -> Result<SendResponse> {
        (**self).send(envelope).await
    }

    async fn get_transaction_status(&self, hash: &str) -> Result<TxStatus> {
        (**self).get_transaction_status(hash).await
    }
}
