//! Shared fixtures: a scripted in-memory transport and signer.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use papex_client::client::builder::{CallRequest, PreparedCall, SignedEnvelope};
use papex_client::types::{AccountState, NetworkContext};
use papex_client::{
    ClientConfig, ContractClient, Error, Papex, Result, RpcTransport, ScValue, SendResponse,
    Signer, SimulationResponse, TxStatus, WalletSession,
};

pub const WALLET: &str = "GWALLETAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const OTHER: &str = "GOTHERAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const TOKEN: &str = "CTOKENAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const REGISTRY: &str = "CREGISTRYAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const MARKETPLACE: &str = "CMARKETAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const HASH: &str = "3f1c9e0aa4b1d6f2c8e7b5a49d0c1e2f3a4b5c6d7e8f90a1b2c3d4e5f6a7b8c9";

// ============================================================================
// MockTransport
// ============================================================================

#[derive(Default)]
struct State {
    accounts: HashMap<String, AccountState>,
    views: HashMap<(String, String), SimulationResponse>,
    prepare_error: Option<String>,
    send_response: Option<SendResponse>,
    statuses: VecDeque<Result<TxStatus>>,

    account_lookups: Vec<String>,
    simulated: Vec<CallRequest>,
    prepared: Vec<CallRequest>,
    sent: Vec<SignedEnvelope>,
    status_polls: usize,
}

/// Scripted transport. Unscripted views fail simulation, unknown accounts
/// fail lookup, and polling reports "not found" once the status script is
/// exhausted.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn with_account(self, id: &str, sequence: i64) -> Self {
        self.with(|s| s.accounts.insert(id.to_string(), AccountState::new(id, sequence)));
        self
    }

    pub fn on_view(self, contract: &str, method: &str, value: ScValue) -> Self {
        self.script_view(contract, method, SimulationResponse::Success { return_value: Some(value) })
    }

    pub fn on_view_void(self, contract: &str, method: &str) -> Self {
        self.script_view(contract, method, SimulationResponse::Success { return_value: None })
    }

    pub fn on_view_error(self, contract: &str, method: &str, message: &str) -> Self {
        self.script_view(
            contract,
            method,
            SimulationResponse::Error { message: message.to_string() },
        )
    }

    fn script_view(self, contract: &str, method: &str, response: SimulationResponse) -> Self {
        self.with(|s| s.views.insert((contract.to_string(), method.to_string()), response));
        self
    }

    pub fn fail_prepare(self, message: &str) -> Self {
        self.with(|s| s.prepare_error = Some(message.to_string()));
        self
    }

    pub fn reject_send(self, reason: &str) -> Self {
        self.with(|s| s.send_response = Some(SendResponse::Rejected { reason: reason.to_string() }));
        self
    }

    /// Append lookup results, answered in order.
    pub fn statuses(self, statuses: Vec<TxStatus>) -> Self {
        self.with(|s| s.statuses.extend(statuses.into_iter().map(Ok)));
        self
    }

    /// Append a failed status lookup.
    pub fn status_error(self, message: &str) -> Self {
        self.with(|s| s.statuses.push_back(Err(Error::Transport(message.to_string()))));
        self
    }

    pub fn account_lookups(&self) -> Vec<String> {
        self.with(|s| s.account_lookups.clone())
    }

    pub fn simulated(&self) -> Vec<CallRequest> {
        self.with(|s| s.simulated.clone())
    }

    pub fn simulated_methods(&self) -> Vec<String> {
        self.with(|s| s.simulated.iter().map(|c| c.method.clone()).collect())
    }

    pub fn prepared(&self) -> Vec<CallRequest> {
        self.with(|s| s.prepared.clone())
    }

    pub fn sent(&self) -> Vec<SignedEnvelope> {
        self.with(|s| s.sent.clone())
    }

    pub fn status_polls(&self) -> usize {
        self.with(|s| s.status_polls)
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn get_account(&self, account_id: &str) -> Result<AccountState> {
        self.with(|s| {
            s.account_lookups.push(account_id.to_string());
            s.accounts
                .get(account_id)
                .cloned()
                .ok_or_else(|| Error::Transport(format!("Account not found: {}", account_id)))
        })
    }

    async fn simulate(&self, call: &CallRequest) -> Result<SimulationResponse> {
        self.with(|s| {
            s.simulated.push(call.clone());
            let key = (call.contract_id.clone(), call.method.clone());
            Ok(s.views.get(&key).cloned().unwrap_or_else(|| SimulationResponse::Error {
                message: format!("no simulation scripted for {}", call.method),
            }))
        })
    }

    async fn prepare(&self, call: &CallRequest) -> Result<PreparedCall> {
        let error = self.with(|s| {
            s.prepared.push(call.clone());
            s.prepare_error.clone()
        });
        match error {
            Some(message) => Err(Error::Simulation(message)),
            None => PreparedCall::from_call(call, 1_000),
        }
    }

    async fn send(&self, envelope: &SignedEnvelope) -> Result<SendResponse> {
        self.with(|s| {
            s.sent.push(envelope.clone());
            Ok(s.send_response
                .clone()
                .unwrap_or_else(|| SendResponse::Accepted { hash: HASH.to_string() }))
        })
    }

    async fn get_transaction_status(&self, _hash: &str) -> Result<TxStatus> {
        self.with(|s| {
            s.status_polls += 1;
            s.statuses.pop_front().unwrap_or(Ok(TxStatus::NotFound))
        })
    }
}

// ============================================================================
// MockSigner
// ============================================================================

/// Signer that approves (prefixing the envelope) or declines everything.
pub struct MockSigner {
    decline: Option<String>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockSigner {
    pub fn approving() -> Self {
        Self { decline: None, requests: Mutex::new(Vec::new()) }
    }

    pub fn declining(reason: &str) -> Self {
        Self { decline: Some(reason.to_string()), requests: Mutex::new(Vec::new()) }
    }

    /// `(envelope, network passphrase)` of every signing request
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Signer for MockSigner {
    async fn sign(&self, unsigned_envelope: &str, network: &NetworkContext) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((unsigned_envelope.to_string(), network.passphrase.clone()));
        match &self.decline {
            Some(reason) => Err(Error::Signing(reason.clone())),
            None => Ok(format!("signed:{}", unsigned_envelope)),
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn config() -> ClientConfig {
    ClientConfig {
        registry_contract_id: REGISTRY.to_string(),
        marketplace_contract_id: MARKETPLACE.to_string(),
        ..ClientConfig::default()
    }
}

pub fn client(transport: &MockTransport) -> ContractClient<MockTransport> {
    ContractClient::new(transport.clone(), config()).unwrap()
}

pub fn papex(transport: &MockTransport) -> Papex<MockTransport> {
    Papex::new(client(transport))
}

pub fn session() -> WalletSession {
    WalletSession::connected(WALLET).unwrap()
}
