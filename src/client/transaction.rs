//! Transaction Invoker.
//!
//! ## Phases
//!
//! ```text
//! BUILT -> PREPARED -> SIGNED -> SUBMITTED -> CONFIRMED
//!                         |           \----> FAILED
//!                         \----> SEND_REJECTED
//! ```
//!
//! - BUILT: assembled against the caller's live account state
//! - PREPARED: re-simulated by the transport, resource data attached
//! - SIGNED: the external [`Signer`] returned a signed envelope
//! - SUBMITTED: the network accepted the envelope and returned a hash
//!
//! A failure before SUBMITTED is returned as an error and nothing after it
//! runs: a rejected signature never reaches `send`. An on-chain failure is
//! not an error; it is the `Failed` status of the returned outcome.
//!
//! ## Polling
//!
//! After acceptance the status is polled at [`PollPolicy::interval`] until
//! it is terminal. With no deadline and no cancellation this polls
//! indefinitely. [`PollPolicy::deadline`] and [`Cancellation`] bound it.
//! Every error after acceptance carries the hash, since the transaction may
//! still land.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info, trace, warn};

use crate::client::builder::SignedEnvelope;
use crate::client::ContractClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::rpc::{RpcTransport, SendResponse, TxStatus};
use crate::types::identity::abbreviate;
use crate::types::{NetworkContext, ScArg, TransactionOutcome, TransactionPhase};

/// Default interval between status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

// ============================================================================
// Signer
// ============================================================================

/// External collaborator that holds key material.
///
/// The client never signs anything itself. It hands the unsigned envelope
/// and the network context to the signer and submits whatever comes back.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign `unsigned_envelope` for `network`.
    ///
    /// Return [`Error::Signing`] when the user declines or signing fails.
    async fn sign(&self, unsigned_envelope: &str, network: &NetworkContext) -> Result<String>;
}

// ============================================================================
// Polling controls
// ============================================================================

/// How confirmation polling is paced and bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between status lookups
    pub interval: Duration,
    /// Total time allowed for confirmation; `None` waits indefinitely
    pub deadline: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }
}

impl PollPolicy {
    /// Policy with the given interval and no deadline
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Give up after `deadline`
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Policy from client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            deadline: config.poll_deadline(),
        }
    }
}

/// Caller-owned trigger for a [`Cancellation`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel every wait observing the paired token
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Token observed by the poll loop; cheap to clone.
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

/// Create a linked cancel handle and token.
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, Cancellation { rx })
}

impl Cancellation {
    /// A token that is never cancelled
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // handle dropped without cancelling
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::never()
    }
}

/// Polling controls for one submission.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Pace and deadline
    pub poll: PollPolicy,
    /// Caller cancellation
    pub cancel: Cancellation,
}

impl SubmitOptions {
    /// Options with the given policy and no cancellation
    pub fn with_policy(poll: PollPolicy) -> Self {
        Self {
            poll,
            cancel: Cancellation::never(),
        }
    }

    /// Observe `cancel` while polling
    pub fn cancel_on(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }
}

// ============================================================================
// Invoker
// ============================================================================

impl<T: RpcTransport> ContractClient<T> {
    /// Sign, submit and confirm a call, polling as configured.
    ///
    /// See [`ContractClient::invoke_transaction_with`].
    pub async fn invoke_transaction(
        &self,
        identity: &str,
        signer: &dyn Signer,
        contract_id: &str,
        method: &str,
        args: Vec<ScArg>,
    ) -> Result<TransactionOutcome> {
        let options = SubmitOptions::with_policy(self.poll_policy());
        self.invoke_transaction_with(identity, signer, contract_id, method, args, &options)
            .await
    }

    /// Sign, submit and confirm a call.
    ///
    /// # Errors
    ///
    /// * [`Error::Transport`] - the invoking account could not be loaded, or
    ///   the transport failed
    /// * [`Error::Simulation`] - preparation failed; nothing was signed
    /// * [`Error::Signing`] - the signer declined; nothing was sent
    /// * [`Error::SendRejected`] - the network refused the envelope
    /// * [`Error::ConfirmationTimeout`] / [`Error::Cancelled`] - polling was
    ///   bounded by `options` and ended first
    /// * [`Error::ConfirmationLookup`] - a status lookup failed after
    ///   acceptance
    pub async fn invoke_transaction_with(
        &self,
        identity: &str,
        signer: &dyn Signer,
        contract_id: &str,
        method: &str,
        args: Vec<ScArg>,
        options: &SubmitOptions,
    ) -> Result<TransactionOutcome> {
        let account = self.resolve_live(identity).await?;
        let call = self.builder().build(&account, contract_id, method, args)?;
        let mut phase = PhaseLog::built(contract_id, method, &account.account_id);

        let prepared = self.transport().prepare(&call).await?;
        phase.advance(TransactionPhase::Prepared);

        let signed = signer
            .sign(&prepared.envelope, self.network())
            .await
            .map_err(into_signing_error)?;
        phase.advance(TransactionPhase::Signed);

        let hash = match self.transport().send(&SignedEnvelope::new(signed)).await? {
            SendResponse::Accepted { hash } => hash,
            SendResponse::Rejected { reason } => {
                phase.advance(TransactionPhase::SendRejected);
                return Err(Error::SendRejected(reason));
            }
        };
        phase.advance(TransactionPhase::Submitted);
        debug!(hash = %hash, "transaction accepted");

        let outcome = self.await_confirmation(&hash, options).await?;
        if outcome.is_success() {
            phase.advance(TransactionPhase::Confirmed);
            info!(hash = %hash, contract = %contract_id, method = %method, "transaction confirmed");
        } else {
            phase.advance(TransactionPhase::Failed);
            warn!(hash = %hash, contract = %contract_id, method = %method, "transaction failed on-chain");
        }
        Ok(outcome)
    }

    /// Poll an accepted transaction until its status is terminal.
    ///
    /// Only "not found" is retried. A failed lookup ends the wait with
    /// [`Error::ConfirmationLookup`], which keeps the hash.
    pub async fn await_confirmation(
        &self,
        hash: &str,
        options: &SubmitOptions,
    ) -> Result<TransactionOutcome> {
        let deadline = options.poll.deadline.map(|d| Instant::now() + d);
        let mut cancel = options.cancel.clone();
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(hash)),
                _ = expire(deadline) => return Err(timed_out(hash)),
                status = self.transport().get_transaction_status(hash) => status,
            };

            match status {
                Ok(TxStatus::Success(value)) => {
                    let value = value.filter(|v| !v.is_void());
                    return Ok(TransactionOutcome::confirmed(hash, value));
                }
                Ok(TxStatus::Failed) => return Ok(TransactionOutcome::failed(hash)),
                Ok(TxStatus::NotFound) => {
                    trace!(hash = %hash, attempt, "transaction not found yet");
                }
                Err(err) => {
                    warn!(hash = %hash, attempt, error = %err, "status lookup failed");
                    return Err(Error::ConfirmationLookup {
                        hash: hash.to_string(),
                        reason: err.to_string(),
                    });
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(hash)),
                _ = expire(deadline) => return Err(timed_out(hash)),
                _ = sleep(options.poll.interval) => {}
            }
        }
    }
}

/// Phase tracking for one submission, with a log line per transition.
struct PhaseLog<'a> {
    phase: TransactionPhase,
    contract_id: &'a str,
    method: &'a str,
}

impl<'a> PhaseLog<'a> {
    fn built(contract_id: &'a str, method: &'a str, account_id: &str) -> Self {
        debug!(
            phase = TransactionPhase::Built.as_str(),
            contract = %contract_id,
            method = %method,
            account = abbreviate(account_id),
            "transaction phase"
        );
        Self {
            phase: TransactionPhase::Built,
            contract_id,
            method,
        }
    }

    fn advance(&mut self, next: TransactionPhase) {
        debug_assert!(
            !self.phase.is_terminal() && self.phase.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(
            phase = next.as_str(),
            from = self.phase.as_str(),
            contract = %self.contract_id,
            method = %self.method,
            "transaction phase"
        );
        self.phase = next;
    }
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

fn cancelled(hash: &str) -> Error {
    Error::Cancelled {
        hash: hash.to_string(),
    }
}

fn timed_out(hash: &str) -> Error {
    Error::ConfirmationTimeout {
        hash: hash.to_string(),
    }
}

fn into_signing_error(err: Error) -> Error {
    match err {
        Error::Signing(msg) => Error::Signing(msg),
        other => Error::Signing(other.to_string()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
