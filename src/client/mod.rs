//! Contract interaction client
//!
//! ## Components
//!
//! - [`account`]: Account Resolver (live state, synthetic fallback for views)
//! - [`builder`]: Call Builder and envelope encoding
//! - [`view`]: View Invoker (simulation only)
//! - [`transaction`]: Transaction Invoker (prepare, sign, submit, poll)
//!
//! ## Concurrency
//!
//! A [`ContractClient`] holds no mutable state. Every call builds its own
//! request and outcome, so any number of view and transaction calls may be
//! in flight at once on the same client.

pub mod account;
pub mod builder;
pub mod transaction;
pub mod view;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::rpc::RpcTransport;
use crate::types::NetworkContext;

pub use builder::{CallBuilder, CallRequest, PreparedCall, SignedEnvelope};
pub use transaction::{
    cancellation, CancelHandle, Cancellation, PollPolicy, Signer, SubmitOptions,
};

/// Entry point to the four invocation components.
#[derive(Debug)]
pub struct ContractClient<T: RpcTransport> {
    transport: Arc<T>,
    config: ClientConfig,
    builder: CallBuilder,
    network: NetworkContext,
}

impl<T: RpcTransport> Clone for ContractClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
            builder: self.builder.clone(),
            network: self.network.clone(),
        }
    }
}

impl<T: RpcTransport> ContractClient<T> {
    /// Create a client; the configuration is validated first.
    pub fn new(transport: T, config: ClientConfig) -> Result<Self> {
        Self::with_shared_transport(Arc::new(transport), config)
    }

    /// Create a client over a transport shared with other clients.
    pub fn with_shared_transport(transport: Arc<T>, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            builder: CallBuilder::from_config(&config),
            network: config.network(),
            transport,
            config,
        })
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Decimal places of scaled amounts
    pub fn decimals(&self) -> u32 {
        self.config.decimals
    }

    /// Network the client is bound to
    pub fn network(&self) -> &NetworkContext {
        &self.network
    }

    /// Call builder for this client's network
    pub fn builder(&self) -> &CallBuilder {
        &self.builder
    }

    /// Poll policy taken from configuration
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::from_config(&self.config)
    }
}
