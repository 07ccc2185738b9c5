//! Papex application operations
//!
//! [`Papex`] turns marketplace intents into contract calls and normalized
//! records. It is what a UI layer talks to; it never hands out raw call
//! requests or values.
//!
//! ## Contracts
//!
//! - Registry ([`registry`]): paper registration and token association
//! - Paper token ([`token`]): bonding-curve initialization, quotes, trades
//! - Marketplace ([`listing`]): listings and recorded trades
//!
//! ## Conventions
//!
//! Every operation first checks that the contract it targets is configured.
//! Write operations take the caller's [`WalletSession`] and a [`Signer`];
//! decimal inputs are scaled at the client's configured `decimals`.

pub mod listing;
pub mod registry;
pub mod session;
pub mod token;

use crate::client::{ContractClient, Signer};
use crate::config::{require_contract_id, ClientConfig};
use crate::error::{Error, Result};
use crate::rpc::{HttpTransport, RpcTransport};
use crate::types::{amount, ScArg, ScValue, TransactionOutcome};

pub use registry::PaperRegistration;
pub use session::WalletSession;
pub use token::{BuyOptions, TokenParams};

/// Application facade over a [`ContractClient`].
#[derive(Debug)]
pub struct Papex<T: RpcTransport> {
    client: ContractClient<T>,
}

impl<T: RpcTransport> Clone for Papex<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl Papex<HttpTransport> {
    /// Validate `config` and connect over HTTP.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::new(ContractClient::new(transport, config)?))
    }
}

impl<T: RpcTransport> Papex<T> {
    /// Wrap an existing client
    pub fn new(client: ContractClient<T>) -> Self {
        Self { client }
    }

    /// Underlying contract client
    pub fn client(&self) -> &ContractClient<T> {
        &self.client
    }

    /// Configured decimal places
    pub fn decimals(&self) -> u32 {
        self.client.decimals()
    }

    pub(crate) fn registry_id(&self) -> Result<&str> {
        require_contract_id(&self.client.config().registry_contract_id)
    }

    pub(crate) fn marketplace_id(&self) -> Result<&str> {
        require_contract_id(&self.client.config().marketplace_contract_id)
    }

    /// Parse a decimal amount that must be strictly positive.
    pub(crate) fn positive_amount(&self, what: &str, input: &str) -> Result<i128> {
        let value = amount::decode(input, self.decimals())?;
        if value <= 0 {
            return Err(Error::InvalidArgument(format!("{} must be positive", what)));
        }
        Ok(value)
    }

    pub(crate) async fn view(
        &self,
        contract_id: &str,
        method: &str,
        args: Vec<ScArg>,
    ) -> Result<Option<ScValue>> {
        self.client.invoke_view(contract_id, method, args, None).await
    }

    pub(crate) async fn submit(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        contract_id: &str,
        method: &str,
        args: Vec<ScArg>,
    ) -> Result<TransactionOutcome> {
        let caller = session.require()?;
        self.client
            .invoke_transaction(caller, signer, contract_id, method, args)
            .await
    }
}

/// Treat blank optional text as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Case-insensitive identity comparison.
pub(crate) fn same_identity(a: &str, b: &str) -> bool {
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

// ============================================================================
// Unit Tests
// ============================================================================
