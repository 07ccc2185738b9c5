//! Account Resolver.
//!
//! View calls may run against accounts that do not exist on-chain, so
//! [`ContractClient::resolve`] substitutes a zero-sequence account when the
//! lookup fails. Write calls use [`ContractClient::resolve_live`], where a
//! failed lookup is fatal.

use tracing::{debug, warn};

use crate::client::ContractClient;
use crate::error::{Error, Result};
use crate::rpc::RpcTransport;
use crate::types::identity::{abbreviate, validate_account};
use crate::types::AccountState;

impl<T: RpcTransport> ContractClient<T> {
    /// Resolve account state for a simulation.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidIdentity`] - `identity` is not an account key. A
    ///   failed lookup is never an error here.
    pub async fn resolve(&self, identity: &str) -> Result<AccountState> {
        let account_id = validate_account(identity)?;
        match self.transport().get_account(&account_id).await {
            Ok(state) => {
                debug!(account = abbreviate(&account_id), sequence = state.sequence, "account resolved");
                Ok(state)
            }
            Err(err) => {
                warn!(
                    account = abbreviate(&account_id),
                    error = %err,
                    "account lookup failed, using zero-sequence account"
                );
                Ok(AccountState::synthetic(account_id))
            }
        }
    }

    /// Resolve live account state for a transaction.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidIdentity`] - `identity` is not an account key
    /// * [`Error::Transport`] - the account could not be fetched
    pub async fn resolve_live(&self, identity: &str) -> Result<AccountState> {
        let account_id = validate_account(identity)?;
        let state = self.transport().get_account(&account_id).await.map_err(|err| match err {
            Error::Transport(msg) => Error::Transport(msg),
            other => Error::Transport(format!(
                "account {} could not be loaded: {}",
                abbreviate(&account_id),
                other
            )),
        })?;
        debug!(account = abbreviate(&account_id), sequence = state.sequence, "live account resolved");
        Ok(state)
    }
}
