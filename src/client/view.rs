//! View Invoker: simulation-only calls.

use tracing::debug;

use crate::client::ContractClient;
use crate::error::{Error, Result};
use crate::rpc::{RpcTransport, SimulationResponse};
use crate::types::{ScArg, ScValue};

impl<T: RpcTransport> ContractClient<T> {
    /// Simulate `method` on `contract_id` and return its decoded value.
    ///
    /// Runs as `identity` when given, otherwise as the configured read-only
    /// identity. Never signs and never submits. A contract that returns
    /// nothing (or `void`) yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// * [`Error::Simulation`] - the transport rejected the simulation; the
    ///   diagnostic is passed through verbatim
    /// * [`Error::InvalidIdentity`] / [`Error::InvalidArgument`] - the call
    ///   could not be assembled
    pub async fn invoke_view(
        &self,
        contract_id: &str,
        method: &str,
        args: Vec<ScArg>,
        identity: Option<&str>,
    ) -> Result<Option<ScValue>> {
        let identity = identity.unwrap_or(&self.config().read_only_identity);
        let account = self.resolve(identity).await?;
        let call = self.builder().build(&account, contract_id, method, args)?;

        debug!(contract = %contract_id, method = %method, "simulating view call");
        match self.transport().simulate(&call).await? {
            SimulationResponse::Success { return_value } => {
                Ok(return_value.filter(|value| !value.is_void()))
            }
            SimulationResponse::Error { message } => {
                debug!(contract = %contract_id, method = %method, error = %message, "simulation rejected");
                Err(Error::Simulation(message))
            }
        }
    }
}
