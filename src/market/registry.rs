//! Registry contract operations.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::Signer;
use crate::error::{Error, Result};
use crate::market::{non_blank, same_identity, Papex, WalletSession};
use crate::normalize::{normalize_id, normalize_paper, normalize_papers};
use crate::rpc::RpcTransport;
use crate::types::identity::abbreviate;
use crate::types::{PaperRecord, ScArg, ScType, TransactionOutcome};

/// Page size used when listing papers
pub const DEFAULT_PAPER_LIMIT: u32 = 50;

/// Result of `register_paper`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRegistration {
    /// Submission outcome
    pub outcome: TransactionOutcome,
    /// Identifier assigned by the registry, when the call succeeded and
    /// returned one
    pub paper_id: Option<u32>,
}

impl<T: RpcTransport> Papex<T> {
    /// Register a paper by metadata locator, optionally with a DOI.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - `metadata_uri` is blank
    pub async fn register_paper(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        metadata_uri: &str,
        doi: Option<&str>,
    ) -> Result<PaperRegistration> {
        let registry = self.registry_id()?;
        let uri = metadata_uri.trim();
        if uri.is_empty() {
            return Err(Error::InvalidArgument("metadata URI is required".into()));
        }
        let caller = session.require()?;

        let args = vec![
            ScArg::address(caller),
            ScArg::string(uri),
            ScArg::optional(ScType::String, non_blank(doi).map(ScArg::string)),
        ];
        let outcome = self.submit(session, signer, registry, "register_paper", args).await?;
        let paper_id = outcome.return_value.as_ref().and_then(normalize_id);
        Ok(PaperRegistration { outcome, paper_id })
    }

    /// Fetch one paper; `None` when the registry has no such paper.
    pub async fn get_paper(&self, paper_id: u32) -> Result<Option<PaperRecord>> {
        let registry = self.registry_id()?;
        let raw = self.view(registry, "get_paper", vec![ScArg::u32(paper_id)]).await?;
        Ok(raw.as_ref().and_then(normalize_paper))
    }

    /// List up to `limit` papers.
    pub async fn list_papers(&self, limit: u32) -> Result<Vec<PaperRecord>> {
        let registry = self.registry_id()?;
        let raw = self.view(registry, "list_papers", vec![ScArg::u32(limit)]).await?;
        let papers = raw.as_ref().map(normalize_papers).unwrap_or_default();
        debug!(count = papers.len(), limit, "papers listed");
        Ok(papers)
    }

    /// Registry administrator, if the registry reports one.
    pub async fn registry_admin(&self) -> Result<Option<String>> {
        let registry = self.registry_id()?;
        let raw = self.view(registry, "admin", vec![]).await?;
        Ok(raw.as_ref().and_then(|v| v.as_str()).map(str::to_string))
    }

    /// Link a paper-token contract to a registered paper.
    ///
    /// Only the paper's owner or the registry administrator may do this.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] - the paper is not registered
    /// * [`Error::Unauthorized`] - the caller is neither owner nor admin
    pub async fn associate_token(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        paper_id: u32,
        token_contract: &str,
    ) -> Result<TransactionOutcome> {
        let registry = self.registry_id()?;
        let caller = session.require()?;

        let paper = self
            .get_paper(paper_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("paper {} is not registered", paper_id)))?;

        if !same_identity(&paper.owner, caller) {
            let is_admin = match self.registry_admin().await {
                Ok(admin) => admin.map_or(false, |admin| same_identity(&admin, caller)),
                Err(err) => {
                    warn!(error = %err, "registry admin lookup failed");
                    false
                }
            };
            if !is_admin {
                return Err(Error::Unauthorized(format!(
                    "{} is neither owner ({}) nor admin of paper {}",
                    abbreviate(caller),
                    abbreviate(&paper.owner),
                    paper_id
                )));
            }
        }

        let args = vec![
            ScArg::address(caller),
            ScArg::u32(paper_id),
            ScArg::address(token_contract.trim()),
        ];
        self.submit(session, signer, registry, "set_token", args).await
    }
}
