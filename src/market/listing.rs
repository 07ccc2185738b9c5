//! Marketplace contract operations.

use crate::client::Signer;
use crate::error::{Error, Result};
use crate::market::{Papex, WalletSession};
use crate::normalize::{normalize_listings, normalize_trades};
use crate::rpc::RpcTransport;
use crate::types::{ListingRecord, ScArg, TradeEvent, TransactionOutcome};

/// Page size used when listing marketplace entries
pub const DEFAULT_LISTING_LIMIT: u32 = 50;

impl<T: RpcTransport> Papex<T> {
    /// Trades recorded for a paper, oldest first as the contract returns them.
    pub async fn load_trades(&self, paper_id: u32) -> Result<Vec<TradeEvent>> {
        let marketplace = self.marketplace_id()?;
        let raw = self.view(marketplace, "get_trades", vec![ScArg::u32(paper_id)]).await?;
        Ok(raw
            .as_ref()
            .map(|v| normalize_trades(v, self.decimals()))
            .unwrap_or_default())
    }

    /// Up to `limit` listings; inactive ones only when `only_active` is false.
    pub async fn list_listings(&self, limit: u32, only_active: bool) -> Result<Vec<ListingRecord>> {
        let marketplace = self.marketplace_id()?;
        let args = vec![ScArg::u32(limit), ScArg::bool(only_active)];
        let raw = self.view(marketplace, "list_listings", args).await?;
        Ok(raw.as_ref().map(normalize_listings).unwrap_or_default())
    }

    /// List a tokenized paper on the marketplace.
    pub async fn register_listing(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        paper_id: u32,
        token_contract: &str,
        metadata_uri: &str,
    ) -> Result<TransactionOutcome> {
        let marketplace = self.marketplace_id()?;
        let caller = session.require()?;
        let uri = metadata_uri.trim();
        if uri.is_empty() {
            return Err(Error::InvalidArgument("metadata URI is required".into()));
        }
        let args = vec![
            ScArg::address(caller),
            ScArg::u32(paper_id),
            ScArg::address(token_contract.trim()),
            ScArg::string(uri),
        ];
        self.submit(session, signer, marketplace, "register_listing", args).await
    }
}
