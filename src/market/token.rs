//! Paper-token (bonding curve) operations.
//!
//! ## Slippage
//!
//! A buy without an explicit payment cap is capped at
//! [`BUY_BUFFER_PERCENT`] percent of the quoted cost. A sell without an explicit floor
//! uses the quoted proceeds as the floor. Quotes are point-in-time
//! simulations, so both are taken immediately before submitting.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::Signer;
use crate::config::require_contract_id;
use crate::error::{Error, Result};
use crate::market::{non_blank, same_identity, Papex, WalletSession};
use crate::normalize::{normalize_quote, normalize_summary};
use crate::rpc::RpcTransport;
use crate::types::amount;
use crate::types::identity::abbreviate;
use crate::types::{Quote, ScArg, ScType, ScValue, TokenSummary, TransactionOutcome};

/// Payment cap applied to automatic buys, as a percentage of the quote
pub const BUY_BUFFER_PERCENT: u32 = 110;

/// Behaviour switches for [`Papex::execute_buy_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuyOptions {
    /// Let the token owner switch trading on instead of failing with
    /// [`Error::TradingDisabled`]. Off by default.
    pub enable_trading_if_owner: bool,
}

/// Parameters of a new paper token, as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    /// Token name
    pub name: String,
    /// Token symbol; upper-cased before submission
    pub symbol: String,
    /// Maximum supply, > 0
    pub max_supply: String,
    /// Price of the first unit, > 0
    pub base_price: String,
    /// Price increase per unit, >= 0
    pub slope: String,
    /// Supply minted to the owner at creation, between 0 and `max_supply`
    pub initial_supply: String,
    /// Payment-asset liquidity seeded at creation, >= 0
    pub initial_liquidity: String,
    /// Payment asset contract; `None` or blank for native XLM
    pub payment_token: Option<String>,
}

/// Scaled form of [`TokenParams`], validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScaledParams {
    max_supply: i128,
    base_price: i128,
    slope: i128,
    initial_supply: i128,
    initial_liquidity: i128,
}

impl TokenParams {
    fn scaled(&self, decimals: u32) -> Result<ScaledParams> {
        let scaled = ScaledParams {
            max_supply: amount::decode(&self.max_supply, decimals)?,
            base_price: amount::decode(&self.base_price, decimals)?,
            slope: amount::decode(&self.slope, decimals)?,
            initial_supply: amount::decode(&self.initial_supply, decimals)?,
            initial_liquidity: amount::decode(&self.initial_liquidity, decimals)?,
        };

        let checks = [
            (scaled.max_supply > 0, "max supply must be positive"),
            (scaled.base_price > 0, "base price must be positive"),
            (scaled.slope >= 0, "slope must be non-negative"),
            (scaled.initial_supply >= 0, "initial supply must be non-negative"),
            (scaled.initial_liquidity >= 0, "initial liquidity must be non-negative"),
            (
                scaled.initial_supply <= scaled.max_supply,
                "initial supply cannot exceed max supply",
            ),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(Error::InvalidArgument((*reason).to_string())),
            None => Ok(scaled),
        }
    }
}

impl<T: RpcTransport> Papex<T> {
    /// Initialize a deployed paper-token contract.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - a parameter is out of range
    /// * [`Error::AlreadyInitialized`] - the contract already has a config
    pub async fn create_token(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        token_contract: &str,
        params: &TokenParams,
    ) -> Result<TransactionOutcome> {
        let contract = require_contract_id(token_contract)?;
        let owner = session.require()?;
        let scaled = params.scaled(self.decimals())?;

        if self.is_initialized(contract).await? {
            return Err(Error::AlreadyInitialized(format!(
                "token contract {} already has a config",
                abbreviate(contract)
            )));
        }

        let payment_token = non_blank(params.payment_token.as_deref()).map(ScArg::address);
        let args = vec![
            ScArg::address(owner),
            ScArg::string(params.name.trim()),
            ScArg::string(params.symbol.trim().to_uppercase()),
            ScArg::i128(scaled.max_supply),
            ScArg::i128(scaled.base_price),
            ScArg::i128(scaled.slope),
            ScArg::optional(ScType::Address, payment_token),
            ScArg::i128(scaled.initial_supply),
            ScArg::i128(scaled.initial_liquidity),
        ];
        self.submit(session, signer, contract, "init", args).await
    }

    /// Check the token's `config()` for an existing name or owner.
    ///
    /// A failed lookup is taken to mean "not initialized": an uninitialized
    /// contract fails the call, and `init` itself is the authoritative check.
    async fn is_initialized(&self, contract: &str) -> Result<bool> {
        match self.view(contract, "config", vec![]).await {
            Ok(Some(config)) => Ok(has_text(&config, "name") || has_text(&config, "owner")),
            Ok(None) => Ok(false),
            Err(Error::Simulation(message)) => {
                debug!(contract = abbreviate(contract), error = %message, "config lookup rejected");
                Ok(false)
            }
            Err(err @ (Error::InvalidArgument(_) | Error::InvalidIdentity(_))) => Err(err),
            Err(err) => {
                warn!(contract = abbreviate(contract), error = %err, "config lookup failed");
                Ok(false)
            }
        }
    }

    /// Token configuration and live state.
    pub async fn token_summary(&self, token_contract: &str) -> Result<Option<TokenSummary>> {
        let contract = require_contract_id(token_contract)?;
        let raw = self.view(contract, "summary", vec![]).await?;
        Ok(raw.as_ref().and_then(|v| normalize_summary(v, self.decimals())))
    }

    /// Enable or disable trading.
    pub async fn set_trading(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        token_contract: &str,
        enabled: bool,
    ) -> Result<TransactionOutcome> {
        let contract = require_contract_id(token_contract)?;
        let caller = session.require()?;
        let args = vec![ScArg::address(caller), ScArg::bool(enabled)];
        self.submit(session, signer, contract, "set_trading", args).await
    }

    /// Quote the cost of buying `amount` tokens.
    pub async fn quote_buy(&self, token_contract: &str, amount: &str) -> Result<Option<Quote>> {
        self.quote(token_contract, "quote_buy", amount).await
    }

    /// Quote the proceeds of selling `amount` tokens.
    pub async fn quote_sell(&self, token_contract: &str, amount: &str) -> Result<Option<Quote>> {
        self.quote(token_contract, "quote_sell", amount).await
    }

    async fn quote(&self, token_contract: &str, method: &str, amount: &str) -> Result<Option<Quote>> {
        let contract = require_contract_id(token_contract)?;
        let scaled = self.positive_amount("amount", amount)?;
        let raw = self.view(contract, method, vec![ScArg::i128(scaled)]).await?;
        Ok(raw.as_ref().and_then(|v| normalize_quote(v, self.decimals())))
    }

    /// Buy `amount` tokens, paying at most `max_payment`.
    ///
    /// # Errors
    ///
    /// * [`Error::TradingDisabled`] - the token reports trading off
    /// * [`Error::NotFound`] - no cap was given and no quote is available
    pub async fn execute_buy(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        token_contract: &str,
        amount: &str,
        max_payment: Option<&str>,
    ) -> Result<TransactionOutcome> {
        self.execute_buy_with(session, signer, token_contract, amount, max_payment, &BuyOptions::default())
            .await
    }

    /// [`execute_buy`](Self::execute_buy) with explicit [`BuyOptions`].
    ///
    /// With `enable_trading_if_owner` set and the connected wallet owning the
    /// token, a disabled token is switched on with `set_trading` before the
    /// buy is submitted. The signer is asked twice in that case.
    pub async fn execute_buy_with(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        token_contract: &str,
        amount: &str,
        max_payment: Option<&str>,
        options: &BuyOptions,
    ) -> Result<TransactionOutcome> {
        let contract = require_contract_id(token_contract)?;
        let buyer = session.require()?;
        let scaled = self.positive_amount("amount", amount)?;

        let max_to_spend = match non_blank(max_payment) {
            Some(cap) => amount::decode(cap, self.decimals())?,
            None => {
                let cost = self.quoted_cost(contract, "quote_buy", amount).await?;
                amount::scale_by_percent(cost, BUY_BUFFER_PERCENT)
                    .ok_or_else(|| Error::malformed(amount, "buffered payment overflows i128"))?
            }
        };

        if let Some(summary) = self.token_summary(contract).await? {
            if !summary.trading {
                if !(options.enable_trading_if_owner && same_identity(&summary.owner, buyer)) {
                    return Err(Error::TradingDisabled(format!(
                        "token {} is not trading; owner {} must enable it",
                        abbreviate(contract),
                        abbreviate(&summary.owner)
                    )));
                }
                info!(contract = abbreviate(contract), "owner enabling trading before buy");
                let enabled = self.set_trading(session, signer, contract, true).await?;
                if !enabled.is_success() {
                    return Err(Error::TradingDisabled(format!(
                        "set_trading on {} ended {:?}",
                        abbreviate(contract),
                        enabled.status
                    )));
                }
            }
        }

        debug!(contract = abbreviate(contract), amount = %scaled, max_to_spend = %max_to_spend, "submitting buy");
        let args = vec![ScArg::address(buyer), ScArg::i128(scaled), ScArg::i128(max_to_spend)];
        self.submit(session, signer, contract, "buy", args).await
    }

    /// Sell `amount` tokens, receiving at least `min_payment`.
    pub async fn execute_sell(
        &self,
        session: &WalletSession,
        signer: &dyn Signer,
        token_contract: &str,
        amount: &str,
        min_payment: Option<&str>,
    ) -> Result<TransactionOutcome> {
        let contract = require_contract_id(token_contract)?;
        let seller = session.require()?;
        let scaled = self.positive_amount("amount", amount)?;

        let min_to_receive = match non_blank(min_payment) {
            Some(floor) => amount::decode(floor, self.decimals())?,
            None => self.quoted_cost(contract, "quote_sell", amount).await?,
        };

        debug!(contract = abbreviate(contract), amount = %scaled, min_to_receive = %min_to_receive, "submitting sell");
        let args = vec![ScArg::address(seller), ScArg::i128(scaled), ScArg::i128(min_to_receive)];
        self.submit(session, signer, contract, "sell", args).await
    }

    async fn quoted_cost(&self, contract: &str, method: &str, amount: &str) -> Result<i128> {
        let quote = self
            .quote(contract, method, amount)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} returned no quote", method)))?;
        amount::decode(&quote.cost, self.decimals())
    }
}

fn has_text(value: &ScValue, key: &str) -> bool {
    value
        .get(key)
        .and_then(ScValue::as_str)
        .map_or(false, |s| !s.is_empty())
}

// ============================================================================
// Unit Tests
// ============================================================================
