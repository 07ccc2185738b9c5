//! Application records produced by the normalizers.
//!
//! Records are plain value objects: created fresh on every fetch, owned by
//! whoever requested them, never cached by the client. Every amount field
//! is a canonical decimal string (see [`amount::encode`](crate::types::amount::encode)).

use serde::{Deserialize, Serialize};

// ============================================================================
// PaperStatus
// ============================================================================

/// Lifecycle status of a registered paper.
///
/// Contract codes:
/// - Pending = 0
/// - Tokenized = 1
/// - Archived = 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    /// Registered, no token yet
    #[default]
    Pending,
    /// A paper token has been associated
    Tokenized,
    /// Withdrawn from the marketplace
    Archived,
}

impl PaperStatus {
    /// Map a contract status code. Unrecognized codes fall back to
    /// [`PaperStatus::Pending`].
    pub fn from_code(code: i128) -> Self {
        match code {
            1 => PaperStatus::Tokenized,
            2 => PaperStatus::Archived,
            _ => PaperStatus::Pending,
        }
    }

    /// Map a variant name (`"Tokenized"`, `"archived"`, ...). Unrecognized
    /// names fall back to [`PaperStatus::Pending`].
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("tokenized") {
            PaperStatus::Tokenized
        } else if name.eq_ignore_ascii_case("archived") {
            PaperStatus::Archived
        } else {
            PaperStatus::Pending
        }
    }

    /// Contract status code
    pub fn code(self) -> u32 {
        match self {
            PaperStatus::Pending => 0,
            PaperStatus::Tokenized => 1,
            PaperStatus::Archived => 2,
        }
    }

    /// Lowercase display name
    pub fn as_str(self) -> &'static str {
        match self {
            PaperStatus::Pending => "pending",
            PaperStatus::Tokenized => "tokenized",
            PaperStatus::Archived => "archived",
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A paper registered in the registry contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Registry-assigned identifier
    pub id: u32,
    /// Owner identity (empty when absent)
    pub owner: String,
    /// Metadata locator, usually `ipfs://...`
    pub metadata_uri: String,
    /// External identifier (DOI)
    pub doi: Option<String>,
    /// Linked paper-token contract
    pub token: Option<String>,
    /// Lifecycle status
    pub status: PaperStatus,
    /// Ledger timestamp of registration (seconds)
    pub registered_at: u64,
}

/// Configuration and live state of a bonding-curve paper token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Owner identity
    pub owner: String,
    /// Maximum mintable supply
    pub max_supply: String,
    /// Circulating supply
    pub total_supply: String,
    /// Price of the first unit
    pub base_price: String,
    /// Price increase per unit minted
    pub slope: String,
    /// Payment-asset liquidity held by the contract
    pub liquidity: String,
    /// Whether buy/sell are enabled
    pub trading: bool,
    /// Payment asset contract; `None` means native XLM
    pub payment_token: Option<String>,
}

/// A point-in-time price quote from a simulated `quote_buy` / `quote_sell`.
///
/// Reflects chain state at simulation time only; re-request before acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Total cost (buy) or proceeds (sell)
    pub cost: String,
    /// Spot price before the trade
    pub price_before: String,
    /// Spot price after the trade
    pub price_after: String,
}

/// A trade recorded by the marketplace contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Trader identity
    pub trader: String,
    /// Token amount
    pub amount: String,
    /// Payment amount
    pub cost: String,
    /// `true` for a buy, `false` for a sell
    pub is_buy: bool,
    /// Ledger timestamp (seconds)
    pub timestamp: u64,
}

/// A marketplace listing for a tokenized paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Listing identifier
    pub id: u32,
    /// Listed paper
    pub paper_id: u32,
    /// Paper-token contract
    pub token: String,
    /// Metadata locator
    pub metadata_uri: String,
    /// Listing owner
    pub owner: String,
    /// Whether the listing is live
    pub is_active: bool,
    /// Ledger timestamp of creation (seconds)
    pub created_at: u64,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PaperStatus::from_code(0), PaperStatus::Pending);
        assert_eq!(PaperStatus::from_code(1), PaperStatus::Tokenized);
        assert_eq!(PaperStatus::from_code(2), PaperStatus::Archived);
        for code in [PaperStatus::Pending, PaperStatus::Tokenized, PaperStatus::Archived] {
            assert_eq!(PaperStatus::from_code(i128::from(code.code())), code);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_pending() {
        assert_eq!(PaperStatus::from_code(7), PaperStatus::Pending);
        assert_eq!(PaperStatus::from_code(-1), PaperStatus::Pending);
        assert_eq!(PaperStatus::from_name("Retracted"), PaperStatus::Pending);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(PaperStatus::from_name("Tokenized"), PaperStatus::Tokenized);
        assert_eq!(PaperStatus::from_name("ARCHIVED"), PaperStatus::Archived);
        assert_eq!(PaperStatus::Archived.as_str(), "archived");
        assert_eq!(serde_json::to_string(&PaperStatus::Tokenized).unwrap(), "\"tokenized\"");
    }
}
