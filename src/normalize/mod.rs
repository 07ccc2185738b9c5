//! Domain Normalizers
//!
//! Pure functions from a decoded contract return value to an application
//! record. Each one matches on the shapes the entry point actually returns
//! and never fails: a value of the wrong shape yields `None`, a missing
//! field takes its default.
//!
//! ## Field Rules
//!
//! - Amounts are scaled integers and always go through
//!   [`amount::encode`](crate::types::amount::encode) at the caller's
//!   `decimals`
//! - Status codes outside the known range map to [`PaperStatus::Pending`]
//! - Flags use [`ScValue::is_truthy`]
//! - Identities default to `""`, optional identities to `None`
//! - Timestamps default to `0`
//!
//! ## Record Shapes
//!
//! Registry and marketplace entries arrive wrapped as `{id, data}`. A bare
//! struct without the wrapper is read as its own `data`.

use crate::types::amount;
use crate::types::{ListingRecord, PaperRecord, PaperStatus, Quote, ScValue, TokenSummary, TradeEvent};

// ============================================================================
// Records
// ============================================================================

/// Normalize a `get_paper` / `list_papers` entry.
pub fn normalize_paper(raw: &ScValue) -> Option<PaperRecord> {
    let (record, data) = unwrap_record(raw, &["data", "paper"])?;
    Some(PaperRecord {
        id: record.field(&["id", "paper_id"]).and_then(ScValue::as_u32).unwrap_or(0),
        owner: identity(data, &["owner"]),
        metadata_uri: text(data, &["metadata_uri", "metadataUri"]),
        doi: optional_text(data, &["doi"]),
        token: optional_text(data, &["token"]),
        status: status(data.field(&["status"])),
        registered_at: timestamp(data, &["registered_at", "registeredAt"]),
    })
}

/// Normalize a token `summary()` result.
pub fn normalize_summary(raw: &ScValue, decimals: u32) -> Option<TokenSummary> {
    if !matches!(raw, ScValue::Map(_)) {
        return None;
    }
    Some(TokenSummary {
        name: text(raw, &["name"]),
        symbol: text(raw, &["symbol"]),
        owner: identity(raw, &["owner"]),
        max_supply: scaled(raw, &["max_supply", "maxSupply"], decimals),
        total_supply: scaled(raw, &["total_supply", "totalSupply"], decimals),
        base_price: scaled(raw, &["base_price", "basePrice"], decimals),
        slope: scaled(raw, &["slope"], decimals),
        liquidity: scaled(raw, &["liquidity"], decimals),
        trading: flag(raw, &["trading"]).unwrap_or(false),
        payment_token: optional_text(raw, &["payment_token", "paymentToken"]),
    })
}

/// Normalize a `quote_buy` / `quote_sell` result.
pub fn normalize_quote(raw: &ScValue, decimals: u32) -> Option<Quote> {
    if !matches!(raw, ScValue::Map(_)) {
        return None;
    }
    Some(Quote {
        cost: scaled(raw, &["cost"], decimals),
        price_before: scaled(raw, &["price_before", "priceBefore"], decimals),
        price_after: scaled(raw, &["price_after", "priceAfter"], decimals),
    })
}

/// Normalize a `get_trades` entry.
pub fn normalize_trade(raw: &ScValue, decimals: u32) -> Option<TradeEvent> {
    if !matches!(raw, ScValue::Map(_)) {
        return None;
    }
    Some(TradeEvent {
        trader: identity(raw, &["trader"]),
        amount: scaled(raw, &["amount"], decimals),
        cost: scaled(raw, &["cost"], decimals),
        is_buy: flag(raw, &["is_buy", "isBuy"]).unwrap_or(false),
        timestamp: timestamp(raw, &["timestamp"]),
    })
}

/// Normalize a `list_listings` entry.
///
/// A listing without a paper id is taken to list the paper with its own id;
/// a listing without an active flag is active.
pub fn normalize_listing(raw: &ScValue) -> Option<ListingRecord> {
    let (record, data) = unwrap_record(raw, &["data"])?;
    let id = record.field(&["id"]).and_then(ScValue::as_u32).unwrap_or(0);
    Some(ListingRecord {
        id,
        paper_id: data.field(&["paper_id", "paperId"]).and_then(ScValue::as_u32).unwrap_or(id),
        token: identity(data, &["token"]),
        metadata_uri: text(data, &["metadata_uri", "metadataUri"]),
        owner: identity(data, &["owner"]),
        is_active: flag(data, &["is_active", "isActive"]).unwrap_or(true),
        created_at: timestamp(data, &["created_at", "createdAt"]),
    })
}

/// Normalize a bare numeric return value, such as a newly assigned id.
pub fn normalize_id(raw: &ScValue) -> Option<u32> {
    raw.as_u32()
}

// ============================================================================
// Lists
// ============================================================================

/// Normalize every entry of a vector result; unusable entries are dropped
/// and a non-vector result yields an empty list.
pub fn normalize_list<R>(raw: &ScValue, normalize: impl Fn(&ScValue) -> Option<R>) -> Vec<R> {
    raw.as_vec()
        .map(|items| items.iter().filter_map(normalize).collect())
        .unwrap_or_default()
}

/// Normalize a `list_papers` result.
pub fn normalize_papers(raw: &ScValue) -> Vec<PaperRecord> {
    normalize_list(raw, normalize_paper)
}

/// Normalize a `get_trades` result.
pub fn normalize_trades(raw: &ScValue, decimals: u32) -> Vec<TradeEvent> {
    normalize_list(raw, |entry| normalize_trade(entry, decimals))
}

/// Normalize a `list_listings` result.
pub fn normalize_listings(raw: &ScValue) -> Vec<ListingRecord> {
    normalize_list(raw, normalize_listing)
}

// ============================================================================
// Field helpers
// ============================================================================

/// Split `{id, data}` into the outer record and its payload.
fn unwrap_record<'a>(raw: &'a ScValue, data_keys: &[&str]) -> Option<(&'a ScValue, &'a ScValue)> {
    match raw {
        ScValue::Map(_) => {
            let data = raw
                .field(data_keys)
                .filter(|data| matches!(data, ScValue::Map(_)))
                .unwrap_or(raw);
            Some((raw, data))
        }
        _ => None,
    }
}

/// Paper status from a numeric code, a variant name, or a unit enum
/// variant (`[Symbol]`).
fn status(raw: Option<&ScValue>) -> PaperStatus {
    match raw {
        Some(ScValue::Vec(items)) => status(items.first()),
        Some(ScValue::Symbol(name)) => PaperStatus::from_name(name),
        Some(ScValue::String(s)) => match s.trim().parse::<i128>() {
            Ok(code) => PaperStatus::from_code(code),
            Err(_) => PaperStatus::from_name(s.trim()),
        },
        Some(value) => value.as_i128().map_or(PaperStatus::Pending, PaperStatus::from_code),
        None => PaperStatus::Pending,
    }
}

fn scaled(raw: &ScValue, keys: &[&str], decimals: u32) -> String {
    let value = raw.field(keys).and_then(ScValue::as_i128).unwrap_or(0);
    amount::encode(value, decimals)
}

fn text(raw: &ScValue, keys: &[&str]) -> String {
    raw.field(keys)
        .and_then(ScValue::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn identity(raw: &ScValue, keys: &[&str]) -> String {
    text(raw, keys)
}

fn optional_text(raw: &ScValue, keys: &[&str]) -> Option<String> {
    let value = raw.field(keys)?;
    // Option<T> may arrive unwrapped or as a one-element vector
    let value = match value {
        ScValue::Vec(items) => items.first()?,
        other => other,
    };
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn flag(raw: &ScValue, keys: &[&str]) -> Option<bool> {
    raw.field(keys).map(ScValue::is_truthy)
}

fn timestamp(raw: &ScValue, keys: &[&str]) -> u64 {
    raw.field(keys).and_then(ScValue::as_u64).unwrap_or(0)
}

// ============================================================================
// Unit Tests
// ============================================================================
