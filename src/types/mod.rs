//! Core data types for the Papex contract client
//!
//! ## Types
//!
//! - [`amount`]: fixed-point codec between on-chain `i128` and decimal strings
//! - [`ScArg`] / [`ScType`]: typed invocation arguments
//! - [`ScValue`]: decoded contract return values
//! - [`AccountState`] / [`NetworkContext`]: what a transaction is built against
//! - [`TransactionOutcome`]: result of a write call
//! - Domain records: [`PaperRecord`], [`TokenSummary`], [`Quote`],
//!   [`TradeEvent`], [`ListingRecord`]
//!
//! ## Fixed-Point Arithmetic
//!
//! All amounts on-chain are `i128` scaled by `10^decimals` (7 by default).
//! Example: 10000 tokens at 7 decimals is stored as 100_000_000_000i128

pub mod amount;
pub mod identity;
mod outcome;
mod records;
mod value;

// Re-export all types at module level
pub use identity::{AccountState, NetworkContext};
pub use outcome::{TerminalStatus, TransactionOutcome, TransactionPhase};
pub use records::{ListingRecord, PaperRecord, PaperStatus, Quote, TokenSummary, TradeEvent};
pub use value::{ScArg, ScType, ScValue};
