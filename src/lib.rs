//! # Papex Client
//!
//! Contract interaction client for the Papex research-paper marketplace on
//! Soroban.
//!
//! ## Architecture
//!
//! Leaf-first:
//! - **Types**: fixed-point amount codec, typed arguments, decoded values,
//!   domain records
//! - **RPC**: the transport boundary and its HTTP implementation
//! - **Client**: Account Resolver, Call Builder, View Invoker, Transaction
//!   Invoker
//! - **Normalize**: raw contract values to typed records
//! - **Market**: registry, paper-token and marketplace operations
//!
//! ## Call Modes
//!
//! 1. **View**: simulated only, never signed, never mutates chain state
//! 2. **Transaction**: prepared, signed by an external [`Signer`], submitted
//!    and polled until the network reports a terminal status
//!
//! ## Fixed-Point Amounts
//!
//! Amounts are `i128` scaled by `10^decimals` on-chain and canonical decimal
//! strings everywhere else. Nothing passes through floating point.
//!
//! ## Example
//!
//! ```no_run
//! use papex_client::{ClientConfig, Papex};
//!
//! # async fn run() -> papex_client::Result<()> {
//! let papex = Papex::connect(ClientConfig::default())?;
//! if let Some(summary) = papex
//!     .token_summary("CBCONDDFUWZ2Q3226JDQ5ZXPD7V6S2NCQ76A47K7IPVTB6ZAKIHI5D2M")
//!     .await?
//! {
//!     println!("{} supply {}", summary.symbol, summary.total_supply);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: amounts, values, identities, records, outcomes
pub mod types;

/// Error taxonomy
pub mod error;

/// Client configuration
pub mod config;

/// Transport boundary and HTTP transport
pub mod rpc;

/// Invocation components
pub mod client;

/// Domain normalizers
pub mod normalize;

/// Application operations
pub mod market;

/// Logging setup
pub mod telemetry;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use client::{
    cancellation, CallBuilder, CallRequest, CancelHandle, Cancellation, ContractClient, PollPolicy,
    Signer, SubmitOptions,
};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use market::{BuyOptions, Papex, PaperRegistration, TokenParams, WalletSession};
pub use rpc::{HttpTransport, RpcTransport, SendResponse, SimulationResponse, TxStatus};
pub use types::{
    ListingRecord, PaperRecord, PaperStatus, Quote, ScArg, ScType, ScValue, TerminalStatus,
    TokenSummary, TradeEvent, TransactionOutcome,
};
