//! Identities, account state and network context.
//!
//! ## Identities
//!
//! Account identities are 56-character strkeys starting with `G`; contract
//! ids are 56-character strkeys starting with `C`. Both are validated
//! structurally only. Checksums are left to the network.
//!
//! ## Network Id
//!
//! The network id is the SHA-256 hash of the network passphrase. It is what
//! the signer binds a signature to, so it travels with every signing request.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Length of an encoded account or contract strkey.
pub const STRKEY_LEN: usize = 56;

/// Validate an account identity and return it trimmed.
///
/// # Errors
///
/// * [`Error::InvalidIdentity`] - empty, wrong prefix, or wrong length
pub fn validate_account(identity: &str) -> Result<String> {
    let trimmed = identity.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidIdentity("identity must be a non-empty string".into()));
    }
    if !trimmed.starts_with('G') || trimmed.len() != STRKEY_LEN {
        return Err(Error::InvalidIdentity(format!(
            "{:?} is not a 56-character account key starting with 'G'",
            abbreviate(trimmed)
        )));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return Err(Error::InvalidIdentity(format!(
            "{:?} contains characters outside the strkey alphabet",
            abbreviate(trimmed)
        )));
    }
    Ok(trimmed.to_string())
}

/// Check if `id` is shaped like a contract id (`C...`, 56 chars).
pub fn is_contract_id(id: &str) -> bool {
    id.len() == STRKEY_LEN && id.starts_with('C')
}

/// Check if `id` is shaped like an account or contract address.
pub fn is_address(id: &str) -> bool {
    id.len() == STRKEY_LEN && (id.starts_with('G') || id.starts_with('C'))
}

/// First 8 characters, for logs and error messages.
pub fn abbreviate(identity: &str) -> &str {
    match identity.char_indices().nth(8) {
        Some((idx, _)) => &identity[..idx],
        None => identity,
    }
}

// ============================================================================
// AccountState
// ============================================================================

/// Sequence state needed to build a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Account identity
    pub account_id: String,
    /// Current sequence number
    pub sequence: i64,
    /// `true` when the state was synthesized because the account could not
    /// be fetched
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl AccountState {
    /// Live account state
    pub fn new(account_id: impl Into<String>, sequence: i64) -> Self {
        Self {
            account_id: account_id.into(),
            sequence,
            synthetic: false,
        }
    }

    /// Zero-sequence stand-in for an account that does not exist on-chain
    pub fn synthetic(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            sequence: 0,
            synthetic: true,
        }
    }

    /// Sequence number the next transaction from this account must carry
    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}

// ============================================================================
// NetworkContext
// ============================================================================

/// Network the client talks to, as handed to the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContext {
    /// Network passphrase
    pub passphrase: String,
    /// SHA-256 of the passphrase
    pub network_id: [u8; 32],
}

impl NetworkContext {
    /// Derive the context for a passphrase
    pub fn new(passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        let network_id = Self::compute_hash(passphrase.as_bytes());
        Self {
            passphrase,
            network_id,
        }
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the network id as a hex string
    pub fn network_id_hex(&self) -> String {
        hex::encode(self.network_id)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
