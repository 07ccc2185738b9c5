//! Connected wallet identity.
//!
//! The session is owned by the caller and passed into every write
//! operation. The client only reads it.

use crate::error::{Error, Result};
use crate::types::identity::validate_account;

/// The currently connected wallet, if any.
///
/// Lifecycle: unset at start, set by [`connect`](Self::connect), cleared by
/// [`disconnect`](Self::disconnect).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    identity: Option<String>,
}

impl WalletSession {
    /// A session with no wallet connected
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already connected to `identity`
    pub fn connected(identity: &str) -> Result<Self> {
        let mut session = Self::new();
        session.connect(identity)?;
        Ok(session)
    }

    /// Connect `identity`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidIdentity`] - not an account key; the session is
    ///   left unchanged
    pub fn connect(&mut self, identity: &str) -> Result<()> {
        self.identity = Some(validate_account(identity)?);
        Ok(())
    }

    /// Forget the connected identity
    pub fn disconnect(&mut self) {
        self.identity = None;
    }

    /// Connected identity, if any
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Check if a wallet is connected
    pub fn is_connected(&self) -> bool {
        self.identity.is_some()
    }

    /// Connected identity, or [`Error::InvalidIdentity`] when none is.
    pub fn require(&self) -> Result<&str> {
        self.identity()
            .ok_or_else(|| Error::InvalidIdentity("no wallet connected".into()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
