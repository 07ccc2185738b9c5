//! Error taxonomy for the contract client.
//!
//! Every failure the core can produce surfaces to the caller as one of these
//! variants. Nothing is retried or downgraded internally; the confirmation
//! poll loop is the only place that loops, and only on "not found".
//!
//! An on-chain failure is *not* an error: it is reported through
//! [`TransactionOutcome::status`](crate::types::TransactionOutcome).

use thiserror::Error;

use crate::types::TransactionOutcome;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All error kinds produced by the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A decimal string could not be parsed, or does not fit in an i128.
    #[error("malformed decimal input {input:?}: {reason}")]
    MalformedInput {
        /// The offending input, verbatim.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A required contract id is unset or still a placeholder, or the
    /// configuration itself is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An identity is not a well-formed account key.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// An application-level argument check failed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport rejected a simulation (view call or PREPARED step).
    /// Carries the transport's diagnostic text verbatim.
    #[error("simulation failed: {0}")]
    Simulation(String),

    /// The external signer declined or failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The network refused the signed envelope before accepting it.
    #[error("transaction rejected by network: {0}")]
    SendRejected(String),

    /// The transport itself failed (connection, protocol, decoding).
    #[error("transport error: {0}")]
    Transport(String),

    /// The configured confirmation deadline elapsed before a terminal status.
    #[error("transaction {hash} not confirmed before deadline")]
    ConfirmationTimeout {
        /// Submission hash, for out-of-band lookup.
        hash: String,
    },

    /// A status lookup failed after the network accepted the envelope. The
    /// transaction may still land.
    #[error("status lookup for transaction {hash} failed: {reason}")]
    ConfirmationLookup {
        /// Submission hash, for out-of-band lookup.
        hash: String,
        /// The transport's error.
        reason: String,
    },

    /// Polling was cancelled by the caller before a terminal status.
    #[error("confirmation polling for {hash} cancelled")]
    Cancelled {
        /// Submission hash, for out-of-band lookup.
        hash: String,
    },

    /// A record the operation depends on does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The connected identity may not perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The contract instance has already been initialized.
    #[error("already initialized: {0}")]
    AlreadyInitialized(String),

    /// The token contract has trading switched off.
    #[error("trading disabled: {0}")]
    TradingDisabled(String),
}

impl Error {
    /// Shorthand for [`Error::MalformedInput`].
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// The outcome implied by a write-path error that ended before the
    /// network accepted the envelope.
    ///
    /// Returns `None` for errors that happen after acceptance (the
    /// transaction may still land) or outside the write path.
    pub fn outcome(&self) -> Option<TransactionOutcome> {
        match self {
            Error::Simulation(_) | Error::Signing(_) | Error::SendRejected(_) => {
                Some(TransactionOutcome::not_submitted())
            }
            _ => None,
        }
    }

    /// Submission hash of a transaction whose confirmation was not observed.
    pub fn hash(&self) -> Option<&str> {
        match self {
            Error::ConfirmationTimeout { hash }
            | Error::ConfirmationLookup { hash, .. }
            | Error::Cancelled { hash } => Some(hash),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(format!("invalid JSON: {}", err))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TerminalStatus;

    #[test]
    fn test_pre_acceptance_errors_map_to_not_submitted() {
        for err in [
            Error::Simulation("boom".into()),
            Error::Signing("user declined".into()),
            Error::SendRejected("txBadSeq".into()),
        ] {
            let outcome = err.outcome().expect("pre-acceptance error has an outcome");
            assert_eq!(outcome.status, TerminalStatus::NotSubmitted);
            assert!(outcome.hash.is_none());
            assert!(outcome.return_value.is_none());
        }
    }

    #[test]
    fn test_post_acceptance_errors_have_no_outcome() {
        let err = Error::ConfirmationTimeout { hash: "abc".into() };
        assert!(err.outcome().is_none());
        assert!(Error::Transport("down".into()).outcome().is_none());
    }

    #[test]
    fn test_post_acceptance_errors_keep_hash() {
        let lookup = Error::ConfirmationLookup {
            hash: "abc".into(),
            reason: "transport error: HTTP 503".into(),
        };
        assert_eq!(lookup.hash(), Some("abc"));
        assert!(lookup.outcome().is_none());
        assert_eq!(Error::Cancelled { hash: "def".into() }.hash(), Some("def"));
        assert_eq!(Error::Signing("declined".into()).hash(), None);
    }

    #[test]
    fn test_simulation_message_is_verbatim() {
        let err = Error::Simulation("HostError: Error(Contract, #3)".into());
        assert_eq!(err.to_string(), "simulation failed: HostError: Error(Contract, #3)");
    }
}
