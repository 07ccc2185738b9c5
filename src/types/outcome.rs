//! Transaction outcome and submission phases.
//!
//! A write call moves through
//! `Built -> Prepared -> Signed -> Submitted -> {Confirmed | Failed | SendRejected}`
//! with no backward transitions. The invoker tracks the phase with
//! [`TransactionPhase`] and reports the result as a [`TransactionOutcome`].

use serde::{Deserialize, Serialize};

use crate::types::ScValue;

// ============================================================================
// TerminalStatus
// ============================================================================

/// Final status of a write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    /// Accepted and executed successfully
    Success,
    /// Accepted, executed, and failed on-chain
    Failed,
    /// Never accepted by the network
    NotSubmitted,
}

// ============================================================================
// TransactionOutcome
// ============================================================================

/// Result of a write call.
///
/// An on-chain failure is reported here rather than raised as an error; the
/// hash is still present so diagnostics can be looked up out-of-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    /// Submission hash; absent when the network never accepted the envelope
    pub hash: Option<String>,
    /// Terminal status
    pub status: TerminalStatus,
    /// Decoded return value, only ever present on success
    pub return_value: Option<ScValue>,
}

impl TransactionOutcome {
    /// Successful execution
    pub fn confirmed(hash: impl Into<String>, return_value: Option<ScValue>) -> Self {
        Self {
            hash: Some(hash.into()),
            status: TerminalStatus::Success,
            return_value,
        }
    }

    /// On-chain failure
    pub fn failed(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            status: TerminalStatus::Failed,
            return_value: None,
        }
    }

    /// Nothing reached the network
    pub fn not_submitted() -> Self {
        Self {
            hash: None,
            status: TerminalStatus::NotSubmitted,
            return_value: None,
        }
    }

    /// Check if the transaction executed successfully
    pub fn is_success(&self) -> bool {
        self.status == TerminalStatus::Success
    }
}

// ============================================================================
// TransactionPhase
// ============================================================================

/// Phase of an in-flight write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionPhase {
    /// Call assembled against live account state
    Built,
    /// Re-simulated and augmented with resource/footprint data
    Prepared,
    /// Signed by the external signer
    Signed,
    /// Accepted by the network, awaiting a terminal status
    Submitted,
    /// Executed successfully
    Confirmed,
    /// Executed and failed on-chain
    Failed,
    /// Refused by the network before acceptance
    SendRejected,
}

impl TransactionPhase {
    /// Check if no further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TransactionPhase::Confirmed | TransactionPhase::Failed | TransactionPhase::SendRejected
        )
    }

    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(self, next: TransactionPhase) -> bool {
        use TransactionPhase::*;
        matches!(
            (self, next),
            (Built, Prepared)
                | (Prepared, Signed)
                | (Signed, Submitted)
                | (Signed, SendRejected)
                | (Submitted, Confirmed)
                | (Submitted, Failed)
        )
    }

    /// Upper-case name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionPhase::Built => "BUILT",
            TransactionPhase::Prepared => "PREPARED",
            TransactionPhase::Signed => "SIGNED",
            TransactionPhase::Submitted => "SUBMITTED",
            TransactionPhase::Confirmed => "CONFIRMED",
            TransactionPhase::Failed => "FAILED",
            TransactionPhase::SendRejected => "SEND_REJECTED",
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let ok = TransactionOutcome::confirmed("abc", Some(ScValue::U32(3)));
        assert!(ok.is_success());
        assert_eq!(ok.hash.as_deref(), Some("abc"));
        assert_eq!(ok.return_value, Some(ScValue::U32(3)));

        let failed = TransactionOutcome::failed("def");
        assert_eq!(failed.status, TerminalStatus::Failed);
        assert_eq!(failed.hash.as_deref(), Some("def"));
        assert!(failed.return_value.is_none());
    }

    #[test]
    fn test_phases_are_linear() {
        use TransactionPhase::*;
        let happy = [Built, Prepared, Signed, Submitted, Confirmed];
        for pair in happy.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
        assert!(Submitted.can_advance_to(Failed));
        assert!(Signed.can_advance_to(SendRejected));
    }

    #[test]
    fn test_no_backward_or_skipping_transitions() {
        use TransactionPhase::*;
        assert!(!Prepared.can_advance_to(Built));
        assert!(!Built.can_advance_to(Signed));
        assert!(!Submitted.can_advance_to(SendRejected));
        assert!(!Confirmed.can_advance_to(Failed));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(TransactionPhase::Confirmed.is_terminal());
        assert!(TransactionPhase::SendRejected.is_terminal());
        assert!(!TransactionPhase::Submitted.is_terminal());
    }
}
