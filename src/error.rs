// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Error Taxonomy

use crate::types::VerificationTier;

/// Engine-level failures. All are immediate and non-retryable; every error is
/// scoped to a single operation and leaves prior state unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("reentrancy -- a mutating call is already in flight")]
    Reentrancy,

    #[error("protocol paused -- mutations rejected until reconciliation")]
    Paused,

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("proposal not found: {0}")]
    ProposalNotFound(String),

    #[error("actor not found: {0}")]
    ActorNotFound(String),

    #[error("insufficient balance -- requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("invalid amount -- expected a finite non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("unauthorized -- requires {required:?} tier or above")]
    Unauthorized { required: VerificationTier },

    #[error("zero balance -- nothing pending to claim")]
    ZeroBalance,
}

impl EngineError {
    /// Stable machine-readable code, used by the WASM surface and dashboards.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reentrancy => "REENTRANCY",
            Self::Paused => "PROTOCOL_PAUSED",
            Self::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            Self::ProposalNotFound(_) => "PROPOSAL_NOT_FOUND",
            Self::ActorNotFound(_) => "ACTOR_NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::ZeroBalance => "ZERO_BALANCE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(EngineError::Reentrancy.code(), "REENTRANCY");
        assert_eq!(EngineError::Paused.code(), "PROTOCOL_PAUSED");
        assert_eq!(
            EngineError::Unauthorized { required: VerificationTier::Audited }.code(),
            "UNAUTHORIZED"
        );
        assert_eq!(EngineError::ZeroBalance.code(), "ZERO_BALANCE");
        assert_eq!(EngineError::InvalidAmount(f64::NAN).code(), "INVALID_AMOUNT");
    }

    #[test]
    fn display_carries_context() {
        let err = EngineError::InsufficientBalance { requested: 500.0, available: 120.0 };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("120"));
    }
}
