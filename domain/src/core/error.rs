//! Domain error types

use crate::session::entities::SessionPhase;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: SessionPhase, to: SessionPhase },

    #[error("Session is {0} and can no longer be modified")]
    SessionImmutable(SessionPhase),

    #[error("No proposals to vote on")]
    NoProposals,
}
