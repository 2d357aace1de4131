//! Engine error types.
//!
//! Every failure the engine can report is a variant of [`EngineError`].
//! Variants carry enough structured detail for hosts to build user-facing
//! messages without re-deriving context, and each maps onto a coarse
//! [`ErrorKind`] so host mutation handlers can translate uniformly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bracket::entities::MatchStatus;

/// Coarse classification of engine failures.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Malformed arguments.
    InvalidInput,
    /// Operation not permitted given the current state.
    InvalidState,
    /// A referenced match or bracket is absent.
    NotFound,
}

/// Errors reported by the bracket generator and the scoring engines.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum EngineError {
    #[error("need 2+ participants, got {0}")]
    NotEnoughParticipants(usize),

    #[error("invalid side: {0} (expected 1 or 2)")]
    InvalidSide(u8),

    #[error("invalid configuration: {field} must be at least 1")]
    InvalidConfig { field: String },

    #[error("unrecognized tournament format: {0}")]
    UnknownFormat(String),

    #[error("match is already complete")]
    MatchComplete,

    #[error("can't start scoring a {0} match")]
    NotScorable(MatchStatus),

    #[error("participants must be assigned before scoring starts")]
    MissingParticipants,

    #[error("match has no live scoring state")]
    ScoringNotInitialized,

    #[error("nothing to undo")]
    EmptyHistory,

    #[error("match not found: {0}")]
    MatchNotFound(usize),
}

impl EngineError {
    /// The taxonomy bucket this error falls into.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotEnoughParticipants(_)
            | Self::InvalidSide(_)
            | Self::InvalidConfig { .. } => ErrorKind::InvalidInput,
            Self::UnknownFormat(_)
            | Self::MatchComplete
            | Self::NotScorable(_)
            | Self::MissingParticipants
            | Self::ScoringNotInitialized
            | Self::EmptyHistory => ErrorKind::InvalidState,
            Self::MatchNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
