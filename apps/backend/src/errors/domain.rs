//! Domain-level error type used across the registry and deal engine.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! The variants follow the request taxonomy: sequencing, status and
//! validation failures are caller errors (the session stays usable and the
//! caller may retry), engine failures come from the hand engine and are kept
//! distinct so the transport can abandon the whole deal.

use thiserror::Error;

/// Ordinal mismatches against the next expected slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SequenceKind {
    Game,
    Deal,
    Trick,
    Bid,
    Play,
}

/// Operations against an object (or parent) that is not in the right state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatusKind {
    SessionInactive,
    GameInactive,
    DealInactive,
    TrickInactive,
    /// A previous sibling is still active.
    PreviousActive,
    /// The deal is not in the phase the operation needs.
    PhaseMismatch,
    /// The trick still has cards to be played.
    TrickIncomplete,
}

/// Domain violations on request values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidCard,
    InvalidDeck,
    InvalidSeat,
    InvalidSuit,
    InvalidStatus,
    InvalidBid,
    CardNotInDealerHand,
    TurnCardMismatch,
    DeclarerMismatch,
    OutOfTurn,
    SkippedSeat,
    NotADefender,
    /// The hand engine refused a submitted call, discard or card.
    IllegalMove,
    Other(String),
}

/// Hand-engine failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineFailureKind {
    /// The engine could not produce a legal suggestion.
    NoLegalMove,
    /// The engine returned an outcome that breaks a core invariant.
    InvalidOutcome,
    /// Hand contents no longer add up.
    HandIntegrity,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Game,
    Deal,
    Trick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SessionExists,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("sequence error {0:?}: {1}")]
    Sequence(SequenceKind, String),
    #[error("status error {0:?}: {1}")]
    Status(StatusKind, String),
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    #[error("engine failure {0:?}: {1}")]
    Engine(EngineFailureKind, String),
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
}

impl DomainError {
    pub fn sequence(kind: SequenceKind, detail: impl Into<String>) -> Self {
        Self::Sequence(kind, detail.into())
    }
    pub fn status(kind: StatusKind, detail: impl Into<String>) -> Self {
        Self::Status(kind, detail.into())
    }
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn engine(kind: EngineFailureKind, detail: impl Into<String>) -> Self {
        Self::Engine(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    /// True for failures raised by the hand engine rather than the caller.
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Self::Engine(..))
    }
}
