//! Hand engine trait definition.

use std::fmt;

use crate::domain::bidding::{BidCall, BidOutcome, Contract};
use crate::domain::state::Seat;
use crate::domain::tricks::{TrickPlay, TrickSummary};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, EngineFailureKind, ValidationKind};

/// Errors raised by a hand engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A submitted call, discard or card is not legal for the hand.
    Illegal(String),
    /// No legal suggestion exists.
    NoLegalMove(String),
    /// Hand contents no longer add up.
    HandIntegrity(String),
    /// The engine is in a state that cannot serve the request.
    Internal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Illegal(msg) => write!(f, "illegal move: {msg}"),
            EngineError::NoLegalMove(msg) => write!(f, "no legal move: {msg}"),
            EngineError::HandIntegrity(msg) => write!(f, "hand integrity: {msg}"),
            EngineError::Internal(msg) => write!(f, "engine internal error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<EngineError> for DomainError {
    fn from(err: EngineError) -> Self {
        match err {
            // A refused submission is the caller's mistake, not an engine outage.
            EngineError::Illegal(msg) => DomainError::validation(ValidationKind::IllegalMove, msg),
            EngineError::NoLegalMove(msg) => {
                DomainError::engine(EngineFailureKind::NoLegalMove, msg)
            }
            EngineError::HandIntegrity(msg) => {
                DomainError::engine(EngineFailureKind::HandIntegrity, msg)
            }
            EngineError::Internal(msg) => DomainError::engine(EngineFailureKind::Internal, msg),
        }
    }
}

/// Everything a hand engine is told when a deal is created.
#[derive(Debug, Clone)]
pub struct DealSetup {
    pub game: usize,
    pub deal: usize,
    pub dealer: Seat,
    pub hands: [Vec<Card>; 4],
    pub turn_card: Card,
    pub buried: Vec<Card>,
}

#[derive(Debug, Clone, Copy)]
pub struct BidContext {
    pub seat: Seat,
    pub round: u8,
    pub dealer: Seat,
    pub turn_card: Card,
}

#[derive(Debug, Clone, Copy)]
pub struct SwapContext {
    pub dealer: Seat,
    pub turn_card: Card,
    pub contract: Contract,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub seat: Seat,
    pub trick: u8,
    pub trump: Suit,
    /// Effective suit led, if a card is already down.
    pub led: Option<Suit>,
    pub played: &'a [TrickPlay],
}

/// Capability interface to whatever decides and validates card choices.
///
/// Every `suggest_or_validate_*` method takes an optional proposal: `None`
/// asks for a suggestion and must leave the engine untouched; `Some`
/// validates the proposal and, when legal, commits it to the engine's hands.
/// A rejected proposal must not change engine state.
pub trait HandEngine: Send {
    fn suggest_or_validate_bid(
        &mut self,
        ctx: &BidContext,
        call: Option<BidCall>,
    ) -> Result<BidOutcome, EngineError>;

    /// Returns the discard; on commit the turn card replaces it in the dealer's hand.
    fn suggest_or_validate_swap(
        &mut self,
        ctx: &SwapContext,
        discard: Option<Card>,
    ) -> Result<Card, EngineError>;

    fn suggest_or_validate_play(
        &mut self,
        ctx: &PlayContext<'_>,
        card: Option<Card>,
    ) -> Result<Card, EngineError>;

    fn prepare_for_play(&mut self, contract: &Contract) -> Result<(), EngineError>;

    fn check_hand_integrity(&self) -> Result<(), EngineError>;

    fn finalize_trick(&mut self, summary: &TrickSummary) -> Result<(), EngineError>;
}

/// Creates one [`HandEngine`] per deal.
pub trait EngineFactory: Send + Sync {
    fn new_deal(&self, setup: DealSetup) -> Result<Box<dyn HandEngine>, EngineError>;
}
