//! Error codes for the euchre backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the euchre backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Sequencing
    /// Game index does not match the next expected slot
    GameSequence,
    /// Deal index does not match the next expected slot
    DealSequence,
    /// Trick index does not match the next expected slot
    TrickSequence,
    /// Bid round/seat does not match the next expected bid
    BidSequence,
    /// Play sequence number went backwards
    PlaySequence,

    // Status
    /// Session is not active
    SessionInactive,
    /// Game is not active
    GameInactive,
    /// Deal is not active
    DealInactive,
    /// Trick is not active
    TrickInactive,
    /// Previous sibling still active
    PreviousActive,
    /// Deal is in the wrong phase for this operation
    PhaseMismatch,
    /// Trick still has cards to be played
    TrickIncomplete,

    // Request Validation
    /// Card id out of range or unknown
    InvalidCard,
    /// Deck assignment is not a permutation of the 24 cards
    InvalidDeck,
    /// Invalid seat number
    InvalidSeat,
    /// Invalid suit code
    InvalidSuit,
    /// Invalid request status value
    InvalidStatus,
    /// Invalid bid
    InvalidBid,
    /// Discard not in the dealer's hand positions
    CardNotInDealerHand,
    /// Turn card does not match the deal
    TurnCardMismatch,
    /// Declarer seat does not match the contract
    DeclarerMismatch,
    /// Out of turn
    OutOfTurn,
    /// Seat sits out this deal
    SkippedSeat,
    /// Seat is not on the defending team
    NotADefender,
    /// Move refused by the hand engine
    IllegalMove,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Session not found
    SessionNotFound,
    /// Game not found
    GameNotFound,
    /// Deal not found
    DealNotFound,
    /// Trick not found
    TrickNotFound,

    // Conflicts
    /// Session token already in use
    SessionExists,

    // Engine
    /// Hand engine rejected or failed the request
    EngineFailure,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GameSequence => "GAME_SEQUENCE",
            Self::DealSequence => "DEAL_SEQUENCE",
            Self::TrickSequence => "TRICK_SEQUENCE",
            Self::BidSequence => "BID_SEQUENCE",
            Self::PlaySequence => "PLAY_SEQUENCE",

            Self::SessionInactive => "SESSION_INACTIVE",
            Self::GameInactive => "GAME_INACTIVE",
            Self::DealInactive => "DEAL_INACTIVE",
            Self::TrickInactive => "TRICK_INACTIVE",
            Self::PreviousActive => "PREVIOUS_ACTIVE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::TrickIncomplete => "TRICK_INCOMPLETE",

            Self::InvalidCard => "INVALID_CARD",
            Self::InvalidDeck => "INVALID_DECK",
            Self::InvalidSeat => "INVALID_SEAT",
            Self::InvalidSuit => "INVALID_SUIT",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidBid => "INVALID_BID",
            Self::CardNotInDealerHand => "CARD_NOT_IN_DEALER_HAND",
            Self::TurnCardMismatch => "TURN_CARD_MISMATCH",
            Self::DeclarerMismatch => "DECLARER_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::SkippedSeat => "SKIPPED_SEAT",
            Self::NotADefender => "NOT_A_DEFENDER",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::DealNotFound => "DEAL_NOT_FOUND",
            Self::TrickNotFound => "TRICK_NOT_FOUND",

            Self::SessionExists => "SESSION_EXISTS",

            Self::EngineFailure => "ENGINE_FAILURE",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
