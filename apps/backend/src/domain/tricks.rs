use serde::Serialize;
use tracing::warn;

use crate::domain::cards_logic::{card_value, reclassify, unclassify};
use crate::domain::state::{nth_from, Seat, Status, PLAYERS};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, SequenceKind, StatusKind, ValidationKind};

/// One card laid into a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickPlay {
    pub slot: u8,
    pub seat: Seat,
    /// Printed card.
    pub card: Card,
    /// Comparable value after bower reclassification.
    pub value: u8,
}

/// Result of laying a card, describing the trick after the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub slot: u8,
    pub seat: Seat,
    /// Printed card, bowers already turned back into jacks.
    pub card: Card,
    pub value: u8,
    pub winning_seat: Seat,
    /// Every seat that plays this trick has played.
    pub trick_ready: bool,
}

/// Closing summary handed to the hand engine and the deal's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickSummary {
    pub index: u8,
    pub lead: Seat,
    pub winner: Seat,
    #[serde(skip)]
    pub led: Option<Suit>,
    pub cards_played: u8,
}

/// Seats in play order for a trick led by `lead`.
pub fn play_order(lead: Seat) -> [Seat; PLAYERS] {
    [0, 1, 2, 3].map(|n| nth_from(lead, n))
}

#[derive(Debug, Clone)]
pub struct Trick {
    pub index: u8,
    pub status: Status,
    pub lead: Seat,
    /// Cards played so far.
    pub played: u8,
    /// Effective suit of the first card.
    pub led: Option<Suit>,
    pub best_value: u8,
    pub winning_seat: Option<Seat>,
    pub plays: Vec<TrickPlay>,
    /// Lowest slot still open.
    next_slot: u8,
    /// Partner of a lone caller.
    sitting_out: Option<Seat>,
}

impl Trick {
    pub fn new(index: u8, lead: Seat, sitting_out: Option<Seat>) -> Self {
        Self {
            index,
            status: Status::Active,
            lead,
            played: 0,
            led: None,
            best_value: 0,
            winning_seat: None,
            plays: Vec::with_capacity(PLAYERS),
            next_slot: 0,
            sitting_out,
        }
    }

    pub fn order(&self) -> [Seat; PLAYERS] {
        play_order(self.lead)
    }

    /// Next slot a seat is expected to fill, skipping a lone caller's partner.
    pub fn expected_slot(&self) -> Option<u8> {
        let order = self.order();
        (self.next_slot..PLAYERS as u8).find(|&slot| Some(order[slot as usize]) != self.sitting_out)
    }

    /// Every seat that plays this trick has played.
    pub fn is_ready(&self) -> bool {
        self.expected_slot().is_none()
    }

    /// Validates a play request without touching state.
    ///
    /// A slot ahead of the expected one is accepted, but every skipped slot
    /// must be recorded before it (the deal autoplays them); a slot behind it
    /// is a protocol violation.
    pub fn check_play(&self, slot: u8, seat: Seat) -> Result<(), DomainError> {
        if !self.status.is_active() {
            return Err(DomainError::status(
                StatusKind::TrickInactive,
                format!("trick {} is complete", self.index),
            ));
        }
        if slot as usize >= PLAYERS {
            return Err(DomainError::sequence(
                SequenceKind::Play,
                format!("play sequence out of range: {slot}"),
            ));
        }
        let Some(expected) = self.expected_slot() else {
            return Err(DomainError::sequence(
                SequenceKind::Play,
                format!("trick {} has no open slots", self.index),
            ));
        };
        if slot < expected {
            return Err(DomainError::sequence(
                SequenceKind::Play,
                format!("play sequence {slot} is behind expected {expected}"),
            ));
        }
        let scheduled = self.order()[slot as usize];
        if Some(scheduled) == self.sitting_out || Some(seat) == self.sitting_out {
            return Err(DomainError::validation(
                ValidationKind::SkippedSeat,
                format!("seat {scheduled} sits out this deal"),
            ));
        }
        if scheduled != seat {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("slot {slot} belongs to seat {scheduled}, not seat {seat}"),
            ));
        }
        Ok(())
    }

    /// Lays a card that has passed [`Trick::check_play`] and the hand engine.
    pub fn record(&mut self, slot: u8, seat: Seat, card: Card, trump: Suit) -> PlayOutcome {
        if self.expected_slot().is_some_and(|expected| slot > expected) {
            warn!(trick = self.index, slot, "slot recorded ahead of an open one");
        }

        let tc = reclassify(card, trump);
        let led = *self.led.get_or_insert(tc.suit);
        let value = card_value(tc, led, trump);
        if self.winning_seat.is_none() || value > self.best_value {
            self.best_value = value;
            self.winning_seat = Some(seat);
        }

        let printed = unclassify(tc, trump);
        self.plays.push(TrickPlay {
            slot,
            seat,
            card: printed,
            value,
        });
        self.played += 1;
        self.next_slot = slot + 1;

        PlayOutcome {
            slot,
            seat,
            card: printed,
            value,
            winning_seat: self.winning_seat.unwrap_or(seat),
            trick_ready: self.is_ready(),
        }
    }

    /// Summary for completion; the trick must be ready.
    pub fn summary(&self) -> Result<TrickSummary, DomainError> {
        if !self.status.is_active() {
            return Err(DomainError::status(
                StatusKind::TrickInactive,
                format!("trick {} is already complete", self.index),
            ));
        }
        let winner = match self.winning_seat {
            Some(w) if self.is_ready() => w,
            _ => {
                return Err(DomainError::status(
                    StatusKind::TrickIncomplete,
                    format!("trick {} still has cards to be played", self.index),
                ))
            }
        };
        Ok(TrickSummary {
            index: self.index,
            lead: self.lead,
            winner,
            led: self.led,
            cards_played: self.played,
        })
    }

    pub fn mark_complete(&mut self) {
        self.status = Status::Complete;
    }
}
