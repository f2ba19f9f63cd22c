//! Card codec: translations between the three card numbering domains.
//!
//! - **Deck position** (0..24): index into a deal's card array. Positions
//!   0-4, 5-9, 10-14 and 15-19 are the hands of seats 0..3 (seat 3 deals),
//!   20 is the turn card, 21-23 are buried.
//! - **Wire card id** (0..24): suit-major, `suit * 6 + rank`
//!   (9C, 10C, JC, QC, KC, AC, 9D, ... AS). Exchanged with the caller and
//!   stored in the deck array.
//! - **Play token** (0..24): `rank * 4 + suit_code`, where the protocol suit
//!   codes run spades=0, hearts=1, diamonds=2, clubs=3. A [`Card`] is the
//!   decoded form the trick evaluator and hand engine work with.
//!
//! All numbering arithmetic lives here. Everything else converts through
//! [`CardCodec`] and [`DeckLayout`].

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

pub const DECK_SIZE: usize = 24;
pub const HAND_SIZE: usize = 5;
pub const TURN_CARD_POS: u8 = 20;
pub const DEALER_HAND: RangeInclusive<u8> = 15..=19;

const RANKS_PER_SUIT: u8 = 6;
const SUITS: u8 = 4;

/// Suit-major card id used on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WireCardId(u8);

impl WireCardId {
    pub fn new(raw: i32) -> Result<Self, DomainError> {
        if (0..DECK_SIZE as i32).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(DomainError::validation(
                ValidationKind::InvalidCard,
                format!("card id out of range: {raw}"),
            ))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    fn printed(self) -> Card {
        let suit = Suit::ALL[(self.0 / RANKS_PER_SUIT) as usize];
        let rank = Rank::ALL[(self.0 % RANKS_PER_SUIT) as usize];
        Card { suit, rank }
    }
}

/// Index into the 24-slot deal array.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DeckPos(u8);

impl DeckPos {
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Seat holding this position at deal time; `None` for the kitty.
    pub fn seat(self) -> Option<Seat> {
        if (self.0 as usize) < HAND_SIZE * 4 {
            Some(self.0 / HAND_SIZE as u8)
        } else {
            None
        }
    }

    pub fn in_dealer_hand(self) -> bool {
        DEALER_HAND.contains(&self.0)
    }
}

/// Rank-major play-domain token, as exposed in the protocol tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PlayToken(u8);

impl PlayToken {
    pub fn new(raw: i32) -> Result<Self, DomainError> {
        if (0..DECK_SIZE as i32).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(DomainError::validation(
                ValidationKind::InvalidCard,
                format!("play token out of range: {raw}"),
            ))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn from_card(card: Card) -> Self {
        Self(card.rank.index() * SUITS + suit_code(card.suit))
    }

    pub fn card(self) -> Card {
        let rank = Rank::ALL[(self.0 / SUITS) as usize];
        let suit = suit_from_code(self.0 % SUITS);
        Card { suit, rank }
    }
}

/// Protocol suit code (clubs=3, diamonds=2, hearts=1, spades=0).
pub const fn suit_code(suit: Suit) -> u8 {
    SUITS - 1 - suit.index()
}

fn suit_from_code(code: u8) -> Suit {
    Suit::ALL[(SUITS - 1 - code) as usize]
}

/// Permutation tables handed to the caller at session creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolTables {
    /// `cards[wire id]` is the play token of that card.
    pub cards: [u8; DECK_SIZE],
    /// `suits[suit]` is the protocol suit code.
    pub suits: [u8; 4],
}

/// Bijection between wire ids and play tokens, built once per session.
#[derive(Debug, Clone)]
pub struct CardCodec {
    wire_to_token: [PlayToken; DECK_SIZE],
    token_to_wire: [WireCardId; DECK_SIZE],
}

impl CardCodec {
    pub fn new() -> Self {
        let mut wire_to_token = [PlayToken(0); DECK_SIZE];
        let mut token_to_wire = [WireCardId(0); DECK_SIZE];
        for raw in 0..DECK_SIZE as u8 {
            let wire = WireCardId(raw);
            let token = PlayToken::from_card(wire.printed());
            wire_to_token[raw as usize] = token;
            token_to_wire[token.0 as usize] = wire;
        }
        Self {
            wire_to_token,
            token_to_wire,
        }
    }

    pub fn tables(&self) -> ProtocolTables {
        let mut cards = [0u8; DECK_SIZE];
        for (slot, token) in cards.iter_mut().zip(self.wire_to_token.iter()) {
            *slot = token.value();
        }
        let mut suits = [0u8; 4];
        for suit in Suit::ALL {
            suits[suit.index() as usize] = suit_code(suit);
        }
        ProtocolTables { cards, suits }
    }

    pub fn wire_to_token(&self, wire: WireCardId) -> PlayToken {
        self.wire_to_token[wire.0 as usize]
    }

    pub fn token_to_wire(&self, token: PlayToken) -> WireCardId {
        self.token_to_wire[token.0 as usize]
    }

    /// Wire id to the play-domain card.
    pub fn to_play(&self, wire: WireCardId) -> Card {
        self.wire_to_token(wire).card()
    }

    /// Play-domain card back to its wire id.
    pub fn to_wire(&self, card: Card) -> WireCardId {
        self.token_to_wire(PlayToken::from_card(card))
    }
}

impl Default for CardCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated deck assignment with its wire id to position inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLayout {
    cards: [WireCardId; DECK_SIZE],
    positions: [DeckPos; DECK_SIZE],
}

impl DeckLayout {
    /// Accepts exactly 24 distinct wire ids.
    pub fn new(raw: &[i32]) -> Result<Self, DomainError> {
        if raw.len() != DECK_SIZE {
            return Err(DomainError::validation(
                ValidationKind::InvalidDeck,
                format!("deck must hold {DECK_SIZE} cards, got {}", raw.len()),
            ));
        }
        let mut cards = [WireCardId(0); DECK_SIZE];
        let mut positions = [DeckPos(0); DECK_SIZE];
        let mut seen = [false; DECK_SIZE];
        for (pos, &value) in raw.iter().enumerate() {
            let wire = WireCardId::new(value)?;
            if seen[wire.0 as usize] {
                return Err(DomainError::validation(
                    ValidationKind::InvalidDeck,
                    format!("card {value} dealt twice"),
                ));
            }
            seen[wire.0 as usize] = true;
            cards[pos] = wire;
            positions[wire.0 as usize] = DeckPos(pos as u8);
        }
        Ok(Self { cards, positions })
    }

    pub fn position_of(&self, wire: WireCardId) -> DeckPos {
        self.positions[wire.0 as usize]
    }

    pub fn hand(&self, seat: Seat) -> &[WireCardId] {
        let start = seat as usize * HAND_SIZE;
        &self.cards[start..start + HAND_SIZE]
    }

    pub fn turn_card(&self) -> WireCardId {
        self.cards[TURN_CARD_POS as usize]
    }

    pub fn buried(&self) -> &[WireCardId] {
        &self.cards[TURN_CARD_POS as usize + 1..]
    }

    /// The card must have been dealt into the dealer's hand (positions 15-19).
    pub fn require_dealer_card(&self, wire: WireCardId) -> Result<DeckPos, DomainError> {
        let pos = self.position_of(wire);
        if pos.in_dealer_hand() {
            Ok(pos)
        } else {
            let holder = match pos.seat() {
                Some(seat) => format!("seat {seat}'s hand"),
                None => "the kitty".to_string(),
            };
            Err(DomainError::validation(
                ValidationKind::CardNotInDealerHand,
                format!(
                    "card {} sits at deck position {} in {holder}, not the dealer's hand",
                    wire.0,
                    pos.value()
                ),
            ))
        }
    }
}
