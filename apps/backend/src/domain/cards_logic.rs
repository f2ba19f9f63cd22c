//! Card game logic: bower reclassification, effective suits, card strength

use super::cards_types::{Card, Rank, Suit};

/// Rank inside a trick once bowers are reclassified.
///
/// `LeftBower` and `RightBower` only ever occur on trump-suit cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TrickRank {
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    LeftBower,
    RightBower,
}

impl From<Rank> for TrickRank {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Nine => TrickRank::Nine,
            Rank::Ten => TrickRank::Ten,
            Rank::Jack => TrickRank::Jack,
            Rank::Queen => TrickRank::Queen,
            Rank::King => TrickRank::King,
            Rank::Ace => TrickRank::Ace,
        }
    }
}

/// A card as it competes in a trick: effective suit and reclassified rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TrickCard {
    pub suit: Suit,
    pub rank: TrickRank,
}

/// Value of a card that cannot win the trick.
pub const NON_WINNING: u8 = 0;
const LEAD_BASE: u8 = 10;
const TRUMP_BASE: u8 = 20;

/// Jack of trump becomes the right bower; the same-color jack becomes the
/// left bower and joins the trump suit. Every other card is unchanged.
pub fn reclassify(card: Card, trump: Suit) -> TrickCard {
    match card.rank {
        Rank::Jack if card.suit == trump => TrickCard {
            suit: trump,
            rank: TrickRank::RightBower,
        },
        Rank::Jack if card.suit == trump.same_color() => TrickCard {
            suit: trump,
            rank: TrickRank::LeftBower,
        },
        rank => TrickCard {
            suit: card.suit,
            rank: rank.into(),
        },
    }
}

/// Inverse of [`reclassify`]: bowers go back to printed jacks.
pub fn unclassify(card: TrickCard, trump: Suit) -> Card {
    let (suit, rank) = match card.rank {
        TrickRank::RightBower => (trump, Rank::Jack),
        TrickRank::LeftBower => (trump.same_color(), Rank::Jack),
        TrickRank::Nine => (card.suit, Rank::Nine),
        TrickRank::Ten => (card.suit, Rank::Ten),
        TrickRank::Jack => (card.suit, Rank::Jack),
        TrickRank::Queen => (card.suit, Rank::Queen),
        TrickRank::King => (card.suit, Rank::King),
        TrickRank::Ace => (card.suit, Rank::Ace),
    };
    Card { suit, rank }
}

/// Suit a card counts as once trump is known.
pub fn effective_suit(card: Card, trump: Suit) -> Suit {
    reclassify(card, trump).suit
}

/// Comparable strength of a reclassified card within a trick.
///
/// Trump always outranks non-trump; non-trump cards only score when they
/// follow the suit led; anything else is `NON_WINNING`.
pub fn card_value(card: TrickCard, led: Suit, trump: Suit) -> u8 {
    if card.suit == trump {
        TRUMP_BASE + card.rank as u8
    } else if card.suit == led {
        LEAD_BASE + card.rank as u8
    } else {
        NON_WINNING
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit, trump: Suit) -> bool {
    hand.iter().any(|&c| effective_suit(c, trump) == suit)
}

pub fn card_beats(a: Card, b: Card, led: Suit, trump: Suit) -> bool {
    card_value(reclassify(a, trump), led, trump) > card_value(reclassify(b, trump), led, trump)
}
