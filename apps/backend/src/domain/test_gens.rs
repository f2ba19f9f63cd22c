// Proptest generators for domain types.
// Cards are drawn from a shuffled deck so every generated hand or trick is
// duplicate-free by construction.

use proptest::prelude::*;

use crate::domain::state::Seat;
use crate::domain::{full_deck, Card, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..4
}

/// `n` distinct cards.
pub fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck())
        .prop_shuffle()
        .prop_map(move |deck| deck[..n].to_vec())
}

/// A full 24-card deck assignment in wire ids.
pub fn deck_assignment() -> impl Strategy<Value = Vec<i32>> {
    Just((0..24).collect::<Vec<i32>>()).prop_shuffle()
}
