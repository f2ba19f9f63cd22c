//! Deck assignments in wire ids, indexed by deck position.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Wire order: seat 0 = 9C..KC, seat 1 = AC 9D 10D JD QD,
/// seat 2 = KD AD 9H 10H JH, seat 3 = QH KH AH 9S 10S,
/// turn card JS (wire 20), buried QS KS AS.
pub fn ordered() -> Vec<i32> {
    (0..24).collect()
}

pub fn shuffled(seed: u64) -> Vec<i32> {
    let mut deck = ordered();
    deck.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    deck
}

pub fn turn_card(deck: &[i32]) -> i32 {
    deck[20]
}

/// Bid suit code (0 clubs .. 3 spades) of a wire id.
pub fn suit_code(wire: i32) -> i32 {
    wire / 6
}
