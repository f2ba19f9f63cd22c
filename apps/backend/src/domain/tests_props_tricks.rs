//! Property tests for trick resolution (pure domain).
//!
//! Properties tested:
//! - The recorded winner holds the highest value among the cards played
//! - The lead card always scores, so some seat always wins
//! - Bower reclassification round-trips to the printed card

use proptest::prelude::*;

use crate::domain::cards_logic::{reclassify, unclassify, NON_WINNING};
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::tricks::Trick;
use crate::domain::{Card, Rank, Suit};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_winner_holds_highest_value(
        cards in test_gens::distinct_cards(4),
        trump in test_gens::suit(),
        lead in test_gens::seat(),
    ) {
        let mut trick = Trick::new(0, lead, None);
        let order = trick.order();
        for (slot, &card) in cards.iter().enumerate() {
            trick.check_play(slot as u8, order[slot]).unwrap();
            trick.record(slot as u8, order[slot], card, trump);
        }
        let summary = trick.summary().unwrap();
        let best = trick.plays.iter().map(|p| p.value).max().unwrap();
        let winners: Vec<_> = trick.plays.iter().filter(|p| p.value == best).collect();

        prop_assert!(trick.plays[0].value > NON_WINNING);
        prop_assert_eq!(winners.len(), 1);
        prop_assert_eq!(winners[0].seat, summary.winner);
        prop_assert_eq!(trick.best_value, best);
    }

    #[test]
    fn prop_trump_jack_beats_everything(
        others in test_gens::distinct_cards(4),
        trump in test_gens::suit(),
        position in 0usize..4,
    ) {
        let right = Card::new(trump, Rank::Jack);
        let mut cards: Vec<Card> = others.into_iter().filter(|&c| c != right).take(3).collect();
        cards.insert(position, right);

        let mut trick = Trick::new(0, 0, None);
        for (slot, &card) in cards.iter().enumerate() {
            trick.record(slot as u8, slot as u8, card, trump);
        }
        prop_assert_eq!(trick.summary().unwrap().winner, position as u8);
    }

    #[test]
    fn prop_reclassify_round_trips(card in test_gens::distinct_cards(1), trump in test_gens::suit()) {
        let card = card[0];
        prop_assert_eq!(unclassify(reclassify(card, trump), trump), card);
    }
}

#[test]
fn left_bower_joins_trump_for_every_suit() {
    for trump in Suit::ALL {
        let left = Card::new(trump.same_color(), Rank::Jack);
        assert_eq!(reclassify(left, trump).suit, trump);
    }
}
