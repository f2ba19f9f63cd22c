//! Property tests for whole deals driven by engine suggestions.
//!
//! Properties tested:
//! - Tricks won sum to exactly 5 and each seat's count stays in 0..=5
//! - A lone caller's partner never plays and never wins a trick
//! - Each trick's lead is the previous trick's winner

use proptest::prelude::*;

use crate::domain::codec::{CardCodec, DeckLayout};
use crate::domain::scoring::StandardScoring;
use crate::domain::test_gens;
use crate::domain::test_prelude::{self, call_at, new_deal, play_out_trick};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_tricks_won_sum_to_five(
        raw in test_gens::deck_assignment(),
        seed in any::<u64>(),
        caller in test_gens::seat(),
        alone in any::<bool>(),
    ) {
        let codec = CardCodec::new();
        let layout = DeckLayout::new(&raw).unwrap();
        let turn_suit = codec.to_play(layout.turn_card()).suit;
        let mut deal = new_deal(layout, seed);
        call_at(&mut deal, &codec, 0, caller, turn_suit.index() as i32, alone).unwrap();
        let sitting_out = deal.contract().unwrap().sitting_out();

        let mut previous_winner = None;
        for index in 0..5 {
            let summary = play_out_trick(&mut deal, &codec, index).unwrap();
            if let Some(prev) = previous_winner {
                prop_assert_eq!(summary.lead, prev);
            }
            prop_assert!(Some(summary.winner) != sitting_out);
            let trick = &deal.tricks()[index];
            prop_assert!(trick.plays.iter().all(|p| Some(p.seat) != sitting_out));
            previous_winner = Some(summary.winner);
        }

        let summary = deal.complete(&StandardScoring).unwrap();
        prop_assert_eq!(summary.tricks_won.iter().sum::<u8>(), 5);
        prop_assert!(summary.tricks_won.iter().all(|&n| n <= 5));
        let points = summary.score.unwrap().team_points;
        prop_assert!(points[0] == 0 || points[1] == 0);
    }
}
