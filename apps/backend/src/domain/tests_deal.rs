use crate::domain::bidding::{BidCall, CallStrength};
use crate::domain::codec::CardCodec;
use crate::domain::deal::DealPhase;
use crate::domain::scoring::StandardScoring;
use crate::domain::state::Status;
use crate::domain::test_prelude::{call_at, new_deal, ordered_layout, play_out_trick, wire};
use crate::domain::Suit;
use crate::errors::domain::{DomainError, SequenceKind, StatusKind, ValidationKind};

const SPADES: i32 = 3;
const HEARTS: i32 = 2;

#[test]
fn bids_follow_counter_and_turn_card() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    let turn = wire(20);

    assert!(matches!(
        deal.bid(&codec, 0, 1, turn, Some(BidCall::Pass)),
        Err(DomainError::Sequence(SequenceKind::Bid, _))
    ));
    assert!(matches!(
        deal.bid(&codec, 0, 0, wire(21), Some(BidCall::Pass)),
        Err(DomainError::Validation(ValidationKind::TurnCardMismatch, _))
    ));

    // A suggestion leaves the counter alone.
    let suggestion = deal.bid(&codec, 0, 0, turn, None).unwrap();
    assert_eq!(suggestion.strength, CallStrength::Pass);
    assert_eq!(deal.summary().bids_made, 0);
    assert_eq!(deal.phase(), DealPhase::Dealt);

    deal.bid(&codec, 0, 0, turn, Some(BidCall::Pass)).unwrap();
    assert_eq!(deal.phase(), DealPhase::Bidding);
    assert!(matches!(
        deal.bid(&codec, 0, 0, turn, Some(BidCall::Pass)),
        Err(DomainError::Sequence(SequenceKind::Bid, _))
    ));
}

#[test]
fn round_zero_call_must_name_turn_suit() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    let err = call_at(&mut deal, &codec, 0, 0, HEARTS, false).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::IllegalMove, _)
    ));
    assert_eq!(deal.summary().bids_made, 0);
    assert!(deal.contract().is_none());
}

#[test]
fn eight_passes_throw_the_deal_in() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    let turn = wire(20);
    for n in 0..8u8 {
        deal.bid(&codec, n / 4, n % 4, turn, Some(BidCall::Pass))
            .unwrap();
    }
    assert_eq!(deal.phase(), DealPhase::AllPassed);
    assert!(matches!(
        deal.bid(&codec, 2, 0, turn, Some(BidCall::Pass)),
        Err(DomainError::Status(StatusKind::PhaseMismatch, _))
    ));
    assert!(matches!(
        deal.create_trick(0),
        Err(DomainError::Status(StatusKind::PhaseMismatch, _))
    ));

    let summary = deal.complete(&StandardScoring).unwrap();
    assert_eq!(summary.tricks_won, [0; 4]);
    assert_eq!(summary.score.unwrap().team_points, [0, 0]);
    assert!(deal.engine_released());
}

#[test]
fn kitty_card_outside_dealer_hand_is_rejected_without_mutation() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    call_at(&mut deal, &codec, 0, 0, SPADES, false).unwrap();
    assert_eq!(deal.phase(), DealPhase::KittyExchange);
    let turn = wire(20);

    // Wire 10 was dealt to deck position 10, seat 2's hand.
    assert!(matches!(
        deal.swap(&codec, 0, turn, 3, Some(wire(10))),
        Err(DomainError::Validation(ValidationKind::CardNotInDealerHand, _))
    ));
    assert_eq!(deal.phase(), DealPhase::KittyExchange);

    let suggested = deal.swap(&codec, 0, turn, 3, None).unwrap();
    assert_eq!(suggested, wire(15));
    assert_eq!(deal.phase(), DealPhase::KittyExchange);

    let swapped = deal.swap(&codec, 0, turn, 3, Some(wire(15))).unwrap();
    assert_eq!(swapped, wire(15));
    assert_eq!(deal.phase(), DealPhase::Declared);

    assert!(matches!(
        deal.swap(&codec, 0, turn, 3, Some(wire(16))),
        Err(DomainError::Status(StatusKind::PhaseMismatch, _))
    ));
}

#[test]
fn kitty_exchange_checks_seat_declarer_and_turn_card() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    call_at(&mut deal, &codec, 0, 1, SPADES, false).unwrap();
    let turn = wire(20);

    assert!(matches!(
        deal.swap(&codec, 1, turn, 2, Some(wire(15))),
        Err(DomainError::Validation(ValidationKind::InvalidSeat, _))
    ));
    assert!(matches!(
        deal.swap(&codec, 0, turn, 3, Some(wire(15))),
        Err(DomainError::Validation(ValidationKind::DeclarerMismatch, _))
    ));
    assert!(matches!(
        deal.swap(&codec, 1, wire(19), 3, Some(wire(15))),
        Err(DomainError::Validation(ValidationKind::TurnCardMismatch, _))
    ));
    deal.swap(&codec, 1, turn, 3, Some(wire(19))).unwrap();
}

#[test]
fn round_one_call_skips_the_exchange() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    call_at(&mut deal, &codec, 1, 2, HEARTS, false).unwrap();
    assert_eq!(deal.phase(), DealPhase::Declared);
    let contract = *deal.contract().unwrap();
    assert_eq!(contract.declarer, 2);
    assert_eq!(contract.trump, Suit::Hearts);
    assert_eq!(contract.round, 1);
    assert_eq!(deal.summary().left_bower, Some(Suit::Diamonds.index()));
    assert!(matches!(
        deal.swap(&codec, 2, wire(20), 3, Some(wire(15))),
        Err(DomainError::Status(StatusKind::PhaseMismatch, _))
    ));
}

#[test]
fn defense_is_limited_to_defenders() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    assert!(matches!(
        deal.defense(1, true),
        Err(DomainError::Status(StatusKind::PhaseMismatch, _))
    ));
    call_at(&mut deal, &codec, 0, 0, SPADES, true).unwrap();

    let echo = deal.defense(1, true).unwrap();
    assert_eq!((echo.seat, echo.alone), (1, true));
    assert!(matches!(
        deal.defense(2, false),
        Err(DomainError::Validation(ValidationKind::NotADefender, _))
    ));
}

#[test]
fn trick_creation_is_sequenced() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    call_at(&mut deal, &codec, 1, 0, HEARTS, false).unwrap();

    assert!(matches!(
        deal.create_trick(1),
        Err(DomainError::Sequence(SequenceKind::Trick, _))
    ));
    assert_eq!(deal.create_trick(0).unwrap().lead, 0);
    assert_eq!(deal.phase(), DealPhase::Playing);
    assert!(matches!(
        deal.create_trick(0),
        Err(DomainError::Sequence(SequenceKind::Trick, _))
    ));
    assert!(matches!(
        deal.create_trick(1),
        Err(DomainError::Status(StatusKind::PreviousActive, _))
    ));
    assert!(matches!(
        deal.complete_trick(0),
        Err(DomainError::Status(StatusKind::TrickIncomplete, _))
    ));
    assert!(matches!(
        deal.complete(&StandardScoring),
        Err(DomainError::Status(StatusKind::TrickIncomplete, _))
    ));
}

#[test]
fn illegal_card_is_refused_and_trick_unchanged() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 1);
    call_at(&mut deal, &codec, 0, 0, SPADES, false).unwrap();
    deal.create_trick(0).unwrap();

    let suggestion = deal.play(&codec, 0, 0, 0, None).unwrap();
    assert!(!suggestion.committed);
    assert_eq!(deal.tricks()[0].played, 0);

    // Seat 0 leads 9C; seat 1 holds AC and must follow.
    deal.play(&codec, 0, 0, 0, Some(wire(0))).unwrap();
    assert!(matches!(
        deal.play(&codec, 0, 1, 1, Some(wire(6))),
        Err(DomainError::Validation(ValidationKind::IllegalMove, _))
    ));
    assert!(matches!(
        deal.play(&codec, 0, 1, 1, Some(wire(23))),
        Err(DomainError::Validation(ValidationKind::IllegalMove, _))
    ));
    assert_eq!(deal.tricks()[0].played, 1);

    let result = deal.play(&codec, 0, 1, 1, Some(wire(5))).unwrap();
    assert!(result.committed);
    assert_eq!(result.winning_seat, Some(1));
    assert!(matches!(
        deal.play(&codec, 1, 2, 2, Some(wire(12))),
        Err(DomainError::Sequence(SequenceKind::Trick, _))
    ));
}

#[test]
fn forward_jump_autoplays_skipped_seat_and_deal_still_scores() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 5);
    call_at(&mut deal, &codec, 0, 0, SPADES, false).unwrap();
    deal.create_trick(0).unwrap();

    // Seat 0 leads 9C; seat 2 answers at slot 2 before seat 1 has played.
    deal.play(&codec, 0, 0, 0, Some(wire(0))).unwrap();

    // A refused card after the jump keeps the autoplay; seat 1 held only AC in clubs.
    assert!(matches!(
        deal.play(&codec, 0, 2, 2, Some(wire(0))),
        Err(DomainError::Validation(ValidationKind::IllegalMove, _))
    ));
    let trick = &deal.tricks()[0];
    assert_eq!(trick.played, 2);
    assert_eq!((trick.plays[1].slot, trick.plays[1].seat), (1, 1));
    assert_eq!(codec.to_wire(trick.plays[1].card), wire(5));
    assert_eq!(trick.expected_slot(), Some(2));

    let played = deal.play(&codec, 0, 2, 2, Some(wire(10))).unwrap();
    assert!(played.committed);
    assert!(!played.trick_ready);
    assert!(matches!(
        deal.play(&codec, 0, 1, 1, Some(wire(6))),
        Err(DomainError::Sequence(SequenceKind::Play, _))
    ));

    // Seat 3 plays in turn and the trick closes with four cards.
    let last = deal.play(&codec, 0, 3, 3, None).unwrap();
    deal.play(&codec, 0, 3, 3, Some(last.card)).unwrap();
    assert_eq!(deal.tricks()[0].played, 4);
    let lead = deal.complete_trick(0).unwrap().winner;

    assert_eq!(play_out_trick(&mut deal, &codec, 1).unwrap().lead, lead);
    for index in 2..5 {
        play_out_trick(&mut deal, &codec, index).unwrap();
    }
    let summary = deal.complete(&StandardScoring).unwrap();
    assert_eq!(summary.tricks_won.iter().sum::<u8>(), 5);
    assert!(deal.engine_released());
}

#[test]
fn jump_to_last_slot_fills_every_open_slot_in_order() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 11);
    call_at(&mut deal, &codec, 1, 1, HEARTS, false).unwrap();
    deal.create_trick(0).unwrap();

    // Seat 3 answers first at slot 3; seats 0, 1 and 2 are autoplayed before it.
    let suggestion = deal.play(&codec, 0, 3, 3, None).unwrap();
    assert!(!suggestion.committed);
    assert_eq!(deal.tricks()[0].played, 0);

    // Seat 0 holds only clubs and seat 3 none, so QH is legal whatever was led.
    let played = deal.play(&codec, 0, 3, 3, Some(wire(15))).unwrap();
    assert!(played.trick_ready);
    let order: Vec<_> = deal.tricks()[0]
        .plays
        .iter()
        .map(|p| (p.slot, p.seat))
        .collect();
    assert_eq!(order, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    assert!(deal.tricks()[0].is_ready());
    deal.complete_trick(0).unwrap();
}

#[test]
fn full_deal_tallies_five_tricks_and_releases_engine() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 9);
    call_at(&mut deal, &codec, 0, 0, SPADES, false).unwrap();
    deal.swap(&codec, 0, wire(20), 3, Some(wire(15))).unwrap();

    let mut lead = 0;
    for index in 0..5 {
        assert_eq!(deal.create_trick(index).unwrap().lead, lead);
        while let Some(slot) = deal.tricks()[index].expected_slot() {
            let seat = deal.tricks()[index].order()[slot as usize];
            let suggestion = deal.play(&codec, index, slot, seat, None).unwrap();
            deal.play(&codec, index, slot, seat, Some(suggestion.card))
                .unwrap();
        }
        lead = deal.complete_trick(index).unwrap().winner;
    }

    assert!(matches!(
        deal.create_trick(5),
        Err(DomainError::Sequence(SequenceKind::Trick, _))
    ));
    let summary = deal.complete(&StandardScoring).unwrap();
    assert_eq!(summary.tricks_won.iter().sum::<u8>(), 5);
    assert_eq!(summary.trick_winners.len(), 5);
    assert_eq!(summary.status, Status::Complete);
    assert_eq!(deal.led_history().len(), 5);
    assert!(deal.engine_released());

    assert!(matches!(
        deal.complete(&StandardScoring),
        Err(DomainError::Status(StatusKind::DealInactive, _))
    ));
    assert!(matches!(
        deal.create_trick(5),
        Err(DomainError::Status(StatusKind::DealInactive, _))
    ));
}

#[test]
fn lone_caller_partner_never_plays() {
    let codec = CardCodec::new();
    let mut deal = new_deal(ordered_layout(), 3);
    call_at(&mut deal, &codec, 0, 0, SPADES, true).unwrap();
    assert_eq!(deal.contract().unwrap().sitting_out(), Some(2));

    for index in 0..5 {
        play_out_trick(&mut deal, &codec, index).unwrap();
        let trick = &deal.tricks()[index];
        assert_eq!(trick.played, 3);
        assert!(trick.plays.iter().all(|p| p.seat != 2));
    }
    let summary = deal.complete(&StandardScoring).unwrap();
    assert_eq!(summary.tricks_won[2], 0);
    assert_eq!(summary.tricks_won.iter().sum::<u8>(), 5);
}
