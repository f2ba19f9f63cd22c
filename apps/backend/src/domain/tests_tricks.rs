use crate::domain::cards_logic::NON_WINNING;
use crate::domain::tricks::Trick;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, SequenceKind, StatusKind, ValidationKind};

fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Plays `cards` in order from the lead, checking each play first.
fn play_all(trick: &mut Trick, trump: Suit, cards: &[Card]) -> Vec<Option<u8>> {
    let order = trick.order();
    cards
        .iter()
        .enumerate()
        .map(|(slot, &card)| {
            let slot = slot as u8;
            let seat = order[slot as usize];
            trick.check_play(slot, seat).expect("play in order");
            Some(trick.record(slot, seat, card, trump).winning_seat)
        })
        .collect()
}

#[test]
fn bowers_outrank_trump_ace_and_lead_suit() {
    let mut trick = Trick::new(0, 0, None);
    let winners = play_all(
        &mut trick,
        Suit::Clubs,
        &[
            c(Suit::Hearts, Rank::Ace),
            c(Suit::Spades, Rank::Jack),
            c(Suit::Clubs, Rank::Ace),
            c(Suit::Clubs, Rank::Jack),
        ],
    );
    assert_eq!(winners, vec![Some(0), Some(1), Some(1), Some(3)]);
    assert_eq!(trick.led, Some(Suit::Hearts));

    let summary = trick.summary().unwrap();
    assert_eq!(summary.winner, 3);
    assert_eq!(summary.cards_played, 4);
}

#[test]
fn third_suit_never_leads_regardless_of_rank() {
    let mut trick = Trick::new(0, 2, None);
    let winners = play_all(
        &mut trick,
        Suit::Clubs,
        &[
            c(Suit::Hearts, Rank::Nine),
            c(Suit::Diamonds, Rank::Ace),
            c(Suit::Hearts, Rank::King),
            c(Suit::Diamonds, Rank::King),
        ],
    );
    // Lead seat 2, then 3, 0, 1.
    assert_eq!(winners, vec![Some(2), Some(2), Some(0), Some(0)]);
    assert_eq!(trick.plays[1].value, NON_WINNING);
    assert_eq!(trick.plays[3].value, NON_WINNING);
}

#[test]
fn left_bower_led_counts_as_trump_lead() {
    let mut trick = Trick::new(1, 1, None);
    let order = trick.order();
    trick.check_play(0, order[0]).unwrap();
    let first = trick.record(0, order[0], c(Suit::Diamonds, Rank::Jack), Suit::Hearts);
    assert_eq!(trick.led, Some(Suit::Hearts));
    // The printed card comes back unchanged.
    assert_eq!(first.card, c(Suit::Diamonds, Rank::Jack));

    trick.check_play(1, order[1]).unwrap();
    let second = trick.record(1, order[1], c(Suit::Diamonds, Rank::Ace), Suit::Hearts);
    assert_eq!(second.value, NON_WINNING);
    assert_eq!(second.winning_seat, order[0]);
}

#[test]
fn lone_partner_slot_is_skipped() {
    // Seat 0 went alone; seat 2 sits out.
    let mut trick = Trick::new(0, 1, Some(2));
    assert_eq!(trick.order(), [1, 2, 3, 0]);
    assert_eq!(trick.expected_slot(), Some(0));

    trick.check_play(0, 1).unwrap();
    trick.record(0, 1, c(Suit::Hearts, Rank::Nine), Suit::Spades);
    assert_eq!(trick.expected_slot(), Some(2));

    assert!(matches!(
        trick.check_play(2, 2),
        Err(DomainError::Validation(ValidationKind::SkippedSeat, _))
    ));
    // Slot 1 belongs to the skipped seat and now lies behind the next open slot.
    assert!(matches!(
        trick.check_play(1, 2),
        Err(DomainError::Sequence(SequenceKind::Play, _))
    ));

    trick.check_play(2, 3).unwrap();
    trick.record(2, 3, c(Suit::Hearts, Rank::Ten), Suit::Spades);
    trick.check_play(3, 0).unwrap();
    let last = trick.record(3, 0, c(Suit::Hearts, Rank::Ace), Suit::Spades);

    assert!(last.trick_ready);
    assert_eq!(trick.played, 3);
    assert_eq!(trick.summary().unwrap().winner, 0);
}

#[test]
fn forward_skip_is_tolerated_backward_is_rejected() {
    let mut trick = Trick::new(0, 0, None);
    trick.check_play(1, 1).unwrap();
    trick.record(1, 1, c(Suit::Spades, Rank::Nine), Suit::Hearts);

    assert!(matches!(
        trick.check_play(0, 0),
        Err(DomainError::Sequence(SequenceKind::Play, _))
    ));
    assert!(matches!(
        trick.check_play(4, 0),
        Err(DomainError::Sequence(SequenceKind::Play, _))
    ));
    trick.check_play(2, 2).unwrap();
}

#[test]
fn wrong_seat_for_slot_is_out_of_turn() {
    let trick = Trick::new(0, 3, None);
    assert!(matches!(
        trick.check_play(0, 0),
        Err(DomainError::Validation(ValidationKind::OutOfTurn, _))
    ));
}

#[test]
fn summary_requires_ready_then_active() {
    let mut trick = Trick::new(0, 0, None);
    assert!(matches!(
        trick.summary(),
        Err(DomainError::Status(StatusKind::TrickIncomplete, _))
    ));

    play_all(
        &mut trick,
        Suit::Diamonds,
        &[
            c(Suit::Clubs, Rank::Nine),
            c(Suit::Clubs, Rank::Ten),
            c(Suit::Clubs, Rank::Queen),
            c(Suit::Clubs, Rank::King),
        ],
    );
    assert!(matches!(
        trick.check_play(3, 3),
        Err(DomainError::Sequence(SequenceKind::Play, _))
    ));
    assert_eq!(trick.summary().unwrap().winner, 3);

    trick.mark_complete();
    assert!(matches!(
        trick.summary(),
        Err(DomainError::Status(StatusKind::TrickInactive, _))
    ));
    assert!(matches!(
        trick.check_play(0, 0),
        Err(DomainError::Status(StatusKind::TrickInactive, _))
    ));
}
