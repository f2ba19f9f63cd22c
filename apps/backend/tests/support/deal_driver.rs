//! Drives whole deals through the registry API the way a client would.

use euchre_backend::domain::DealSummary;
use euchre_backend::errors::DomainError;
use euchre_backend::services::{BidRequest, DealRef, PlayRequest, SwapRequest};
use euchre_backend::SessionRegistry;

use super::decks;

/// Who calls trump, in which bidding round, and whether alone.
#[derive(Debug, Clone, Copy)]
pub struct Call {
    pub round: i32,
    pub seat: i32,
    pub alone: bool,
}

pub fn at(token: &str, game: i32, deal: i32) -> DealRef {
    DealRef {
        token: token.to_string(),
        game,
        deal,
    }
}

/// Round 0 must order up the turn suit; round 1 takes the next suit over.
pub fn trump_code(deck: &[i32], round: i32) -> i32 {
    let turn_suit = decks::suit_code(decks::turn_card(deck));
    if round == 0 {
        turn_suit
    } else {
        (turn_suit + 1) % 4
    }
}

pub fn bid(
    registry: &SessionRegistry,
    at: &DealRef,
    deck: &[i32],
    n: i32,
    suit: Option<i32>,
    alone: bool,
) -> Result<(), DomainError> {
    let req = BidRequest {
        round: n / 4,
        turn_card: decks::turn_card(deck),
        seat: n % 4,
        suit,
        alone,
    };
    registry.bid(at, &req, true).map(|_| ())
}

/// Passes up to the caller, calls, and runs the kitty exchange when the
/// call came in round 0 (taking the engine's suggested discard).
pub fn run_bidding(
    registry: &SessionRegistry,
    at: &DealRef,
    deck: &[i32],
    call: Call,
) -> Result<(), DomainError> {
    let target = call.round * 4 + call.seat;
    for n in 0..target {
        bid(registry, at, deck, n, Some(-1), false)?;
    }
    bid(
        registry,
        at,
        deck,
        target,
        Some(trump_code(deck, call.round)),
        call.alone,
    )?;

    if call.round == 0 {
        let mut req = SwapRequest {
            declarer: call.seat,
            turn_card: decks::turn_card(deck),
            seat: 3,
            card: None,
        };
        let discard = registry.swap(at, &req, false)?;
        req.card = Some(i32::from(discard.value()));
        registry.swap(at, &req, true)?;
    }
    Ok(())
}

/// Plays all five tricks with engine suggestions; returns the trick winners.
pub fn run_tricks(
    registry: &SessionRegistry,
    at: &DealRef,
    sitting_out: Option<i32>,
) -> Result<Vec<i32>, DomainError> {
    let mut winners = Vec::new();
    for n_trick in 0..5 {
        let view = registry.create_trick(at, n_trick)?;
        let lead = i32::from(view.lead);
        for seq in 0..4 {
            let seat = (lead + seq) % 4;
            if Some(seat) == sitting_out {
                continue;
            }
            let mut req = PlayRequest {
                trick: n_trick,
                seq,
                seat,
                card: None,
            };
            let suggestion = registry.play(at, &req, false)?;
            req.card = Some(i32::from(suggestion.card.value()));
            registry.play(at, &req, true)?;
        }
        winners.push(i32::from(registry.complete_trick(at, n_trick)?.winner));
    }
    Ok(winners)
}

/// Creates deal `at.deal` from `deck`, bids, plays and completes it.
pub fn play_deal(
    registry: &SessionRegistry,
    at: &DealRef,
    deck: &[i32],
    call: Call,
) -> Result<DealSummary, DomainError> {
    registry.create_deal(at, deck, Some(3))?;
    run_bidding(registry, at, deck, call)?;
    let sitting_out = call.alone.then_some((call.seat + 2) % 4);
    run_tricks(registry, at, sitting_out)?;
    registry.complete_deal(at)
}
