//! Rules engine - the bundled [`HandEngine`].
//!
//! Tracks the four hands for one deal, enforces follow-suit (bower aware),
//! validates bids and discards, and suggests moves. Bids and discards use a
//! small deterministic heuristic; play suggestions pick uniformly among legal
//! cards with a seedable ChaCha RNG so tests can replay a deal exactly.

use std::collections::HashSet;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::trait_def::{
    BidContext, DealSetup, EngineError, EngineFactory, HandEngine, PlayContext, SwapContext,
};
use crate::domain::bidding::{BidCall, BidOutcome, Contract};
use crate::domain::cards_logic::{effective_suit, hand_has_suit, reclassify};
use crate::domain::codec::{DECK_SIZE, HAND_SIZE};
use crate::domain::state::{Seat, PLAYERS};
use crate::domain::tricks::TrickSummary;
use crate::domain::{Card, Suit};

/// Trump cards (bowers included) needed before the heuristic calls.
const CALL_THRESHOLD: usize = 3;
/// Trump cards needed before the heuristic goes alone.
const ALONE_THRESHOLD: usize = 5;

/// Builds a [`RulesEngine`] per deal.
///
/// With a seed, each deal gets its own stream derived from the seed and the
/// deal's game/deal ordinals; without one the stream comes from the OS.
#[derive(Debug, Clone, Default)]
pub struct RulesEngineFactory {
    seed: Option<u64>,
}

impl RulesEngineFactory {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }
}

impl EngineFactory for RulesEngineFactory {
    fn new_deal(&self, setup: DealSetup) -> Result<Box<dyn HandEngine>, EngineError> {
        let rng = match self.seed {
            Some(seed) => {
                let stream = ((setup.game as u64) << 32) | setup.deal as u64;
                ChaCha8Rng::seed_from_u64(seed ^ stream)
            }
            None => ChaCha8Rng::from_os_rng(),
        };
        let engine = RulesEngine::new(setup, rng)?;
        Ok(Box::new(engine))
    }
}

pub struct RulesEngine {
    dealer: Seat,
    hands: [Vec<Card>; PLAYERS],
    turn_card: Card,
    /// The turn card went into the dealer's hand.
    turn_taken: bool,
    buried: Vec<Card>,
    discards: Vec<Card>,
    played: Vec<Card>,
    /// Cards played into the trick in progress.
    in_trick: usize,
    contract: Option<Contract>,
    rng: ChaCha8Rng,
}

impl RulesEngine {
    pub fn new(setup: DealSetup, rng: ChaCha8Rng) -> Result<Self, EngineError> {
        if setup.hands.iter().any(|h| h.len() != HAND_SIZE) {
            return Err(EngineError::HandIntegrity(format!(
                "every seat must be dealt {HAND_SIZE} cards"
            )));
        }
        let engine = Self {
            dealer: setup.dealer,
            hands: setup.hands,
            turn_card: setup.turn_card,
            turn_taken: false,
            buried: setup.buried,
            discards: Vec::new(),
            played: Vec::new(),
            in_trick: 0,
            contract: None,
            rng,
        };
        engine.check_hand_integrity()?;
        Ok(engine)
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat as usize]
    }

    fn trump_count(hand: &[Card], trump: Suit) -> usize {
        hand.iter()
            .filter(|&&c| effective_suit(c, trump) == trump)
            .count()
    }

    /// Calls allowed in the current round.
    fn is_legal_call(ctx: &BidContext, call: BidCall) -> bool {
        match call {
            BidCall::Pass => true,
            BidCall::Call { suit, .. } if ctx.round == 0 => suit == ctx.turn_card.suit,
            BidCall::Call { suit, .. } => ctx.round == 1 && suit != ctx.turn_card.suit,
        }
    }

    fn suggest_bid(&self, ctx: &BidContext) -> BidCall {
        let hand = self.hand(ctx.seat);
        let candidates: Vec<(Suit, usize)> = if ctx.round == 0 {
            let suit = ctx.turn_card.suit;
            let mut count = Self::trump_count(hand, suit);
            if ctx.seat == ctx.dealer {
                // The dealer would pick the turn card up.
                count += 1;
            }
            vec![(suit, count)]
        } else {
            Suit::ALL
                .iter()
                .filter(|&&s| s != ctx.turn_card.suit)
                .map(|&s| (s, Self::trump_count(hand, s)))
                .collect()
        };

        match candidates.into_iter().max_by_key(|&(_, n)| n) {
            Some((suit, n)) if n >= CALL_THRESHOLD => BidCall::Call {
                suit,
                alone: n >= ALONE_THRESHOLD,
            },
            _ => BidCall::Pass,
        }
    }

    /// Weakest card in the dealer's hand: lowest off-suit card, else lowest trump.
    fn suggest_discard(&self, trump: Suit) -> Option<Card> {
        self.hand(self.dealer).iter().copied().min_by_key(|&c| {
            let tc = reclassify(c, trump);
            let is_trump = tc.suit == trump;
            (is_trump, tc.rank)
        })
    }

    fn legal_plays(&self, ctx: &PlayContext<'_>) -> Vec<Card> {
        let hand = self.hand(ctx.seat);
        match ctx.led {
            Some(led) if hand_has_suit(hand, led, ctx.trump) => hand
                .iter()
                .copied()
                .filter(|&c| effective_suit(c, ctx.trump) == led)
                .collect(),
            _ => hand.to_vec(),
        }
    }

    fn sitting_out(&self) -> Option<Seat> {
        self.contract.and_then(|c| c.sitting_out())
    }
}

impl HandEngine for RulesEngine {
    fn suggest_or_validate_bid(
        &mut self,
        ctx: &BidContext,
        call: Option<BidCall>,
    ) -> Result<BidOutcome, EngineError> {
        let call = match call {
            Some(call) if !Self::is_legal_call(ctx, call) => {
                return Err(EngineError::Illegal(format!(
                    "seat {} cannot name suit {} in round {}",
                    ctx.seat,
                    call.suit_code(),
                    ctx.round
                )));
            }
            Some(call) => call,
            None => self.suggest_bid(ctx),
        };
        Ok(match call {
            BidCall::Pass => BidOutcome::pass(),
            BidCall::Call { suit, alone } => BidOutcome::call(ctx.seat, suit, alone),
        })
    }

    fn suggest_or_validate_swap(
        &mut self,
        ctx: &SwapContext,
        discard: Option<Card>,
    ) -> Result<Card, EngineError> {
        if self.turn_taken {
            return Err(EngineError::Internal(
                "turn card already taken into the dealer's hand".into(),
            ));
        }
        if ctx.turn_card != self.turn_card {
            return Err(EngineError::Internal(format!(
                "turn card {:?} does not match the deal's {:?}",
                ctx.turn_card, self.turn_card
            )));
        }
        let Some(card) = discard else {
            return self
                .suggest_discard(ctx.contract.trump)
                .ok_or_else(|| EngineError::NoLegalMove("dealer has no cards".into()));
        };

        let dealer = ctx.dealer as usize;
        let Some(idx) = self.hands[dealer].iter().position(|&c| c == card) else {
            return Err(EngineError::Illegal(format!(
                "{card:?} is not in the dealer's hand"
            )));
        };
        self.hands[dealer][idx] = self.turn_card;
        self.discards.push(card);
        self.turn_taken = true;
        debug!(discard = ?card, turn_card = ?self.turn_card, "kitty exchange committed");
        Ok(card)
    }

    fn suggest_or_validate_play(
        &mut self,
        ctx: &PlayContext<'_>,
        card: Option<Card>,
    ) -> Result<Card, EngineError> {
        if self.contract.is_none() {
            return Err(EngineError::Internal("play before prepare_for_play".into()));
        }
        if self.sitting_out() == Some(ctx.seat) {
            return Err(EngineError::Internal(format!(
                "seat {} sits out this deal",
                ctx.seat
            )));
        }
        let legal = self.legal_plays(ctx);

        let Some(card) = card else {
            return legal
                .choose(&mut self.rng)
                .copied()
                .ok_or_else(|| {
                    EngineError::NoLegalMove(format!("seat {} has no cards left", ctx.seat))
                });
        };

        if !self.hand(ctx.seat).contains(&card) {
            return Err(EngineError::Illegal(format!(
                "{card:?} is not in seat {}'s hand",
                ctx.seat
            )));
        }
        if !legal.contains(&card) {
            return Err(EngineError::Illegal(format!(
                "seat {} must follow the suit led with {card:?}",
                ctx.seat
            )));
        }

        let hand = &mut self.hands[ctx.seat as usize];
        hand.retain(|&c| c != card);
        self.played.push(card);
        self.in_trick += 1;
        Ok(card)
    }

    fn prepare_for_play(&mut self, contract: &Contract) -> Result<(), EngineError> {
        if self.contract.is_some() {
            return Err(EngineError::Internal("play already prepared".into()));
        }
        self.contract = Some(*contract);
        debug!(
            declarer = contract.declarer,
            trump = ?contract.trump,
            alone = contract.alone,
            round = contract.round,
            "engine prepared for play"
        );
        Ok(())
    }

    fn check_hand_integrity(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        let mut total = 0usize;
        let turn = (!self.turn_taken).then_some(self.turn_card);
        let all = self
            .hands
            .iter()
            .flatten()
            .chain(&self.buried)
            .chain(&self.discards)
            .chain(&self.played)
            .chain(turn.iter());
        for card in all {
            if !seen.insert(*card) {
                return Err(EngineError::HandIntegrity(format!(
                    "{card:?} is held twice"
                )));
            }
            total += 1;
        }
        if total != DECK_SIZE {
            return Err(EngineError::HandIntegrity(format!(
                "{total} cards accounted for, expected {DECK_SIZE}"
            )));
        }

        let sitting_out = self.sitting_out();
        let mut sizes = (0..PLAYERS as Seat)
            .filter(|&s| Some(s) != sitting_out)
            .map(|s| self.hands[s as usize].len());
        if let Some(first) = sizes.next() {
            if sizes.any(|n| n != first) {
                return Err(EngineError::HandIntegrity(
                    "active seats hold different numbers of cards".into(),
                ));
            }
        }
        Ok(())
    }

    fn finalize_trick(&mut self, summary: &TrickSummary) -> Result<(), EngineError> {
        if self.in_trick != summary.cards_played as usize {
            return Err(EngineError::Internal(format!(
                "trick {} closed with {} cards, engine saw {}",
                summary.index, summary.cards_played, self.in_trick
            )));
        }
        self.check_hand_integrity()?;
        self.in_trick = 0;
        Ok(())
    }
}
