//! Deal state machine: bidding, kitty exchange, trick sequencing and the
//! per-seat tricks-won tally for one deal.
//!
//! Every operation validates fully (including the hand-engine call, which
//! does not mutate on rejection) before touching deal state. The one
//! exception is a play that jumps ahead: the skipped seats are autoplayed
//! first, and those plays stand even if the requested card is then refused.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::bidding::{BidCall, BidCounter, BidOutcome, CallStrength, Contract};
use crate::domain::codec::{CardCodec, DeckLayout, WireCardId};
use crate::domain::scoring::{DealScore, DealScorer};
use crate::domain::state::{round_start_seat, Seat, Status, DEALER, PLAYERS, TRICKS_PER_DEAL};
use crate::domain::tricks::{PlayOutcome, Trick, TrickSummary};
use crate::domain::Suit;
use crate::engine::{
    BidContext, DealSetup, EngineFactory, HandEngine, PlayContext, SwapContext,
};
use crate::errors::domain::{
    DomainError, EngineFailureKind, SequenceKind, StatusKind, ValidationKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DealPhase {
    /// Cards are dealt, nobody has bid.
    Dealt,
    Bidding,
    /// Trump was ordered up in round 0; the dealer may still exchange.
    KittyExchange,
    /// Contract fixed, no trick created yet.
    Declared,
    Playing,
    /// Eight passes: the deal is thrown in.
    AllPassed,
    Scored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseEcho {
    pub seat: Seat,
    pub alone: bool,
}

/// A suggested or committed card, in wire ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResult {
    pub slot: u8,
    pub seat: Seat,
    pub card: WireCardId,
    /// Seat currently taking the trick (after this card when committed).
    pub winning_seat: Option<Seat>,
    pub trick_ready: bool,
    pub committed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSummary {
    pub index: usize,
    pub status: Status,
    pub phase: DealPhase,
    pub dealer: Seat,
    pub turn_card: u8,
    pub contract: Option<Contract>,
    /// Suit code of the Jack that plays as trump's left bower.
    pub left_bower: Option<u8>,
    pub bids_made: u8,
    pub tricks_played: usize,
    pub tricks_won: [u8; PLAYERS],
    pub trick_winners: Vec<Seat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<DealScore>,
}

pub struct Deal {
    pub index: usize,
    pub status: Status,
    pub dealer: Seat,
    layout: DeckLayout,
    phase: DealPhase,
    bids: BidCounter,
    contract: Option<Contract>,
    tricks: Vec<Trick>,
    /// `winners[0]` is the seat left of the dealer, the fictitious winner of
    /// the trick before trick 0; `winners[n + 1]` won trick `n`.
    winners: [Seat; TRICKS_PER_DEAL + 1],
    led_history: [Option<Suit>; TRICKS_PER_DEAL],
    tricks_won: [u8; PLAYERS],
    score: Option<DealScore>,
    /// Released on completion.
    engine: Option<Box<dyn HandEngine>>,
}

impl std::fmt::Debug for Deal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deal")
            .field("index", &self.index)
            .field("status", &self.status)
            .field("phase", &self.phase)
            .field("contract", &self.contract)
            .field("tricks", &self.tricks.len())
            .field("tricks_won", &self.tricks_won)
            .field("engine_live", &self.engine.is_some())
            .finish()
    }
}

fn live_engine(
    engine: &mut Option<Box<dyn HandEngine>>,
) -> Result<&mut (dyn HandEngine + 'static), DomainError> {
    engine.as_deref_mut().ok_or_else(|| {
        DomainError::engine(EngineFailureKind::Internal, "deal engine already released")
    })
}

impl Deal {
    /// Builds the deal and its hand engine from a validated layout.
    pub fn new(
        game: usize,
        index: usize,
        layout: DeckLayout,
        codec: &CardCodec,
        factory: &dyn EngineFactory,
    ) -> Result<Self, DomainError> {
        let hands = [0, 1, 2, 3].map(|seat: Seat| {
            layout
                .hand(seat)
                .iter()
                .map(|&w| codec.to_play(w))
                .collect::<Vec<_>>()
        });
        let setup = DealSetup {
            game,
            deal: index,
            dealer: DEALER,
            hands,
            turn_card: codec.to_play(layout.turn_card()),
            buried: layout.buried().iter().map(|&w| codec.to_play(w)).collect(),
        };
        let engine = factory.new_deal(setup)?;

        let mut winners = [0; TRICKS_PER_DEAL + 1];
        winners[0] = round_start_seat(DEALER);

        Ok(Self {
            index,
            status: Status::Active,
            dealer: DEALER,
            layout,
            phase: DealPhase::Dealt,
            bids: BidCounter::new(),
            contract: None,
            tricks: Vec::with_capacity(TRICKS_PER_DEAL),
            winners,
            led_history: [None; TRICKS_PER_DEAL],
            tricks_won: [0; PLAYERS],
            score: None,
            engine: Some(engine),
        })
    }

    pub fn phase(&self) -> DealPhase {
        self.phase
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    pub fn layout(&self) -> &DeckLayout {
        &self.layout
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn tricks_won(&self) -> [u8; PLAYERS] {
        self.tricks_won
    }

    pub fn led_history(&self) -> &[Option<Suit>] {
        &self.led_history[..self.completed_tricks()]
    }

    pub fn engine_released(&self) -> bool {
        self.engine.is_none()
    }

    fn completed_tricks(&self) -> usize {
        self.tricks
            .iter()
            .filter(|t| !t.status.is_active())
            .count()
    }

    fn require_active(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::status(
                StatusKind::DealInactive,
                format!("deal {} is complete", self.index),
            ))
        }
    }

    fn require_phase(&self, allowed: &[DealPhase], op: &str) -> Result<(), DomainError> {
        self.require_active()?;
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(DomainError::status(
                StatusKind::PhaseMismatch,
                format!("cannot {op} while deal {} is {:?}", self.index, self.phase),
            ))
        }
    }

    fn require_turn_card(&self, turn_card: WireCardId) -> Result<(), DomainError> {
        if turn_card == self.layout.turn_card() {
            Ok(())
        } else {
            Err(DomainError::validation(
                ValidationKind::TurnCardMismatch,
                format!(
                    "turn card {} does not match deal's {}",
                    turn_card.value(),
                    self.layout.turn_card().value()
                ),
            ))
        }
    }

    fn require_contract(&self) -> Result<Contract, DomainError> {
        self.contract.ok_or_else(|| {
            DomainError::status(
                StatusKind::PhaseMismatch,
                format!("deal {} has no contract", self.index),
            )
        })
    }

    /// Suggests (`call == None`) or submits a bid for the next round/seat.
    pub fn bid(
        &mut self,
        codec: &CardCodec,
        round: u8,
        seat: Seat,
        turn_card: WireCardId,
        call: Option<BidCall>,
    ) -> Result<BidOutcome, DomainError> {
        self.require_phase(&[DealPhase::Dealt, DealPhase::Bidding], "bid")?;
        let slot = self.bids.require_next(round, seat)?;
        self.require_turn_card(turn_card)?;

        let ctx = BidContext {
            seat: slot.seat,
            round: slot.round,
            dealer: self.dealer,
            turn_card: codec.to_play(turn_card),
        };
        let commit = call.is_some();
        let outcome = live_engine(&mut self.engine)?.suggest_or_validate_bid(&ctx, call)?;
        outcome.validate(seat)?;
        if !commit {
            return Ok(outcome);
        }

        self.bids.advance();
        match (outcome.strength, outcome.declarer, outcome.trump) {
            (CallStrength::Call | CallStrength::Alone, Some(declarer), Some(trump)) => {
                let contract = Contract {
                    declarer,
                    trump,
                    alone: outcome.strength == CallStrength::Alone,
                    round,
                };
                self.contract = Some(contract);
                self.phase = if round == 0 {
                    DealPhase::KittyExchange
                } else {
                    DealPhase::Declared
                };
                info!(
                    deal = self.index,
                    declarer,
                    trump = ?trump,
                    alone = contract.alone,
                    round,
                    "contract frozen"
                );
            }
            _ if self.bids.exhausted() => {
                self.phase = DealPhase::AllPassed;
                info!(deal = self.index, "all seats passed, deal thrown in");
            }
            _ => {
                self.phase = DealPhase::Bidding;
                debug!(deal = self.index, round, seat, "pass recorded");
            }
        }
        Ok(outcome)
    }

    /// Suggests or commits the dealer's discard in exchange for the turn card.
    pub fn swap(
        &mut self,
        codec: &CardCodec,
        declarer: Seat,
        turn_card: WireCardId,
        seat: Seat,
        card: Option<WireCardId>,
    ) -> Result<WireCardId, DomainError> {
        self.require_phase(&[DealPhase::KittyExchange], "exchange the kitty")?;
        let contract = self.require_contract()?;
        if seat != self.dealer {
            return Err(DomainError::validation(
                ValidationKind::InvalidSeat,
                format!("only the dealer (seat {}) exchanges, not seat {seat}", self.dealer),
            ));
        }
        if declarer != contract.declarer {
            return Err(DomainError::validation(
                ValidationKind::DeclarerMismatch,
                format!(
                    "declarer is seat {}, request names seat {declarer}",
                    contract.declarer
                ),
            ));
        }
        self.require_turn_card(turn_card)?;
        if let Some(card) = card {
            self.layout.require_dealer_card(card)?;
        }

        let ctx = SwapContext {
            dealer: self.dealer,
            turn_card: codec.to_play(turn_card),
            contract,
        };
        let discard = card.map(|w| codec.to_play(w));
        let chosen = live_engine(&mut self.engine)?.suggest_or_validate_swap(&ctx, discard)?;
        let chosen = codec.to_wire(chosen);

        if card.is_some() {
            self.phase = DealPhase::Declared;
            info!(deal = self.index, discard = chosen.value(), "kitty exchanged");
        }
        Ok(chosen)
    }

    /// Lone-defense declaration; only a defender may make one. Echoed back.
    pub fn defense(&self, seat: Seat, alone: bool) -> Result<DefenseEcho, DomainError> {
        self.require_phase(
            &[DealPhase::KittyExchange, DealPhase::Declared],
            "declare defense",
        )?;
        let contract = self.require_contract()?;
        if !contract.is_defender(seat) {
            return Err(DomainError::validation(
                ValidationKind::NotADefender,
                format!("seat {seat} is on the declaring team"),
            ));
        }
        debug!(deal = self.index, seat, alone, "defense declared");
        Ok(DefenseEcho { seat, alone })
    }

    /// Opens trick `index`; trick 0 moves the deal into play.
    pub fn create_trick(&mut self, index: usize) -> Result<&Trick, DomainError> {
        self.require_phase(
            &[
                DealPhase::KittyExchange,
                DealPhase::Declared,
                DealPhase::Playing,
            ],
            "create a trick",
        )?;
        let contract = self.require_contract()?;
        if index != self.tricks.len() || index >= TRICKS_PER_DEAL {
            return Err(DomainError::sequence(
                SequenceKind::Trick,
                format!("expected trick {}, got {index}", self.tricks.len()),
            ));
        }
        if self.tricks.last().is_some_and(|t| t.status.is_active()) {
            return Err(DomainError::status(
                StatusKind::PreviousActive,
                format!("trick {} is still active", index - 1),
            ));
        }

        if index == 0 {
            let engine = live_engine(&mut self.engine)?;
            engine.check_hand_integrity()?;
            engine.prepare_for_play(&contract)?;
            self.phase = DealPhase::Playing;
            info!(deal = self.index, "play begins");
        }

        let lead = self.winners[index];
        debug!(deal = self.index, trick = index, lead, "trick created");
        self.tricks
            .push(Trick::new(index as u8, lead, contract.sitting_out()));
        Ok(&self.tricks[index])
    }

    /// Suggests (`card == None`) or plays a card into the current trick.
    pub fn play(
        &mut self,
        codec: &CardCodec,
        trick_index: usize,
        slot: u8,
        seat: Seat,
        card: Option<WireCardId>,
    ) -> Result<PlayResult, DomainError> {
        self.require_phase(&[DealPhase::Playing], "play")?;
        let contract = self.require_contract()?;
        let current = self.tricks.len().checked_sub(1);
        if current != Some(trick_index) {
            return Err(DomainError::sequence(
                SequenceKind::Trick,
                format!("trick {trick_index} is not the current trick"),
            ));
        }
        self.tricks[trick_index].check_play(slot, seat)?;
        if card.is_some() {
            self.autoplay_skipped(trick_index, slot, contract.trump)?;
        }

        let trick = &mut self.tricks[trick_index];
        let ctx = PlayContext {
            seat,
            trick: trick.index,
            trump: contract.trump,
            led: trick.led,
            played: &trick.plays,
        };
        let proposal = card.map(|w| codec.to_play(w));
        let chosen = live_engine(&mut self.engine)?.suggest_or_validate_play(&ctx, proposal)?;

        if card.is_none() {
            return Ok(PlayResult {
                slot,
                seat,
                card: codec.to_wire(chosen),
                winning_seat: trick.winning_seat,
                trick_ready: false,
                committed: false,
            });
        }

        let PlayOutcome {
            card: played,
            winning_seat,
            trick_ready,
            ..
        } = trick.record(slot, seat, chosen, contract.trump);
        debug!(
            deal = self.index,
            trick = trick_index,
            slot,
            seat,
            winning_seat,
            "card played"
        );
        Ok(PlayResult {
            slot,
            seat,
            card: codec.to_wire(played),
            winning_seat: Some(winning_seat),
            trick_ready,
            committed: true,
        })
    }

    /// Plays every open slot before `slot` with the engine's suggestion, in
    /// slot order, so a forward jump still leaves a full trick. Each autoplay
    /// is committed on its own.
    fn autoplay_skipped(
        &mut self,
        trick_index: usize,
        slot: u8,
        trump: Suit,
    ) -> Result<(), DomainError> {
        let engine = live_engine(&mut self.engine)?;
        let trick = &mut self.tricks[trick_index];
        while let Some(open) = trick.expected_slot().filter(|&open| open < slot) {
            let seat = trick.order()[open as usize];
            let ctx = PlayContext {
                seat,
                trick: trick.index,
                trump,
                led: trick.led,
                played: &trick.plays,
            };
            let suggested = engine.suggest_or_validate_play(&ctx, None)?;
            let card = engine.suggest_or_validate_play(&ctx, Some(suggested))?;
            let outcome = trick.record(open, seat, card, trump);
            warn!(
                deal = self.index,
                trick = trick_index,
                skipped = open,
                requested = slot,
                seat,
                card = ?outcome.card,
                "play sequence skipped forward, seat autoplayed"
            );
        }
        Ok(())
    }

    /// Closes the current trick and credits its winner.
    pub fn complete_trick(&mut self, trick_index: usize) -> Result<TrickSummary, DomainError> {
        self.require_phase(&[DealPhase::Playing], "complete a trick")?;
        let trick = self.tricks.get(trick_index).ok_or_else(|| {
            DomainError::sequence(
                SequenceKind::Trick,
                format!("trick {trick_index} was never created"),
            )
        })?;
        if trick_index + 1 != self.tricks.len() {
            return Err(DomainError::sequence(
                SequenceKind::Trick,
                format!("trick {trick_index} is not the current trick"),
            ));
        }
        let summary = trick.summary()?;
        live_engine(&mut self.engine)?.finalize_trick(&summary)?;

        self.tricks[trick_index].mark_complete();
        self.winners[trick_index + 1] = summary.winner;
        self.led_history[trick_index] = summary.led;
        self.tricks_won[summary.winner as usize] += 1;
        info!(
            deal = self.index,
            trick = trick_index,
            winner = summary.winner,
            "trick won"
        );
        Ok(summary)
    }

    /// Finishes the deal, scores the tally and releases the engine.
    pub fn complete(&mut self, scorer: &dyn DealScorer) -> Result<DealSummary, DomainError> {
        self.require_active()?;
        let expected = match self.phase {
            DealPhase::AllPassed => 0,
            DealPhase::Playing if self.completed_tricks() == TRICKS_PER_DEAL => {
                TRICKS_PER_DEAL as u8
            }
            DealPhase::Playing => {
                return Err(DomainError::status(
                    StatusKind::TrickIncomplete,
                    format!(
                        "deal {} has {} of {TRICKS_PER_DEAL} tricks complete",
                        self.index,
                        self.completed_tricks()
                    ),
                ))
            }
            phase => {
                return Err(DomainError::status(
                    StatusKind::PhaseMismatch,
                    format!("cannot complete deal {} while {phase:?}", self.index),
                ))
            }
        };
        let total: u8 = self.tricks_won.iter().sum();
        if total != expected {
            return Err(DomainError::engine(
                EngineFailureKind::InvalidOutcome,
                format!("tricks won sum to {total}, expected {expected}"),
            ));
        }

        let score = scorer.score(self.contract.as_ref(), &self.tricks_won);
        self.score = Some(score);
        self.status = Status::Complete;
        self.phase = DealPhase::Scored;
        self.engine = None;
        info!(
            deal = self.index,
            tricks_won = ?self.tricks_won,
            points = ?score.team_points,
            "deal complete"
        );
        Ok(self.summary())
    }

    pub fn summary(&self) -> DealSummary {
        let done = self.completed_tricks();
        DealSummary {
            index: self.index,
            status: self.status,
            phase: self.phase,
            dealer: self.dealer,
            turn_card: self.layout.turn_card().value(),
            contract: self.contract,
            left_bower: self.contract.map(|c| c.left_bower_suit().index()),
            bids_made: self.bids.bids_made(),
            tricks_played: self.tricks.len(),
            tricks_won: self.tricks_won,
            trick_winners: self.winners[1..=done].to_vec(),
            score: self.score,
        }
    }
}
