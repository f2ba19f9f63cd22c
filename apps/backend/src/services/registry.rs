//! Session registry: the live session map and every externally triggered
//! operation on the session -> game -> deal -> trick tree.
//!
//! Each session sits behind its own mutex, so requests against one token are
//! serialized while different tokens proceed independently.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use super::session::{
    current_game_mut, ordinal, require_latest, require_next, Game, GameSummary, Session,
    SessionSummary,
};
use crate::domain::bidding::{BidCall, BidOutcome};
use crate::domain::codec::{CardCodec, DeckLayout, ProtocolTables, WireCardId};
use crate::domain::deal::{Deal, DealSummary, DefenseEcho, PlayResult};
use crate::domain::scoring::{DealScorer, StandardScoring};
use crate::domain::state::{require_seat, Seat, Status, DEALER};
use crate::domain::tricks::{Trick, TrickSummary};
use crate::engine::{EngineFactory, RulesEngineFactory};
use crate::errors::domain::{
    ConflictKind, DomainError, NotFoundKind, SequenceKind, StatusKind, ValidationKind,
};

/// Addresses one deal inside a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealRef {
    pub token: String,
    pub game: i32,
    pub deal: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidRequest {
    pub round: i32,
    pub turn_card: i32,
    pub seat: i32,
    /// -1 or `None` passes.
    pub suit: Option<i32>,
    pub alone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    pub declarer: i32,
    pub turn_card: i32,
    pub seat: i32,
    pub card: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    pub trick: i32,
    /// Trick-local play sequence number, 0..=3.
    pub seq: i32,
    pub seat: i32,
    pub card: Option<i32>,
}

/// State of one trick as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickView {
    pub index: u8,
    pub status: Status,
    pub lead: Seat,
    pub cards_played: u8,
    pub winning_seat: Option<Seat>,
}

impl From<&Trick> for TrickView {
    fn from(trick: &Trick) -> Self {
        Self {
            index: trick.index,
            status: trick.status,
            lead: trick.lead,
            cards_played: trick.played,
            winning_seat: trick.winning_seat,
        }
    }
}

fn small(raw: i32, kind: ValidationKind, what: &str) -> Result<u8, DomainError> {
    u8::try_from(raw).map_err(|_| DomainError::validation(kind, format!("bad {what}: {raw}")))
}

pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
    engines: Arc<dyn EngineFactory>,
    scorer: Arc<dyn DealScorer>,
    target_score: u16,
}

impl SessionRegistry {
    pub fn new(
        engines: Arc<dyn EngineFactory>,
        scorer: Arc<dyn DealScorer>,
        target_score: u16,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            engines,
            scorer,
            target_score,
        }
    }

    /// Rules engine and standard scoring.
    pub fn with_rules(seed: Option<u64>, target_score: u16) -> Self {
        Self::new(
            Arc::new(RulesEngineFactory::new(seed)),
            Arc::new(StandardScoring),
            target_score,
        )
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    fn handle(&self, token: &str) -> Result<Arc<Mutex<Session>>, DomainError> {
        self.sessions
            .get(token)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Session, format!("unknown session {token}"))
            })
    }

    /// Runs `f` with the session locked; the session must be active.
    fn with_session<T>(
        &self,
        token: &str,
        f: impl FnOnce(&mut Session) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let handle = self.handle(token)?;
        let mut session = handle.lock();
        session.require_active()?;
        f(&mut session)
    }

    /// Runs `f` on the addressed deal, which must be the latest in an active game.
    fn with_deal<T>(
        &self,
        at: &DealRef,
        f: impl FnOnce(&mut Deal, &CardCodec) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        self.with_session(&at.token, |session| {
            let Session { codec, games, .. } = session;
            let game = current_game_mut(games, at.game)?;
            let deal = game.current_deal_mut(at.deal)?;
            f(deal, codec)
        })
    }

    // ---------- sessions ----------

    pub fn create_session(&self, token: &str) -> Result<ProtocolTables, DomainError> {
        use dashmap::mapref::entry::Entry;
        match self.sessions.entry(token.to_string()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::SessionExists,
                format!("session {token} already exists"),
            )),
            Entry::Vacant(slot) => {
                let session = Session::new(token);
                let tables = session.codec().tables();
                slot.insert(Arc::new(Mutex::new(session)));
                info!(token, "session created");
                Ok(tables)
            }
        }
    }

    pub fn session_summary(&self, token: &str) -> Result<SessionSummary, DomainError> {
        self.with_session(token, |session| Ok(session.summary()))
    }

    /// Marks the session complete and drops it, with everything it owns.
    pub fn complete_session(&self, token: &str) -> Result<SessionSummary, DomainError> {
        let summary = self.with_session(token, |session| {
            session.status = Status::Complete;
            Ok(session.summary())
        })?;
        self.sessions.remove(token);
        info!(token, games = summary.games, "session complete");
        Ok(summary)
    }

    // ---------- games ----------

    pub fn create_game(&self, token: &str, n_game: i32) -> Result<GameSummary, DomainError> {
        let target = self.target_score;
        self.with_session(token, |session| {
            let index = require_next(n_game, session.games.len(), SequenceKind::Game)?;
            if session.games.last().is_some_and(|g| g.status.is_active()) {
                return Err(DomainError::status(
                    StatusKind::PreviousActive,
                    format!("game {} is still active", index - 1),
                ));
            }
            session.games.push(Game::new(index, target));
            debug!(token, game = index, "game created");
            Ok(session.games[index].summary())
        })
    }

    pub fn game_summary(&self, token: &str, n_game: i32) -> Result<GameSummary, DomainError> {
        self.with_session(token, |session| {
            let index = require_latest(n_game, session.games.len(), SequenceKind::Game)?;
            Ok(session.games[index].summary())
        })
    }

    pub fn complete_game(&self, token: &str, n_game: i32) -> Result<GameSummary, DomainError> {
        self.with_session(token, |session| {
            let game = current_game_mut(&mut session.games, n_game)?;
            if game.deals().last().is_some_and(|d| d.status.is_active()) {
                return Err(DomainError::status(
                    StatusKind::PreviousActive,
                    format!("game {} still has an active deal", game.index),
                ));
            }
            game.status = Status::Complete;
            let summary = game.summary();
            info!(
                token,
                game = summary.index,
                scores = ?summary.team_scores,
                winner = ?summary.winning_team,
                "game complete"
            );
            Ok(summary)
        })
    }

    // ---------- deals ----------

    pub fn create_deal(
        &self,
        at: &DealRef,
        cards: &[i32],
        pos: Option<i32>,
    ) -> Result<DealSummary, DomainError> {
        if let Some(pos) = pos {
            if pos != i32::from(DEALER) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSeat,
                    format!("dealer must be seat {DEALER}, got {pos}"),
                ));
            }
        }
        let layout = DeckLayout::new(cards)?;
        let engines = Arc::clone(&self.engines);
        self.with_session(&at.token, |session| {
            let Session { codec, games, .. } = session;
            let game = current_game_mut(games, at.game)?;
            let index = require_next(at.deal, game.deals.len(), SequenceKind::Deal)?;
            if game.deals.last().is_some_and(|d| d.status.is_active()) {
                return Err(DomainError::status(
                    StatusKind::PreviousActive,
                    format!("deal {} is still active", index - 1),
                ));
            }
            let deal = Deal::new(game.index, index, layout, codec, engines.as_ref())?;
            game.deals.push(deal);
            debug!(token = %at.token, game = game.index, deal = index, "deal created");
            Ok(game.deals[index].summary())
        })
    }

    pub fn deal_summary(&self, at: &DealRef) -> Result<DealSummary, DomainError> {
        self.with_session(&at.token, |session| {
            let g = require_latest(at.game, session.games.len(), SequenceKind::Game)?;
            let game = &session.games[g];
            let d = require_latest(at.deal, game.deals.len(), SequenceKind::Deal)?;
            Ok(game.deals[d].summary())
        })
    }

    /// Scores the deal into its game and releases the deal's engine.
    pub fn complete_deal(&self, at: &DealRef) -> Result<DealSummary, DomainError> {
        let scorer = Arc::clone(&self.scorer);
        self.with_session(&at.token, |session| {
            let game = current_game_mut(&mut session.games, at.game)?;
            let deal = game.current_deal_mut(at.deal)?;
            let summary = deal.complete(scorer.as_ref())?;
            if let Some(score) = &summary.score {
                game.apply_score(score);
            }
            Ok(summary)
        })
    }

    // ---------- bidding ----------

    /// `commit == false` asks the engine for a suggestion and changes nothing.
    pub fn bid(
        &self,
        at: &DealRef,
        req: &BidRequest,
        commit: bool,
    ) -> Result<BidOutcome, DomainError> {
        let round = small(req.round, ValidationKind::InvalidBid, "bid round")?;
        let seat = require_seat(req.seat)?;
        let turn_card = WireCardId::new(req.turn_card)?;
        let call = if commit {
            Some(BidCall::from_wire(req.suit, req.alone)?)
        } else {
            None
        };
        self.with_deal(at, |deal, codec| {
            deal.bid(codec, round, seat, turn_card, call)
        })
    }

    pub fn swap(
        &self,
        at: &DealRef,
        req: &SwapRequest,
        commit: bool,
    ) -> Result<WireCardId, DomainError> {
        let declarer = require_seat(req.declarer)?;
        let seat = require_seat(req.seat)?;
        let turn_card = WireCardId::new(req.turn_card)?;
        let card = match (commit, req.card) {
            (true, Some(raw)) => Some(WireCardId::new(raw)?),
            (true, None) => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidCard,
                    "a discard is required",
                ))
            }
            (false, _) => None,
        };
        self.with_deal(at, |deal, codec| {
            deal.swap(codec, declarer, turn_card, seat, card)
        })
    }

    pub fn defense(&self, at: &DealRef, seat: i32, alone: bool) -> Result<DefenseEcho, DomainError> {
        let seat = require_seat(seat)?;
        self.with_deal(at, |deal, _| deal.defense(seat, alone))
    }

    // ---------- tricks ----------

    pub fn create_trick(&self, at: &DealRef, n_trick: i32) -> Result<TrickView, DomainError> {
        let index = ordinal(n_trick, SequenceKind::Trick)?;
        self.with_deal(at, |deal, _| deal.create_trick(index).map(TrickView::from))
    }

    pub fn trick_summary(&self, at: &DealRef, n_trick: i32) -> Result<TrickView, DomainError> {
        self.with_deal(at, |deal, _| {
            let index = require_latest(n_trick, deal.tricks().len(), SequenceKind::Trick)?;
            Ok(TrickView::from(&deal.tricks()[index]))
        })
    }

    pub fn complete_trick(&self, at: &DealRef, n_trick: i32) -> Result<TrickSummary, DomainError> {
        let index = ordinal(n_trick, SequenceKind::Trick)?;
        self.with_deal(at, |deal, _| deal.complete_trick(index))
    }

    pub fn play(
        &self,
        at: &DealRef,
        req: &PlayRequest,
        commit: bool,
    ) -> Result<PlayResult, DomainError> {
        let trick = ordinal(req.trick, SequenceKind::Trick)?;
        let seq = u8::try_from(req.seq).map_err(|_| {
            DomainError::sequence(SequenceKind::Play, format!("bad play sequence: {}", req.seq))
        })?;
        let seat = require_seat(req.seat)?;
        let card = match (commit, req.card) {
            (true, Some(raw)) => Some(WireCardId::new(raw)?),
            (true, None) => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidCard,
                    "a card is required",
                ))
            }
            (false, _) => None,
        };
        self.with_deal(at, |deal, codec| {
            deal.play(codec, trick, seq, seat, card)
        })
    }
}
