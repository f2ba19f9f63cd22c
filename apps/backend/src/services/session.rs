//! Session and game records owned by the registry.

use serde::Serialize;
use tracing::info;

use crate::domain::codec::CardCodec;
use crate::domain::deal::Deal;
use crate::domain::scoring::DealScore;
use crate::domain::state::{Status, PLAYERS};
use crate::errors::domain::{DomainError, SequenceKind, StatusKind};

/// Caller-supplied ordinal; negative values can never match a slot.
pub(crate) fn ordinal(raw: i32, kind: SequenceKind) -> Result<usize, DomainError> {
    usize::try_from(raw)
        .map_err(|_| DomainError::sequence(kind, format!("negative index: {raw}")))
}

/// The index must address the most recently created child.
pub(crate) fn require_latest(
    raw: i32,
    count: usize,
    kind: SequenceKind,
) -> Result<usize, DomainError> {
    let index = ordinal(raw, kind.clone())?;
    if count > 0 && index == count - 1 {
        Ok(index)
    } else {
        Err(DomainError::sequence(
            kind,
            format!("index {index} is not the current one (count {count})"),
        ))
    }
}

/// The index must name the next free slot.
pub(crate) fn require_next(raw: i32, count: usize, kind: SequenceKind) -> Result<usize, DomainError> {
    let index = ordinal(raw, kind.clone())?;
    if index == count {
        Ok(index)
    } else {
        Err(DomainError::sequence(
            kind,
            format!("expected index {count}, got {index}"),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub token: String,
    pub status: Status,
    pub games: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub index: usize,
    pub status: Status,
    pub target_score: u16,
    pub seat_scores: [u16; PLAYERS],
    pub team_scores: [u16; 2],
    pub winning_team: Option<usize>,
    pub deals: usize,
}

#[derive(Debug)]
pub struct Game {
    pub index: usize,
    pub status: Status,
    target_score: u16,
    seat_scores: [u16; PLAYERS],
    team_scores: [u16; 2],
    winning_team: Option<usize>,
    pub(crate) deals: Vec<Deal>,
}

impl Game {
    pub fn new(index: usize, target_score: u16) -> Self {
        Self {
            index,
            status: Status::Active,
            target_score,
            seat_scores: [0; PLAYERS],
            team_scores: [0; 2],
            winning_team: None,
            deals: Vec::new(),
        }
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn require_active(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::status(
                StatusKind::GameInactive,
                format!("game {} is complete", self.index),
            ))
        }
    }

    /// Credits a finished deal's points; the first team to reach the target wins.
    pub fn apply_score(&mut self, score: &DealScore) {
        for (total, &points) in self.seat_scores.iter_mut().zip(&score.seat_points) {
            *total += u16::from(points);
        }
        for (total, &points) in self.team_scores.iter_mut().zip(&score.team_points) {
            *total += u16::from(points);
        }
        if self.winning_team.is_none() {
            self.winning_team = (0..2).find(|&t| self.team_scores[t] >= self.target_score);
            if let Some(team) = self.winning_team {
                info!(game = self.index, team, scores = ?self.team_scores, "target score reached");
            }
        }
    }

    /// Latest deal, which must still be active.
    pub fn current_deal_mut(&mut self, raw: i32) -> Result<&mut Deal, DomainError> {
        let index = require_latest(raw, self.deals.len(), SequenceKind::Deal)?;
        let deal = &mut self.deals[index];
        if !deal.status.is_active() {
            return Err(DomainError::status(
                StatusKind::DealInactive,
                format!("deal {index} is complete"),
            ));
        }
        Ok(deal)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            index: self.index,
            status: self.status,
            target_score: self.target_score,
            seat_scores: self.seat_scores,
            team_scores: self.team_scores,
            winning_team: self.winning_team,
            deals: self.deals.len(),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub status: Status,
    pub(crate) codec: CardCodec,
    pub(crate) games: Vec<Game>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            status: Status::Active,
            codec: CardCodec::new(),
            games: Vec::new(),
        }
    }

    pub fn codec(&self) -> &CardCodec {
        &self.codec
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn require_active(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::status(
                StatusKind::SessionInactive,
                format!("session {} is complete", self.token),
            ))
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            token: self.token.clone(),
            status: self.status,
            games: self.games.len(),
        }
    }
}

/// Latest game, which must still be active.
pub(crate) fn current_game_mut(games: &mut [Game], raw: i32) -> Result<&mut Game, DomainError> {
    let index = require_latest(raw, games.len(), SequenceKind::Game)?;
    let game = &mut games[index];
    game.require_active()?;
    Ok(game)
}
