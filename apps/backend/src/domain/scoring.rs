//! Deal scoring: turns a finished deal's tricks-won tally into points.

use serde::Serialize;

use crate::domain::bidding::Contract;
use crate::domain::state::{team_of, PLAYERS, TRICKS_PER_DEAL};

/// Points awarded for one deal, credited to both seats of the scoring team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealScore {
    pub team_points: [u8; 2],
    pub seat_points: [u8; PLAYERS],
}

impl DealScore {
    fn for_team(team: usize, points: u8) -> Self {
        let mut score = Self::default();
        score.team_points[team] = points;
        for seat in 0..PLAYERS {
            if team_of(seat as u8) == team {
                score.seat_points[seat] = points;
            }
        }
        score
    }
}

/// Scoring collaborator consulted when a deal completes.
pub trait DealScorer: Send + Sync {
    /// `contract` is `None` for a deal thrown in after eight passes.
    fn score(&self, contract: Option<&Contract>, tricks_won: &[u8; PLAYERS]) -> DealScore;
}

/// Makers: 3-4 tricks = 1, march = 2, lone march = 4. Euchred makers give
/// the defenders 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScoring;

impl DealScorer for StandardScoring {
    fn score(&self, contract: Option<&Contract>, tricks_won: &[u8; PLAYERS]) -> DealScore {
        let Some(contract) = contract else {
            return DealScore::default();
        };
        let makers = contract.makers_team();
        let taken: u8 = (0..PLAYERS)
            .filter(|&s| team_of(s as u8) == makers)
            .map(|s| tricks_won[s])
            .sum();

        match taken as usize {
            TRICKS_PER_DEAL if contract.alone => DealScore::for_team(makers, 4),
            TRICKS_PER_DEAL => DealScore::for_team(makers, 2),
            3 | 4 => DealScore::for_team(makers, 1),
            _ => DealScore::for_team(1 - makers, 2),
        }
    }
}
