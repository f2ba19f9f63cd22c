//! Bidding types: calls, engine outcomes, the frozen contract and the bid counter.

use serde::Serialize;

use crate::domain::state::{partner_of, team_of, Seat, PLAYERS};
use crate::domain::Suit;
use crate::errors::domain::{DomainError, EngineFailureKind, SequenceKind, ValidationKind};

/// Two rounds of four bids.
pub const MAX_BIDS: i8 = 8;

/// A bid as submitted on the wire: pass, or (suit, alone).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BidCall {
    Pass,
    Call { suit: Suit, alone: bool },
}

impl BidCall {
    /// Suit code -1 (or no suit) is a pass; 0..=3 name the trump suit.
    pub fn from_wire(suit: Option<i32>, alone: bool) -> Result<Self, DomainError> {
        match suit {
            None | Some(-1) => Ok(BidCall::Pass),
            Some(code) => {
                let code = u8::try_from(code).map_err(|_| {
                    DomainError::validation(
                        ValidationKind::InvalidSuit,
                        format!("bad suit code: {code}"),
                    )
                })?;
                Ok(BidCall::Call {
                    suit: Suit::from_index(code)?,
                    alone,
                })
            }
        }
    }

    /// Wire suit code (-1 for pass).
    pub fn suit_code(self) -> i32 {
        match self {
            BidCall::Pass => -1,
            BidCall::Call { suit, .. } => suit.index() as i32,
        }
    }

    pub fn alone(self) -> bool {
        matches!(self, BidCall::Call { alone: true, .. })
    }
}

/// 0 = pass, 1 = normal call, 2 = going alone.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum CallStrength {
    Pass = 0,
    Call = 1,
    Alone = 2,
}

impl CallStrength {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// What the hand engine reports back for a suggested or submitted bid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BidOutcome {
    /// The call as the engine (possibly) adjusted it.
    pub call: BidCall,
    /// Partner who plays along with the declarer; `None` when alone.
    pub partner: Option<Seat>,
    pub declarer: Option<Seat>,
    pub trump: Option<Suit>,
    pub strength: CallStrength,
}

impl BidOutcome {
    pub fn pass() -> Self {
        Self {
            call: BidCall::Pass,
            partner: None,
            declarer: None,
            trump: None,
            strength: CallStrength::Pass,
        }
    }

    pub fn call(seat: Seat, suit: Suit, alone: bool) -> Self {
        Self {
            call: BidCall::Call { suit, alone },
            partner: (!alone).then(|| partner_of(seat)),
            declarer: Some(seat),
            trump: Some(suit),
            strength: if alone {
                CallStrength::Alone
            } else {
                CallStrength::Call
            },
        }
    }

    /// Checks the outcome is coherent for a bid made by `seat`.
    pub fn validate(&self, seat: Seat) -> Result<(), DomainError> {
        let ok = match self.strength {
            CallStrength::Pass => {
                self.call == BidCall::Pass
                    && self.declarer.is_none()
                    && self.trump.is_none()
                    && self.partner.is_none()
            }
            CallStrength::Call => {
                self.declarer == Some(seat)
                    && self.partner == Some(partner_of(seat))
                    && matches!(self.call, BidCall::Call { suit, alone: false } if Some(suit) == self.trump)
            }
            CallStrength::Alone => {
                self.declarer == Some(seat)
                    && self.partner.is_none()
                    && matches!(self.call, BidCall::Call { suit, alone: true } if Some(suit) == self.trump)
            }
        };
        if ok {
            Ok(())
        } else {
            Err(DomainError::engine(
                EngineFailureKind::InvalidOutcome,
                format!("incoherent bid outcome for seat {seat}: {self:?}"),
            ))
        }
    }
}

/// Declarer, trump and lone flag, frozen once a call is made.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub declarer: Seat,
    #[serde(serialize_with = "serialize_suit")]
    pub trump: Suit,
    pub alone: bool,
    /// Bidding round (0 or 1) the call was made in.
    pub round: u8,
}

fn serialize_suit<S: serde::Serializer>(suit: &Suit, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(suit.index())
}

impl Contract {
    /// The declarer's partner when going alone.
    pub fn sitting_out(&self) -> Option<Seat> {
        self.alone.then(|| partner_of(self.declarer))
    }

    /// Printed suit of the left bower's Jack. Display only; ranking uses
    /// [`reclassify`](crate::domain::cards_logic::reclassify).
    pub fn left_bower_suit(&self) -> Suit {
        self.trump.same_color()
    }

    pub fn makers_team(&self) -> usize {
        team_of(self.declarer)
    }

    pub fn is_defender(&self, seat: Seat) -> bool {
        team_of(seat) != self.makers_team()
    }
}

/// Round/seat of one bid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BidSlot {
    pub round: u8,
    pub seat: Seat,
}

/// Monotonic bid counter; -1 before the first bid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BidCounter(i8);

impl BidCounter {
    pub fn new() -> Self {
        Self(-1)
    }

    pub fn bids_made(self) -> u8 {
        (self.0 + 1) as u8
    }

    pub fn exhausted(self) -> bool {
        self.0 + 1 >= MAX_BIDS
    }

    /// Round and seat of the next bid, if any remain.
    pub fn next_slot(self) -> Option<BidSlot> {
        let next = self.0 + 1;
        (next < MAX_BIDS).then(|| BidSlot {
            round: (next as usize / PLAYERS) as u8,
            seat: (next as usize % PLAYERS) as Seat,
        })
    }

    /// The request's round/seat must name the next bid exactly.
    pub fn require_next(self, round: u8, seat: Seat) -> Result<BidSlot, DomainError> {
        match self.next_slot() {
            Some(slot) if slot.round == round && slot.seat == seat => Ok(slot),
            Some(slot) => Err(DomainError::sequence(
                SequenceKind::Bid,
                format!(
                    "expected bid round {} seat {}, got round {round} seat {seat}",
                    slot.round, slot.seat
                ),
            )),
            None => Err(DomainError::sequence(
                SequenceKind::Bid,
                "bidding is exhausted",
            )),
        }
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl Default for BidCounter {
    fn default() -> Self {
        Self::new()
    }
}
