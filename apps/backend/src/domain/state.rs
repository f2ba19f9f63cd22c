use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub type Seat = u8; // 0..=3

pub const PLAYERS: usize = 4;
/// Seat 3 deals every hand in this model.
pub const DEALER: Seat = 3;
pub const TRICKS_PER_DEAL: usize = 5;

/// Lifecycle status shared by sessions, games, deals and tricks.
///
/// Transitions are monotonic: `Active` -> `Complete`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Complete,
}

impl Status {
    pub fn is_active(self) -> bool {
        self == Status::Active
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(4)) as Seat
}

/// Returns the next player clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_player(p: Seat) -> Seat {
    seat_offset(p, 1)
}

/// Seat across the table.
#[inline]
pub fn partner_of(p: Seat) -> Seat {
    seat_offset(p, 2)
}

/// Round-start seat (player to the left of the dealer).
#[inline]
pub fn round_start_seat(dealer: Seat) -> Seat {
    next_player(dealer)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    seat_offset(start, n as i8)
}

/// Team index: seats 0 and 2 are team 0, seats 1 and 3 are team 1.
#[inline]
pub fn team_of(seat: Seat) -> usize {
    (seat % 2) as usize
}

pub fn require_seat(raw: i32) -> Result<Seat, DomainError> {
    if (0..PLAYERS as i32).contains(&raw) {
        Ok(raw as Seat)
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidSeat,
            format!("seat out of range: {raw}"),
        ))
    }
}
