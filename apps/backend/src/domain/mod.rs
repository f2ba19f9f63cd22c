//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_types;
pub mod codec;
pub mod deal;
pub mod scoring;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_deal;
#[cfg(test)]
mod tests_props_deal;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use bidding::{BidCall, BidOutcome, CallStrength, Contract};
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_types::{full_deck, Card, Rank, Suit};
pub use codec::{CardCodec, DeckLayout, ProtocolTables, WireCardId};
pub use deal::{Deal, DealPhase, DealSummary, DefenseEcho, PlayResult};
pub use scoring::{DealScore, DealScorer, StandardScoring};
pub use state::{Seat, Status};
pub use tricks::{Trick, TrickSummary};
