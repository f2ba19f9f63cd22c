//! Game/session registry services.

pub mod registry;
pub mod session;

pub use registry::{BidRequest, DealRef, PlayRequest, SessionRegistry, SwapRequest, TrickView};
pub use session::{Game, GameSummary, Session, SessionSummary};
