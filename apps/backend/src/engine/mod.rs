//! Hand engine: the capability the deal state machine consults for every
//! bid, kitty exchange and card played.

mod rules;
mod trait_def;

pub use rules::{RulesEngine, RulesEngineFactory};
pub use trait_def::{
    BidContext, DealSetup, EngineError, EngineFactory, HandEngine, PlayContext, SwapContext,
};
