//! `Agent`s are the players in a hand. Every decision the engine needs comes
//! from one of them.
//!
//! Some basic agents are provided as a way of testing baseline value, along
//! with `ChannelAgent` which hands the decision to something outside the
//! simulation, usually a person.
mod all_in;
mod calling;
mod channel;
mod clone;
#[cfg(feature = "serde")]
mod config;
mod folding;
mod generator;
mod random;
mod replay;

use uuid::Uuid;

use crate::arena::{
    HandState, Historian,
    action::{ActionKind, AgentAction},
    game_state::ActionRequest,
};

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to to implement the logic and state.
pub trait Agent {
    /// Decide what to do. `request` holds the legal actions and bet limits
    /// for the seat that is being asked.
    fn act(&mut self, id: Uuid, game_state: &HandState, request: &ActionRequest) -> AgentAction;

    fn name(&self) -> &str;

    /// Should an invalid decision be answered by asking again.
    ///
    /// Seats driven by people return true. Automated seats keep the default
    /// and an invalid decision from them stops the hand with an error.
    fn reprompt_on_invalid(&self) -> bool {
        false
    }

    // Some Agents may need to be able to see the changes in the game
    // state. This is the method that will be called to create historians
    // when starting a new simulation.
    fn historian(&self) -> Option<Box<dyn Historian>> {
        None
    }
}

/// Check when possible, otherwise call, otherwise fold.
pub(crate) fn passive_action(request: &ActionRequest) -> AgentAction {
    if request.legal.contains(ActionKind::Check) {
        AgentAction::Check
    } else if request.legal.contains(ActionKind::Call) {
        AgentAction::Call
    } else {
        AgentAction::Fold
    }
}

/// The bet sizes that the engine will accept, if a bet is legal at all.
/// A stack too short for the minimum can only go all in.
pub(crate) fn bet_range(
    game_state: &HandState,
    request: &ActionRequest,
) -> Option<std::ops::RangeInclusive<u32>> {
    if !request.legal.contains(ActionKind::Bet) {
        None
    } else if request.min_bet <= request.max_bet {
        Some(request.min_bet..=request.max_bet)
    } else if request.max_bet == game_state.seats[request.position].available() {
        Some(request.max_bet..=request.max_bet)
    } else {
        None
    }
}

pub use all_in::{AllInAgent, AllInAgentGenerator};
pub use calling::{CallingAgent, CallingAgentGenerator};
pub use channel::{ActionPrompt, ActionReply, ChannelAgent, ChannelSeat};
pub use clone::{CloneAgent, CloneAgentGenerator};
#[cfg(feature = "serde")]
pub use config::{AgentConfig, AgentConfigError, ConfigAgentGenerator};
pub use folding::{FoldingAgent, FoldingAgentGenerator};
pub use generator::AgentGenerator;
pub use random::{RandomAgent, RandomAgentGenerator};
pub use replay::{SliceReplayAgent, VecReplayAgent};
