use thiserror::Error;

use crate::core::DeckError;

use super::action::AgentAction;
use super::game_state::{ActionSet, Position};

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum GameStateError {
    #[error("Action {action:?} is not one of the legal actions {legal}")]
    InvalidAction {
        action: AgentAction,
        legal: ActionSet,
    },
    #[error("Bet of {amount} is outside of the legal range [{min}, {max}]")]
    InvalidBetAmount { amount: u32, min: u32, max: u32 },
    #[error("The hand is over and can't accept any more actions")]
    HandOver,
    #[error("Chips are not conserved: expected {expected} in play but found {actual}")]
    StateConsistency { expected: u32, actual: u32 },
    #[error("Showdown needs five community cards, only {0} were dealt")]
    IncompleteBoard(usize),
    #[error("Seat {0} has no hole cards to show down")]
    MissingHoleCards(Position),
}

impl GameStateError {
    /// Errors that come from a bad decision rather than a broken hand.
    /// A driver can ask for another decision after one of these.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameStateError::InvalidAction { .. } | GameStateError::InvalidBetAmount { .. }
        )
    }
}

/// Failures while playing a hand. All of these halt the hand.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HandError {
    #[error("Game state error: {0}")]
    Engine(#[from] GameStateError),

    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    #[error("Agent in seat {position} made an illegal decision: {source}")]
    Agent {
        position: Position,
        source: GameStateError,
    },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum HandSimulationError {
    #[error("Builder needs a game state or a table config")]
    NeedGameState,

    #[error("Builder was given both a game state and a table config")]
    ConflictingState,

    #[error("Invalid table config: {0}")]
    InvalidTableConfig(String),

    #[error("Game state has already started")]
    AlreadyStarted,
}
