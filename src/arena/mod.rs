//! This is the arena module for running heads-up Pot-Limit Omaha hands
//! between agents.
//!
//! # Parts
//!
//! - [`HandState`] is the betting engine. It holds the seats, the pot, and
//!   the board, decides what is legal and applies decisions.
//! - [`Agent`]s make the decisions.
//! - [`HandSimulation`] drives a hand from the blinds to the payout, one
//!   step per iteration.
//! - [`Historian`]s are told about every event as it happens.
//!
//! # Example
//!
//! ```
//! use rs_plo::arena::agent::RandomAgent;
//! use rs_plo::arena::historian::VecHistorian;
//! use rs_plo::arena::{HandSimulationBuilder, Seats, TableConfig};
//!
//! let historian = VecHistorian::new();
//! let storage = historian.get_storage();
//!
//! let mut sim = HandSimulationBuilder::default()
//!     .table_config(TableConfig::default())
//!     .agents(Seats::new(
//!         Box::<RandomAgent>::default(),
//!         Box::<RandomAgent>::default(),
//!     ))
//!     .historians(vec![Box::new(historian)])
//!     .build()
//!     .unwrap();
//!
//! let outcome = sim.run().unwrap();
//! assert_eq!(0, outcome.rewards.oop + outcome.rewards.ip);
//! assert!(storage.borrow().len() > 5);
//! ```
pub mod action;
pub mod agent;
pub mod config;
pub mod errors;
pub mod game_state;
pub mod historian;
pub mod sim_builder;
pub mod simulation;
pub mod snapshot;

#[cfg(test)]
pub mod test_util;

pub use agent::{Agent, AgentGenerator};
pub use config::{BettingRules, ConfigError, TableConfig};
pub use errors::{GameStateError, HandError, HandSimulationError};
pub use game_state::{
    ActionRequest, ActionSet, BettingStatus, HandState, Position, Seat, Seats, Settlement,
    ShowdownResult, Street,
};
pub use historian::{Historian, HistorianError};
pub use sim_builder::HandSimulationBuilder;
pub use simulation::{HandOutcome, HandSimulation};
pub use snapshot::{HandSnapshot, SeatSnapshot};
