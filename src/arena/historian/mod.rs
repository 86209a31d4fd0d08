//! Historians are told about every event in a hand as it happens. They can
//! keep the history in memory, write it to disk, or turn it into training
//! data.
//!
//! A historian that returns an error is removed from the simulation, or the
//! simulation panics if it was built with `panic_on_historian_error`.
#[cfg(feature = "serde")]
mod directory_historian;
mod failing;
mod null;
mod replay;
mod vec;

use std::cell::BorrowMutError;

use thiserror::Error;
use uuid::Uuid;

use super::{HandState, action::Action};

#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Shared storage is already borrowed: {0}")]
    BorrowMutError(#[from] BorrowMutError),
}

/// Something that wants to know what happened in each hand.
pub trait Historian {
    /// Record one event. `game_state` is the state after the event.
    fn record_action(
        &mut self,
        id: Uuid,
        game_state: &HandState,
        action: Action,
    ) -> Result<(), HistorianError>;
}

#[cfg(feature = "serde")]
pub use directory_historian::DirectoryHistorian;
pub use failing::FailingHistorian;
pub use null::NullHistorian;
pub use replay::{ReplayHistorian, Transition};
pub use vec::{HistoryRecord, VecHistorian};
