use tracing::warn;
use uuid::Uuid;

use crate::arena::{HandState, action::Action};

use super::{Historian, HistorianError};

/// A historian that will always fail to record an action
/// and will return an error.
///
/// This historian is useful for testing the behavior of the simulation
pub struct FailingHistorian;

impl Historian for FailingHistorian {
    fn record_action(
        &mut self,
        _id: Uuid,
        _game_state: &HandState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        warn!("FailingHistorian intentionally returning error");
        Err(HistorianError::UnableToRecordAction)
    }
}
