use uuid::Uuid;

use crate::arena::{HandState, action::Action};

use super::{Historian, HistorianError};

/// A no-op historian that discards everything.
///
/// Useful when you need a historian but don't care about the history.
pub struct NullHistorian;

impl Historian for NullHistorian {
    fn record_action(
        &mut self,
        _id: Uuid,
        _game_state: &HandState,
        _action: Action,
    ) -> Result<(), HistorianError> {
        Ok(())
    }
}
