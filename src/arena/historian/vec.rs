use std::{cell::RefCell, rc::Rc};

use uuid::Uuid;

use crate::arena::{HandState, action::Action};

use super::{Historian, HistorianError};

/// One recorded event and the state right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub after_game_state: HandState,
    pub action: Action,
}

/// Keeps every event in memory.
///
/// The storage is shared so the records can still be read after the
/// historian has been boxed and handed to a simulation.
///
/// ```
/// use rs_plo::arena::historian::VecHistorian;
/// use rs_plo::arena::{HandSimulationBuilder, TableConfig};
///
/// let historian = VecHistorian::new();
/// let storage = historian.get_storage();
///
/// let mut sim = HandSimulationBuilder::default()
///     .table_config(TableConfig::default())
///     .historians(vec![Box::new(historian)])
///     .build()
///     .unwrap();
/// sim.run().unwrap();
///
/// assert!(!storage.borrow().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VecHistorian {
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_actions(actions: Rc<RefCell<Vec<HistoryRecord>>>) -> Self {
        Self { records: actions }
    }

    pub fn get_storage(&self) -> Rc<RefCell<Vec<HistoryRecord>>> {
        self.records.clone()
    }
}

impl Historian for VecHistorian {
    fn record_action(
        &mut self,
        id: Uuid,
        game_state: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        let mut records = self.records.try_borrow_mut()?;
        records.push(HistoryRecord {
            id,
            after_game_state: game_state.clone(),
            action,
        });
        Ok(())
    }
}
