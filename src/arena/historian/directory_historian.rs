use std::{collections::HashMap, fs::File, path::PathBuf};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::arena::{HandState, action::Action};

use super::{Historian, HistorianError};

/// A historian that writes every hand's events into a directory, one
/// pretty printed JSON file per hand named after the hand id.
#[derive(Debug, Clone)]
pub struct DirectoryHistorian {
    base_path: PathBuf,
    sequence: HashMap<Uuid, Vec<Action>>,
}

impl DirectoryHistorian {
    /// Creates a new `DirectoryHistorian` that writes under `base_path`.
    /// The directory is created on the first write if it doesn't exist.
    pub fn new(base_path: PathBuf) -> Self {
        debug!(?base_path, "Creating DirectoryHistorian");
        DirectoryHistorian {
            base_path,
            sequence: HashMap::new(),
        }
    }

    /// Where the history of the hand with `id` is written.
    pub fn hand_path(&self, id: Uuid) -> PathBuf {
        self.base_path.join(id.to_string()).with_extension("json")
    }
}

impl Historian for DirectoryHistorian {
    #[instrument(level = "trace", skip(self, _game_state), fields(base_path = ?self.base_path))]
    fn record_action(
        &mut self,
        id: Uuid,
        _game_state: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        if !self.base_path.exists() {
            debug!(?self.base_path, "Creating directory for hand history");
            std::fs::create_dir_all(&self.base_path)?;
        }

        let hand_path = self.hand_path(id);
        let is_complete = matches!(action, Action::HandComplete);

        // The whole sequence is rewritten each time so the file is always a
        // valid JSON array.
        let file = File::create(&hand_path)?;
        let sequence = self.sequence.entry(id).or_default();
        sequence.push(action);

        debug!(
            ?hand_path,
            action_count = sequence.len(),
            "Writing hand history"
        );
        serde_json::to_writer_pretty(&file, sequence)?;

        if is_complete {
            // Nothing more will come for this hand.
            self.sequence.remove(&id);
        }
        Ok(())
    }
}
