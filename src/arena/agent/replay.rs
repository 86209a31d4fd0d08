use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::arena::{
    action::AgentAction,
    game_state::{ActionRequest, HandState},
};

use super::Agent;

/// A replay agent that will replay a sequence of actions
/// from a vector. Once the actions run out it plays the default.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    name: String,
    actions: Vec<AgentAction>,
    idx: usize,
    default: AgentAction,
}

impl VecReplayAgent {
    pub fn new(name: impl Into<String>, actions: Vec<AgentAction>) -> Self {
        Self::new_with_default(name, actions, AgentAction::Fold)
    }

    pub fn new_with_default(
        name: impl Into<String>,
        actions: Vec<AgentAction>,
        default: AgentAction,
    ) -> Self {
        Self {
            name: name.into(),
            actions,
            idx: 0,
            default,
        }
    }
}

/// A replay agent that will replay a sequence of actions from a slice.
#[derive(Debug, Clone)]
pub struct SliceReplayAgent<'a> {
    name: String,
    actions: &'a [AgentAction],
    idx: usize,
    default: AgentAction,
}

impl<'a> SliceReplayAgent<'a> {
    pub fn new(name: impl Into<String>, actions: &'a [AgentAction]) -> Self {
        Self::new_with_default(name, actions, AgentAction::Fold)
    }

    pub fn new_with_default(
        name: impl Into<String>,
        actions: &'a [AgentAction],
        default: AgentAction,
    ) -> Self {
        Self {
            name: name.into(),
            actions,
            idx: 0,
            default,
        }
    }
}

impl Agent for VecReplayAgent {
    #[instrument(level = "trace", skip(self, _game_state, _request), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, _game_state: &HandState, _request: &ActionRequest) -> AgentAction {
        let idx = self.idx;
        self.idx += 1;
        self.actions.get(idx).copied().unwrap_or_else(|| {
            debug!(
                idx,
                actions_len = self.actions.len(),
                ?self.default,
                "VecReplayAgent exhausted actions, using default"
            );
            self.default
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<'a> Agent for SliceReplayAgent<'a> {
    #[instrument(level = "trace", skip(self, _game_state, _request), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, _game_state: &HandState, _request: &ActionRequest) -> AgentAction {
        let idx = self.idx;
        self.idx += 1;
        match self.actions.get(idx) {
            Some(a) => {
                trace!(idx, ?a, "SliceReplayAgent replaying action");
                *a
            }
            None => {
                debug!(
                    idx,
                    actions_len = self.actions.len(),
                    ?self.default,
                    "SliceReplayAgent exhausted actions, using default"
                );
                self.default
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
