use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::arena::{
    action::AgentAction,
    game_state::{ActionRequest, HandState, Position},
};

use super::{Agent, AgentGenerator, passive_action};

/// A simple agent that checks when it can and calls everything else.
#[derive(Debug, Clone)]
pub struct CallingAgent {
    name: String,
}

impl CallingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for CallingAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        CallingAgent::new(format!("CallingAgent-{idx}"))
    }
}

impl Agent for CallingAgent {
    fn act(&mut self, _id: Uuid, _game_state: &HandState, request: &ActionRequest) -> AgentAction {
        passive_action(request)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Default `AgentGenerator` for `CallingAgent`.
#[derive(Debug, Clone, Default)]
pub struct CallingAgentGenerator {
    name: Option<String>,
}

impl CallingAgentGenerator {
    pub fn new() -> Self {
        Self { name: None }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    fn resolve_name(&self, position: Position) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("CallingAgent-{position}"))
    }
}

impl AgentGenerator for CallingAgentGenerator {
    fn generate(&self, position: Position, _game_state: &HandState) -> Box<dyn Agent> {
        Box::new(CallingAgent::new(self.resolve_name(position)))
    }
}
