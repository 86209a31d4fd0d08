use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::arena::{
    action::{ActionKind, AgentAction},
    game_state::{ActionRequest, HandState, Position},
};

use super::{Agent, AgentGenerator};

/// A simple agent that folds whenever it can, and checks otherwise.
#[derive(Debug, Clone)]
pub struct FoldingAgent {
    name: String,
}

impl FoldingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FoldingAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        FoldingAgent::new(format!("FoldingAgent-{idx}"))
    }
}

impl Agent for FoldingAgent {
    fn act(&mut self, _id: Uuid, _game_state: &HandState, request: &ActionRequest) -> AgentAction {
        if request.legal.contains(ActionKind::Fold) {
            AgentAction::Fold
        } else {
            AgentAction::Check
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Default Generator for `FoldingAgent`.
#[derive(Debug, Clone, Default)]
pub struct FoldingAgentGenerator {
    name: Option<String>,
}

impl FoldingAgentGenerator {
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
            .unwrap_or_else(|| format!("FoldingAgent-{position}"))
    }
}

impl AgentGenerator for FoldingAgentGenerator {
    fn generate(&self, position: Position, _game_state: &HandState) -> Box<dyn Agent> {
        Box::new(FoldingAgent::new(self.resolve_name(position)))
    }
}
