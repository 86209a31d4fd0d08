use crate::arena::{Agent, HandState, game_state::Position};

/// AgentGenerator is a trait that is used to build agents for runs of many
/// hands where each simulation needs a new agent.
pub trait AgentGenerator {
    /// This method is called before each hand to build a new agent.
    /// The `position` parameter indicates which seat this agent is for.
    fn generate(&self, position: Position, game_state: &HandState) -> Box<dyn Agent>;
}
