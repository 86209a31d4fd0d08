use crate::arena::{Agent, AgentGenerator, HandState, game_state::Position};

/// An agent that can produce a boxed copy of itself.
pub trait CloneAgent: Agent {
    fn clone_box(&self) -> Box<dyn Agent>;
}

impl<T> CloneAgent for T
where
    T: 'static + Agent + Clone,
{
    fn clone_box(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

/// Hands out a fresh copy of the same agent for every hand.
pub struct CloneAgentGenerator<T> {
    agent: T,
}

impl<T> CloneAgentGenerator<T>
where
    T: CloneAgent,
{
    pub fn new(agent: T) -> Self {
        CloneAgentGenerator { agent }
    }
}

impl<T> AgentGenerator for CloneAgentGenerator<T>
where
    T: CloneAgent,
{
    fn generate(&self, _position: Position, _game_state: &HandState) -> Box<dyn Agent> {
        self.agent.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{TableConfig, action::AgentAction, agent::VecReplayAgent};

    use super::*;

    #[test]
    fn test_each_clone_starts_fresh() {
        let state = HandState::new(&TableConfig::default()).unwrap();
        let generator =
            CloneAgentGenerator::new(VecReplayAgent::new("replay", vec![AgentAction::Call]));

        let mut state = state;
        state.post_blinds();
        let request = state.action_request();
        for position in Position::BOTH {
            let mut agent = generator.generate(position, &state);
            assert_eq!("replay", agent.name());
            assert_eq!(
                AgentAction::Call,
                agent.act(uuid::Uuid::now_v7(), &state, &request)
            );
        }
    }
}
