use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{instrument, trace};
use uuid::Uuid;

use crate::arena::{
    Agent, AgentGenerator,
    action::AgentAction,
    game_state::{ActionRequest, HandState, Position},
};

use super::{bet_range, passive_action};

/// An agent that puts in as much as the pot limit allows every time it can.
/// After a few streets of that, or against a short stack, it is all in.
#[derive(Debug, Clone)]
pub struct AllInAgent {
    name: String,
}

impl AllInAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for AllInAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        AllInAgent::new(format!("AllInAgent-{idx}"))
    }
}

impl Agent for AllInAgent {
    #[instrument(level = "trace", skip(self, game_state, request), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, game_state: &HandState, request: &ActionRequest) -> AgentAction {
        match bet_range(game_state, request) {
            Some(range) => {
                let bet = *range.end();
                trace!(bet, "AllInAgent betting the maximum");
                AgentAction::Bet(bet)
            }
            // Facing an all in there's nothing to raise, so call it.
            None => passive_action(request),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Default `AgentGenerator` for `AllInAgent`.
#[derive(Debug, Clone, Default)]
pub struct AllInAgentGenerator {
    name: Option<String>,
}

impl AllInAgentGenerator {
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
            .unwrap_or_else(|| format!("AllInAgent-{position}"))
    }
}

impl AgentGenerator for AllInAgentGenerator {
    fn generate(&self, position: Position, _game_state: &HandState) -> Box<dyn Agent> {
        Box::new(AllInAgent::new(self.resolve_name(position)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{HandSimulationBuilder, Seats, TableConfig, test_util::assert_valid_hand_state};

    fn started_state() -> HandState {
        let mut state = HandState::new(&TableConfig::default()).unwrap();
        state.post_blinds();
        state
    }

    #[test]
    fn test_all_in_generator_produces_max_bet() {
        let generator = AllInAgentGenerator::default();
        let game_state = started_state();

        let mut agent = generator.generate(Position::Ip, &game_state);
        assert_eq!(agent.name(), "AllInAgent-IP");

        let request = game_state.action_request();
        assert_eq!(
            AgentAction::Bet(6),
            agent.act(Uuid::now_v7(), &game_state, &request)
        );
    }

    #[test]
    fn test_all_in_generator_uses_custom_name() {
        let generator = AllInAgentGenerator::with_name("HeroBot");
        let agent = generator.generate(Position::Oop, &started_state());
        assert_eq!(agent.name(), "HeroBot");
    }

    #[test_log::test]
    fn test_two_max_bettors_get_all_in() {
        let mut sim = HandSimulationBuilder::default()
            .table_config(TableConfig::default())
            .agents(Seats::new(
                Box::new(AllInAgent::default()),
                Box::new(AllInAgent::default()),
            ))
            .build()
            .unwrap();
        let outcome = sim.run().unwrap();

        assert!(sim.game_state.is_all_in);
        assert_eq!(400, outcome.pot);
        assert_eq!(5, sim.game_state.board.len());
        assert_valid_hand_state(&sim.game_state);
    }
}
