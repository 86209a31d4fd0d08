use std::sync::atomic::{AtomicUsize, Ordering};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{instrument, trace};
use uuid::Uuid;

use crate::arena::{
    action::{ActionKind, AgentAction},
    game_state::{ActionRequest, HandState, Position},
};

use super::{Agent, AgentGenerator, bet_range, passive_action};

/// An agent that picks a random legal action.
///
/// `percent_fold` and `percent_call` are indexed by how many actions have
/// already happened on the street, so later in a betting war the agent can
/// be made more or less stubborn. The last entry is used once the street
/// runs past the end.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    percent_fold: Vec<f64>,
    percent_call: Vec<f64>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>, percent_fold: Vec<f64>, percent_call: Vec<f64>) -> Self {
        Self::new_with_rng(
            name,
            percent_fold,
            percent_call,
            StdRng::from_rng(&mut rand::rng()),
        )
    }

    /// A random agent that plays the same way every time for a given seed.
    pub fn new_with_seed(
        name: impl Into<String>,
        percent_fold: Vec<f64>,
        percent_call: Vec<f64>,
        seed: u64,
    ) -> Self {
        Self::new_with_rng(
            name,
            percent_fold,
            percent_call,
            StdRng::seed_from_u64(seed),
        )
    }

    fn new_with_rng(
        name: impl Into<String>,
        percent_fold: Vec<f64>,
        percent_call: Vec<f64>,
        rng: StdRng,
    ) -> Self {
        Self {
            name: name.into(),
            percent_fold,
            percent_call,
            rng,
        }
    }

    fn probability(percents: &[f64], idx: usize) -> f64 {
        percents
            .get(idx.min(percents.len().saturating_sub(1)))
            .map_or(1.0, |p| p.clamp(0.0, 1.0))
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let idx = COUNTER.fetch_add(1, Ordering::Relaxed);
        RandomAgent::new(
            format!("RandomAgent-default-{idx}"),
            vec![0.25, 0.30, 0.50],
            vec![0.5, 0.6, 0.45],
        )
    }
}

impl Agent for RandomAgent {
    #[instrument(level = "trace", skip(self, game_state, request), fields(agent_name = %self.name))]
    fn act(&mut self, _id: Uuid, game_state: &HandState, request: &ActionRequest) -> AgentAction {
        let idx = game_state.num_actions as usize;
        let percent_fold = Self::probability(&self.percent_fold, idx);
        let percent_call = Self::probability(&self.percent_call, idx);

        let can_fold = request.legal.contains(ActionKind::Fold);

        let action = if can_fold && self.rng.random_bool(percent_fold) {
            AgentAction::Fold
        } else if self.rng.random_bool(percent_call) {
            passive_action(request)
        } else if let Some(range) = bet_range(game_state, request) {
            AgentAction::Bet(self.rng.random_range(range))
        } else {
            passive_action(request)
        };

        trace!(?action, idx, can_fold, "RandomAgent decision");
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct RandomAgentGenerator {
    name: Option<String>,
    percent_fold: Vec<f64>,
    percent_call: Vec<f64>,
}

impl RandomAgentGenerator {
    pub fn new(percent_fold: Vec<f64>, percent_call: Vec<f64>) -> Self {
        Self {
            name: None,
            percent_fold,
            percent_call,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn resolve_name(&self, position: Position) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("RandomAgent-{position}"))
    }
}

impl AgentGenerator for RandomAgentGenerator {
    fn generate(&self, position: Position, _game_state: &HandState) -> Box<dyn Agent> {
        Box::new(RandomAgent::new(
            self.resolve_name(position),
            self.percent_fold.clone(),
            self.percent_call.clone(),
        ))
    }
}

impl Default for RandomAgentGenerator {
    fn default() -> Self {
        Self::new(vec![0.25, 0.30, 0.50], vec![0.5, 0.6, 0.45])
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{
        HandSimulationBuilder, Seats, TableConfig,
        historian::VecHistorian,
        test_util::{assert_valid_hand_state, assert_valid_history},
    };
    use crate::core::Deck;

    use super::*;

    fn seeded_agent(name: &str, seed: u64) -> Box<RandomAgent> {
        Box::new(RandomAgent::new_with_seed(
            name,
            vec![0.1, 0.2, 0.3],
            vec![0.4, 0.4, 0.5],
            seed,
        ))
    }

    #[test]
    fn test_only_legal_actions() {
        let mut state = HandState::new(&TableConfig::default()).unwrap();
        state.post_blinds();
        state.apply(AgentAction::Call).unwrap();
        let request = state.action_request();

        let mut agent = RandomAgent::new_with_seed("r", vec![1.0], vec![0.0], 7);
        for _ in 0..50 {
            // Fold isn't offered so the agent has to bet.
            match agent.act(Uuid::now_v7(), &state, &request) {
                AgentAction::Bet(amount) => {
                    assert!((request.min_bet..=request.max_bet).contains(&amount));
                }
                action => panic!("Expected a bet, got {action:?}"),
            }
        }
    }

    #[test]
    fn test_probability_index_clamps() {
        assert_eq!(0.5, RandomAgent::probability(&[0.1, 0.5], 9));
        assert_eq!(1.0, RandomAgent::probability(&[], 0));
        assert_eq!(1.0, RandomAgent::probability(&[3.0], 0));
    }

    #[test_log::test]
    fn test_random_agents_keep_the_hand_valid() {
        // Uneven stacks and lots of seeds to hit short calls and all ins.
        for seed in 0..200u64 {
            let stacks = Seats::new(20 + (seed as u32 * 37) % 400, 20 + (seed as u32 * 91) % 400);
            let historian = VecHistorian::new();
            let storage = historian.get_storage();

            let mut deck = Deck::new();
            deck.shuffle_with_rng(&mut StdRng::seed_from_u64(seed));

            let mut sim = HandSimulationBuilder::default()
                .table_config(TableConfig {
                    starting_stacks: stacks,
                    ..TableConfig::default()
                })
                .agents(Seats::new(
                    seeded_agent("oop", seed),
                    seeded_agent("ip", seed + 10_000),
                ))
                .deck(deck)
                .historians(vec![Box::new(historian)])
                .build()
                .unwrap();

            let mut last_to_act = None;
            let mut last_num_actions = 0;
            for snapshot in sim.by_ref() {
                let snapshot = snapshot.unwrap();
                assert_eq!(stacks.oop + stacks.ip, snapshot.total_chips());

                // Whoever acted last can't be asked to act next.
                if snapshot.num_actions > last_num_actions && !snapshot.hand_over {
                    if let Some(prev) = last_to_act {
                        assert_ne!(prev, snapshot.to_act);
                    }
                }
                last_to_act = Some(snapshot.to_act);
                last_num_actions = snapshot.num_actions;
            }

            assert_valid_hand_state(&sim.game_state);
            assert_valid_history(&storage.borrow());
        }
    }
}
