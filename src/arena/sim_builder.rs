use tracing::debug;
use uuid::Uuid;

use crate::core::Deck;
use crate::omaha::{HandRanker, OmahaRanker};

use super::{
    Agent, AgentGenerator, HandSimulation, HandState, TableConfig,
    agent::CallingAgent,
    errors::HandSimulationError,
    game_state::{Position, Seats},
    historian::Historian,
};

// A shuffled deck without any of the cards already in play.
fn build_deck(game_state: &HandState) -> Deck {
    let mut deck = Deck::new();
    deck.shuffle();

    let in_play = game_state
        .board
        .iter()
        .chain(game_state.seats.oop.hand.iter())
        .chain(game_state.seats.ip.hand.iter());
    for card in in_play {
        deck.remove(card);
    }
    deck
}

fn build_agents() -> Seats<Box<dyn Agent>> {
    Seats::new(
        Box::<CallingAgent>::default(),
        Box::<CallingAgent>::default(),
    )
}

/// # HandSimulationBuilder
///
/// Builds a [`HandSimulation`]. Either a [`TableConfig`] or a
/// [`HandState`] that hasn't started yet is required. Everything else is
/// optional.
///
/// ## Defaults
///
/// - Agents are two calling agents, which makes for a check down to showdown.
/// - The deck is freshly shuffled with any pre-dealt cards removed.
/// - Hands are ranked with [`OmahaRanker`].
/// - A historian error panics. Turn that off with
///   `panic_on_historian_error(false)` to drop the failing historian and
///   carry on.
///
/// ## Examples
///
/// ```
/// use rs_plo::arena::agent::{AllInAgent, FoldingAgent};
/// use rs_plo::arena::{HandSimulationBuilder, Position, Seats, TableConfig};
///
/// let mut sim = HandSimulationBuilder::default()
///     .table_config(TableConfig::default())
///     .agents(Seats::new(
///         Box::<AllInAgent>::default(),
///         Box::<FoldingAgent>::default(),
///     ))
///     .build()
///     .unwrap();
/// let outcome = sim.run().unwrap();
/// // The small blind folds straight away.
/// assert_eq!(Some(Position::Oop), outcome.winner);
/// assert_eq!(3, outcome.pot);
/// ```
pub struct HandSimulationBuilder<R: HandRanker = OmahaRanker> {
    agents: Option<Seats<Box<dyn Agent>>>,
    agent_generators: Option<Seats<Box<dyn AgentGenerator>>>,
    historians: Vec<Box<dyn Historian>>,
    game_state: Option<HandState>,
    table_config: Option<TableConfig>,
    deck: Option<Deck>,
    ranker: R,
    panic_on_historian_error: bool,
}

impl<R: HandRanker> HandSimulationBuilder<R> {
    /// Set the agents for both seats.
    pub fn agents(mut self, agents: Seats<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Generate the agents once the starting state is known. Ignored if
    /// agents were given directly.
    pub fn agent_generators(mut self, generators: Seats<Box<dyn AgentGenerator>>) -> Self {
        self.agent_generators = Some(generators);
        self
    }

    /// Start from a hand state that was set up by hand, for example with
    /// known hole cards.
    pub fn game_state(mut self, game_state: HandState) -> Self {
        self.game_state = Some(game_state);
        self
    }

    pub fn table_config(mut self, table_config: TableConfig) -> Self {
        self.table_config = Some(table_config);
        self
    }

    /// Set the deck. Cards are dealt from the end of the deck.
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Use a different showdown ranker.
    pub fn ranker<R2: HandRanker>(self, ranker: R2) -> HandSimulationBuilder<R2> {
        HandSimulationBuilder {
            agents: self.agents,
            agent_generators: self.agent_generators,
            historians: self.historians,
            game_state: self.game_state,
            table_config: self.table_config,
            deck: self.deck,
            ranker,
            panic_on_historian_error: self.panic_on_historian_error,
        }
    }

    /// Fill in anything that wasn't set and create the simulation.
    pub fn build(self) -> Result<HandSimulation<R>, HandSimulationError> {
        let game_state = match (self.game_state, self.table_config) {
            (None, None) => return Err(HandSimulationError::NeedGameState),
            (Some(_), Some(_)) => return Err(HandSimulationError::ConflictingState),
            (Some(game_state), None) => game_state,
            (None, Some(config)) => HandState::new(&config)
                .map_err(|err| HandSimulationError::InvalidTableConfig(err.to_string()))?,
        };
        if game_state.blinds_posted {
            return Err(HandSimulationError::AlreadyStarted);
        }

        let agents = match (self.agents, self.agent_generators) {
            (Some(agents), _) => agents,
            (None, Some(generators)) => Seats::new(
                generators.oop.generate(Position::Oop, &game_state),
                generators.ip.generate(Position::Ip, &game_state),
            ),
            (None, None) => build_agents(),
        };

        let historians: Vec<_> = self
            .historians
            .into_iter()
            .chain(agents.oop.historian())
            .chain(agents.ip.historian())
            .collect();

        let deck = self.deck.unwrap_or_else(|| build_deck(&game_state));
        let id = Uuid::now_v7();
        debug!(%id, oop = agents.oop.name(), ip = agents.ip.name(), "Built hand simulation");

        Ok(HandSimulation::new(
            id,
            game_state,
            agents,
            deck,
            self.ranker,
            historians,
            self.panic_on_historian_error,
        ))
    }
}

impl Default for HandSimulationBuilder {
    fn default() -> Self {
        Self {
            agents: None,
            agent_generators: None,
            historians: vec![],
            game_state: None,
            table_config: None,
            deck: None,
            ranker: OmahaRanker,
            panic_on_historian_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;

    use crate::arena::{
        agent::{AllInAgent, FoldingAgentGenerator},
        historian::VecHistorian,
        test_util::assert_valid_hand_state,
    };
    use crate::core::Card;

    use super::*;

    /// Every hand is the same strength so every showdown splits.
    struct EveryoneTies;

    impl HandRanker for EveryoneTies {
        type Strength = Reverse<u8>;

        fn rank(&self, _board: &[Card; 5], _hole: &[Card; 4]) -> Self::Strength {
            Reverse(0)
        }
    }

    #[test]
    fn test_needs_a_state() {
        assert_eq!(
            Err(HandSimulationError::NeedGameState),
            HandSimulationBuilder::default().build().map(|_| ())
        );
    }

    #[test]
    fn test_state_and_config_conflict() {
        let config = TableConfig::default();
        let state = HandState::new(&config).unwrap();
        let result = HandSimulationBuilder::default()
            .table_config(config)
            .game_state(state)
            .build();
        assert_eq!(
            Err(HandSimulationError::ConflictingState),
            result.map(|_| ())
        );
    }

    #[test]
    fn test_invalid_config() {
        let result = HandSimulationBuilder::default()
            .table_config(TableConfig {
                small_blind: 5,
                big_blind: 2,
                ..TableConfig::default()
            })
            .build();
        assert!(matches!(
            result.map(|_| ()),
            Err(HandSimulationError::InvalidTableConfig(_))
        ));
    }

    #[test]
    fn test_started_state_rejected() {
        let mut state = HandState::new(&TableConfig::default()).unwrap();
        state.post_blinds();
        let result = HandSimulationBuilder::default().game_state(state).build();
        assert_eq!(
            Err(HandSimulationError::AlreadyStarted),
            result.map(|_| ())
        );
    }

    #[test]
    fn test_default_deck_skips_pre_dealt_cards() {
        let mut state = HandState::new(&TableConfig::default()).unwrap();
        let oop = Card::parse_many("AsAhKsKh").unwrap();
        state.deal_hole_cards(Position::Oop, oop.clone());

        let mut sim = HandSimulationBuilder::default()
            .game_state(state)
            .build()
            .unwrap();
        assert_eq!(48, sim.deck.len());
        assert!(oop.iter().all(|c| !sim.deck.contains(c)));

        sim.run().unwrap();
        assert_eq!(oop, sim.game_state.seats.oop.hand);
        assert_valid_hand_state(&sim.game_state);
    }

    #[test]
    fn test_agent_generators() {
        let sim = HandSimulationBuilder::default()
            .table_config(TableConfig::default())
            .agent_generators(Seats::new(
                Box::new(FoldingAgentGenerator::default()),
                Box::new(FoldingAgentGenerator::default()),
            ))
            .build()
            .unwrap();
        assert_eq!("FoldingAgent-OOP", sim.agents.oop.name());
        assert_eq!("FoldingAgent-IP", sim.agents.ip.name());
    }

    #[test]
    fn test_custom_ranker_splits() {
        let historian = VecHistorian::new();
        let storage = historian.get_storage();
        let mut sim = HandSimulationBuilder::default()
            .table_config(TableConfig::default())
            .agents(Seats::new(
                Box::<AllInAgent>::default(),
                Box::<AllInAgent>::default(),
            ))
            .historians(vec![Box::new(historian)])
            .ranker(EveryoneTies)
            .build()
            .unwrap();
        let outcome = sim.run().unwrap();

        assert_eq!(None, outcome.winner);
        assert_eq!(400, outcome.pot);
        assert_eq!(Seats::new(200, 200), outcome.winnings);
        assert_eq!(Seats::new(0, 0), outcome.rewards);
        assert_valid_hand_state(&sim.game_state);
        assert!(!storage.borrow().is_empty());
    }
}
