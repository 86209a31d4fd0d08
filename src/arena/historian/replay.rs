use std::{cell::RefCell, rc::Rc};

use tracing::trace;
use uuid::Uuid;

use crate::arena::{
    HandState,
    action::Action,
    game_state::{Position, Seats},
    snapshot::HandSnapshot,
};

use super::{Historian, HistorianError};

/// One decision, in the shape used for training and replay.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub hand_id: Uuid,
    pub position: Position,
    /// What the deciding seat could see when it decided.
    pub state: HandSnapshot,
    /// fold = 0, check = 1, call = 2, bet = 3
    pub action_code: u8,
    /// The seat's net chips for the whole hand on its last decision,
    /// zero before that.
    pub reward: i64,
    pub is_terminal: bool,
}

/// Turns played actions into [`Transition`]s.
///
/// Each decision is paired with the snapshot from just before it was
/// applied. When the hand completes the last decision of each seat is
/// marked terminal and given that seat's result.
#[derive(Debug, Clone, Default)]
pub struct ReplayHistorian {
    transitions: Rc<RefCell<Vec<Transition>>>,
    pending: Vec<Transition>,
    last_state: Option<HandSnapshot>,
}

impl ReplayHistorian {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished transitions. Only complete hands show up here.
    pub fn get_storage(&self) -> Rc<RefCell<Vec<Transition>>> {
        self.transitions.clone()
    }

    fn finish_hand(&mut self, game_state: &HandState) -> Result<(), HistorianError> {
        let rewards = Seats::new(
            game_state.player_reward(Position::Oop),
            game_state.player_reward(Position::Ip),
        );
        for position in Position::BOTH {
            if let Some(last) = self
                .pending
                .iter_mut()
                .rev()
                .find(|t| t.position == position)
            {
                last.is_terminal = true;
                last.reward = rewards[position];
            }
        }
        trace!(count = self.pending.len(), ?rewards, "Finished hand transitions");
        self.transitions
            .try_borrow_mut()?
            .extend(self.pending.drain(..));
        self.last_state = None;
        Ok(())
    }
}

impl Historian for ReplayHistorian {
    fn record_action(
        &mut self,
        id: Uuid,
        game_state: &HandState,
        action: Action,
    ) -> Result<(), HistorianError> {
        match &action {
            Action::PlayedAction(payload) => {
                // Nothing changes between the event before a decision and the
                // decision itself, so that state is what the seat saw.
                let state = self
                    .last_state
                    .as_ref()
                    .ok_or(HistorianError::UnableToRecordAction)?
                    .public_for(payload.position);
                self.pending.push(Transition {
                    hand_id: id,
                    position: payload.position,
                    state,
                    action_code: payload.settled_as.code(),
                    reward: 0,
                    is_terminal: false,
                });
            }
            Action::HandComplete => {
                return self.finish_hand(game_state);
            }
            _ => {}
        }
        self.last_state = Some(HandSnapshot::from(game_state));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{
        HandSimulationBuilder, TableConfig, action::AgentAction, agent::VecReplayAgent,
    };

    use super::*;

    #[test_log::test]
    fn test_preflop_fold_transitions() {
        let historian = ReplayHistorian::new();
        let storage = historian.get_storage();

        let mut sim = HandSimulationBuilder::default()
            .table_config(TableConfig::default())
            .agents(Seats::new(
                Box::new(VecReplayAgent::new("oop", vec![])),
                Box::new(VecReplayAgent::new("ip", vec![AgentAction::Fold])),
            ))
            .historians(vec![Box::new(historian)])
            .build()
            .unwrap();
        sim.run().unwrap();

        let transitions = storage.borrow();
        assert_eq!(1, transitions.len());
        let t = &transitions[0];
        assert_eq!(Position::Ip, t.position);
        assert_eq!(0, t.action_code);
        assert!(t.is_terminal);
        assert_eq!(-1, t.reward);
        assert_eq!(sim.id, t.hand_id);
        // The folding seat saw its own cards only.
        assert!(t.state.seats.ip.hand.is_some());
        assert!(t.state.seats.oop.hand.is_none());
        assert_eq!(3, t.state.pot);
    }

    #[test_log::test]
    fn test_only_last_decision_is_terminal() {
        let historian = ReplayHistorian::new();
        let storage = historian.get_storage();

        // IP raises, OOP calls, OOP checks the flop, IP bets, OOP folds.
        let mut sim = HandSimulationBuilder::default()
            .table_config(TableConfig::default())
            .agents(Seats::new(
                Box::new(VecReplayAgent::new(
                    "oop",
                    vec![AgentAction::Call, AgentAction::Check, AgentAction::Fold],
                )),
                Box::new(VecReplayAgent::new(
                    "ip",
                    vec![AgentAction::Bet(6), AgentAction::Bet(10)],
                )),
            ))
            .historians(vec![Box::new(historian)])
            .build()
            .unwrap();
        sim.run().unwrap();

        let transitions = storage.borrow();
        let codes: Vec<u8> = transitions.iter().map(|t| t.action_code).collect();
        assert_eq!(vec![3, 2, 1, 3, 0], codes);

        let terminal: Vec<(Position, i64)> = transitions
            .iter()
            .filter(|t| t.is_terminal)
            .map(|t| (t.position, t.reward))
            .collect();
        assert_eq!(vec![(Position::Ip, 6), (Position::Oop, -6)], terminal);
        assert!(
            transitions
                .iter()
                .filter(|t| !t.is_terminal)
                .all(|t| t.reward == 0)
        );
    }
}
