use std::iter::FusedIterator;

use tracing::{debug, error, instrument, trace, warn};
use uuid::Uuid;

use crate::core::{Card, Deck};
use crate::omaha::{HandRanker, OmahaRanker};

use super::Agent;
use super::action::{
    Action, AwardPayload, DealHoleCardsPayload, FailedActionPayload, ForcedBetPayload,
    ForcedBetType, HandStartPayload, PlayedActionPayload, ShowdownPayload,
};
use super::errors::HandError;
use super::game_state::{BettingStatus, HandState, Position, Seats, Street};
use super::historian::Historian;
use super::snapshot::HandSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PostBlinds,
    DealHoleCards,
    Play,
    Complete,
    Failed,
}

/// How a finished hand turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandOutcome {
    pub id: Uuid,
    /// Everything that was played for.
    pub pot: u32,
    pub winnings: Seats<u32>,
    /// Net chips won or lost by each seat.
    pub rewards: Seats<i64>,
    /// The seat that got more of the pot. None for a split.
    pub winner: Option<Position>,
    pub went_to_showdown: bool,
    pub board: Vec<Card>,
}

/// One heads-up hand played between two agents.
///
/// The simulation is an iterator. Every call to `next` does exactly one
/// thing: post the blinds, deal the hole cards, get and apply one decision,
/// deal a street, or settle the showdown. It then yields a snapshot of the
/// hand. Agents are only asked for a decision when the iterator is
/// advanced, so the hand doesn't progress unless someone drives it.
///
/// After the hand completes, or fails, the iterator only returns `None`.
///
/// ```
/// use rs_plo::arena::{HandSimulationBuilder, TableConfig};
///
/// let mut sim = HandSimulationBuilder::default()
///     .table_config(TableConfig::default())
///     .build()
///     .unwrap();
///
/// let mut steps = 0;
/// for snapshot in sim.by_ref() {
///     let snapshot = snapshot.unwrap();
///     assert_eq!(400, snapshot.total_chips());
///     steps += 1;
/// }
/// assert!(sim.is_complete());
/// assert!(steps > 3);
/// ```
pub struct HandSimulation<R: HandRanker = OmahaRanker> {
    pub agents: Seats<Box<dyn Agent>>,
    pub game_state: HandState,
    pub deck: Deck,
    pub ranker: R,
    pub id: Uuid,
    historians: Vec<Box<dyn Historian>>,
    panic_on_historian_error: bool,
    phase: Phase,
    went_to_showdown: bool,
    failure: Option<HandError>,
}

impl<R: HandRanker> HandSimulation<R> {
    pub(crate) fn new(
        id: Uuid,
        game_state: HandState,
        agents: Seats<Box<dyn Agent>>,
        deck: Deck,
        ranker: R,
        historians: Vec<Box<dyn Historian>>,
        panic_on_historian_error: bool,
    ) -> Self {
        Self {
            agents,
            game_state,
            deck,
            ranker,
            id,
            historians,
            panic_on_historian_error,
            phase: Phase::PostBlinds,
            went_to_showdown: false,
            failure: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// A snapshot of the hand right now.
    pub fn snapshot(&self) -> HandSnapshot {
        HandSnapshot::from(&self.game_state)
    }

    /// Play the hand to the end.
    #[instrument(level = "debug", skip(self), fields(id = %self.id))]
    pub fn run(&mut self) -> Result<HandOutcome, HandError> {
        for step in self.by_ref() {
            step?;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.outcome()),
        }
    }

    /// The result of the hand as it stands.
    pub fn outcome(&self) -> HandOutcome {
        let winnings = self.game_state.winnings;
        let winner = match winnings.oop.cmp(&winnings.ip) {
            std::cmp::Ordering::Greater => Some(Position::Oop),
            std::cmp::Ordering::Less => Some(Position::Ip),
            std::cmp::Ordering::Equal => None,
        };
        HandOutcome {
            id: self.id,
            pot: self.game_state.contested_pot(),
            winnings,
            rewards: Seats::new(
                self.game_state.player_reward(Position::Oop),
                self.game_state.player_reward(Position::Ip),
            ),
            winner,
            went_to_showdown: self.went_to_showdown,
            board: self.game_state.board.clone(),
        }
    }

    fn step(&mut self) -> Result<(), HandError> {
        match self.phase {
            Phase::PostBlinds => {
                self.start_hand();
                Ok(())
            }
            Phase::DealHoleCards => self.deal_hole_cards(),
            Phase::Play => match self.game_state.betting_status() {
                BettingStatus::AwaitingAction => self.run_agent_action(),
                BettingStatus::StreetComplete if self.game_state.street >= Street::River => {
                    self.showdown()
                }
                BettingStatus::StreetComplete => self.deal_street(),
                BettingStatus::HandOver => {
                    self.record_awards();
                    self.complete();
                    Ok(())
                }
            },
            Phase::Complete | Phase::Failed => Ok(()),
        }
    }

    fn start_hand(&mut self) {
        let seats = &self.game_state.seats;
        let start = HandStartPayload {
            small_blind: self.game_state.small_blind,
            big_blind: self.game_state.big_blind,
            oop_stack: seats.oop.chips,
            ip_stack: seats.ip.chips,
            oop_name: Some(self.agents.oop.name().to_string()),
            ip_name: Some(self.agents.ip.name().to_string()),
        };
        self.record_action(Action::HandStart(start));

        let posted = self.game_state.post_blinds();
        for (position, bet, forced_bet_type) in [
            (Position::Ip, self.game_state.small_blind, ForcedBetType::SmallBlind),
            (Position::Oop, self.game_state.big_blind, ForcedBetType::BigBlind),
        ] {
            let player_stack = self.game_state.seats[position].chips;
            self.record_action(Action::ForcedBet(ForcedBetPayload {
                bet,
                posted: posted[position],
                player_stack,
                position,
                forced_bet_type,
            }));
        }
        debug!(pot = self.game_state.pot, "Hand started");
        self.phase = Phase::DealHoleCards;
    }

    fn deal_hole_cards(&mut self) -> Result<(), HandError> {
        for position in Position::BOTH {
            if self.game_state.seats[position].hand.is_empty() {
                let cards = self.deck.draw(4)?;
                self.game_state.deal_hole_cards(position, cards);
            }
            let cards = self.game_state.seats[position].hand.clone();
            self.record_action(Action::DealHoleCards(DealHoleCardsPayload { cards, position }));
        }
        self.phase = Phase::Play;
        Ok(())
    }

    fn deal_street(&mut self) -> Result<(), HandError> {
        let street = self.game_state.advance_street();
        self.record_action(Action::StreetAdvance(street));

        let needed = street
            .board_size()
            .saturating_sub(self.game_state.board.len());
        for card in self.deck.draw(needed)? {
            self.game_state.deal_community(card);
            self.record_action(Action::DealCommunity(card));
        }
        trace!(%street, board = ?self.game_state.board, "Dealt street");
        Ok(())
    }

    fn run_agent_action(&mut self) -> Result<(), HandError> {
        let position = self.game_state.to_act;
        let request = self.game_state.action_request();

        loop {
            let action = self.agents[position].act(self.id, &self.game_state, &request);

            let starting_pot = self.game_state.pot;
            let starting_bet = self.game_state.current_bet;
            let starting_player_bet = self.game_state.seats[position].committed;

            match self.game_state.apply(action) {
                Ok(settlement) => {
                    let seat = &self.game_state.seats[position];
                    let payload = PlayedActionPayload {
                        action,
                        settled_as: settlement.settled_as,
                        position,
                        street: self.game_state.street,
                        player_stack: seat.chips,
                        starting_pot,
                        final_pot: self.game_state.pot,
                        starting_bet,
                        final_bet: self.game_state.current_bet,
                        starting_player_bet,
                        final_player_bet: seat.committed,
                        refund: settlement.refund,
                        is_all_in: self.game_state.is_all_in,
                    };
                    debug!(
                        %position,
                        ?action,
                        settled_as = %settlement.settled_as,
                        pot = self.game_state.pot,
                        "Played action"
                    );
                    self.record_action(Action::PlayedAction(payload));

                    if self.game_state.hand_over {
                        self.record_awards();
                        self.complete();
                    }
                    return Ok(());
                }
                Err(err) => {
                    self.record_action(Action::FailedAction(FailedActionPayload {
                        action,
                        position,
                        reason: err.to_string(),
                    }));

                    if !err.is_recoverable() {
                        return Err(err.into());
                    } else if self.agents[position].reprompt_on_invalid() {
                        warn!(%position, ?action, %err, "Invalid action, asking again");
                    } else {
                        return Err(HandError::Agent {
                            position,
                            source: err,
                        });
                    }
                }
            }
        }
    }

    fn showdown(&mut self) -> Result<(), HandError> {
        let result = self.game_state.settle_showdown(&self.ranker)?;
        self.went_to_showdown = true;
        debug!(winner = ?result.winner, strengths = ?result.strengths, "Showdown");

        self.record_action(Action::Showdown(ShowdownPayload {
            board: self.game_state.board.clone(),
            oop_hand: self.game_state.seats.oop.hand.clone(),
            ip_hand: self.game_state.seats.ip.hand.clone(),
            winner: result.winner,
        }));
        self.record_awards();
        self.complete();
        Ok(())
    }

    fn record_awards(&mut self) {
        let total_pot = self.game_state.contested_pot();
        for position in Position::BOTH {
            let award_amount = self.game_state.winnings[position];
            if award_amount > 0 {
                self.record_action(Action::Award(AwardPayload {
                    total_pot,
                    award_amount,
                    position,
                }));
            }
        }
    }

    fn complete(&mut self) {
        self.record_action(Action::HandComplete);
        self.phase = Phase::Complete;
        debug!(winnings = ?self.game_state.winnings, "Hand complete");
    }

    fn record_action(&mut self, action: Action) {
        let id = self.id;
        let game_state = &self.game_state;
        let panic_on_historian_error = self.panic_on_historian_error;

        self.historians.retain_mut(|historian| {
            match historian.record_action(id, game_state, action.clone()) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian failed to record action: {error}");
                    }
                    error!(%error, "Historian failed to record action, removing it");
                    false
                }
            }
        });
    }
}

impl<R: HandRanker> Iterator for HandSimulation<R> {
    type Item = Result<HandSnapshot, HandError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.phase, Phase::Complete | Phase::Failed) {
            return None;
        }

        let result = self.step().and_then(|()| {
            self.game_state
                .check_conservation()
                .map_err(HandError::from)
        });

        match result {
            Ok(()) => Some(Ok(self.snapshot())),
            Err(error) => {
                error!(%error, id = %self.id, "Hand failed");
                self.phase = Phase::Failed;
                self.failure = Some(error.clone());
                Some(Err(error))
            }
        }
    }
}

impl<R: HandRanker> FusedIterator for HandSimulation<R> {}
