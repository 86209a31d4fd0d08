use std::fmt;

use crate::core::Card;

use super::game_state::{Position, Street};

/// Represents an action that an agent can take in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentAction {
    /// Folds the current hand.
    Fold,
    /// Passes when there is nothing to call.
    Check,
    /// Matches the opponent's commitment for this street.
    Call,
    /// Bets or raises so that the total committed this street
    /// is the specified amount.
    Bet(u32),
}

impl AgentAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            AgentAction::Fold => ActionKind::Fold,
            AgentAction::Check => ActionKind::Check,
            AgentAction::Call => ActionKind::Call,
            AgentAction::Bet(_) => ActionKind::Bet,
        }
    }
}

/// The action vocabulary without a bet size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Bet,
    ];

    /// The small integer used for this action in exported replays.
    ///
    /// ```
    /// use rs_plo::arena::action::ActionKind;
    ///
    /// assert_eq!(0, ActionKind::Fold.code());
    /// assert_eq!(3, ActionKind::Bet.code());
    /// ```
    pub fn code(self) -> u8 {
        match self {
            ActionKind::Fold => 0,
            ActionKind::Check => 1,
            ActionKind::Call => 2,
            ActionKind::Bet => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Fold => write!(f, "fold"),
            ActionKind::Check => write!(f, "check"),
            ActionKind::Call => write!(f, "call"),
            ActionKind::Bet => write!(f, "bet"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The hand has started.
pub struct HandStartPayload {
    pub small_blind: u32,
    pub big_blind: u32,
    pub oop_stack: u32,
    pub ip_stack: u32,
    /// Optional agent names reported by the simulation so historians can
    /// preserve them.
    pub oop_name: Option<String>,
    pub ip_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedBetType {
    SmallBlind,
    BigBlind,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBetPayload {
    /// The forced amount, not the final amount which can be
    /// lower if that puts the player all in.
    pub bet: u32,
    /// What was actually posted.
    pub posted: u32,
    pub player_stack: u32,
    pub position: Position,
    pub forced_bet_type: ForcedBetType,
}

/// A seat was dealt its hole cards.
#[derive(Debug, Clone, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealHoleCardsPayload {
    pub cards: Vec<Card>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayedActionPayload {
    /// The requested action.
    pub action: AgentAction,
    /// What the action was settled as. A bet that can't go over the
    /// opponent's commitment is settled as a call.
    pub settled_as: ActionKind,

    pub position: Position,
    pub street: Street,
    pub player_stack: u32,

    pub starting_pot: u32,
    pub final_pot: u32,

    pub starting_bet: u32,
    pub final_bet: u32,

    pub starting_player_bet: u32,
    pub final_player_bet: u32,

    /// Chips handed back to the opponent by a short all-in call.
    pub refund: u32,
    pub is_all_in: bool,
}

impl PlayedActionPayload {
    pub fn raise_amount(&self) -> u32 {
        self.final_bet.saturating_sub(self.starting_bet)
    }
}

/// A seat tried to play an action and it was rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedActionPayload {
    pub action: AgentAction,
    pub position: Position,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowdownPayload {
    pub board: Vec<Card>,
    pub oop_hand: Vec<Card>,
    pub ip_hand: Vec<Card>,
    /// None when the hands tied.
    pub winner: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPayload {
    pub total_pot: u32,
    pub award_amount: u32,
    pub position: Position,
}

/// Represents something that happened during a hand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    HandStart(HandStartPayload),
    /// A blind was posted.
    ForcedBet(ForcedBetPayload),
    DealHoleCards(DealHoleCardsPayload),
    /// Betting moved on to a new street.
    StreetAdvance(Street),
    /// A seat has played an action.
    PlayedAction(PlayedActionPayload),
    /// The seat tried and failed to take some action.
    /// Seats that reprompt are asked again, otherwise the hand stops with
    /// an error.
    FailedAction(FailedActionPayload),
    /// A community card has been dealt.
    DealCommunity(Card),
    Showdown(ShowdownPayload),
    /// Some of the pot was given to a seat.
    Award(AwardPayload),
    /// The last event of every hand.
    HandComplete,
}
