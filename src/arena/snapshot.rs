use crate::core::Card;

use super::action::ActionKind;
use super::game_state::{HandState, Position, Seat, Seats, Street};

/// What can be seen of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatSnapshot {
    pub chips: u32,
    /// None when the cards are hidden from whoever holds the snapshot.
    pub hand: Option<Vec<Card>>,
    pub committed: u32,
}

impl From<&Seat> for SeatSnapshot {
    fn from(seat: &Seat) -> Self {
        Self {
            chips: seat.chips,
            hand: if seat.hand.is_empty() {
                None
            } else {
                Some(seat.hand.clone())
            },
            committed: seat.committed,
        }
    }
}

/// A point in time copy of a hand.
///
/// The full snapshot includes both seats' hole cards. Use
/// [`HandSnapshot::public_for`] before showing it to one of the seats and
/// [`HandSnapshot::public`] before showing it to anyone else.
///
/// ```
/// use rs_plo::arena::{HandSnapshot, HandState, Position, TableConfig};
/// use rs_plo::core::Card;
///
/// let mut state = HandState::new(&TableConfig::default()).unwrap();
/// state.deal_hole_cards(Position::Oop, Card::parse_many("AsAhKsKh").unwrap());
/// state.deal_hole_cards(Position::Ip, Card::parse_many("2c3d4h5s").unwrap());
///
/// let snapshot = HandSnapshot::from(&state).public_for(Position::Oop);
/// assert!(snapshot.seats.oop.hand.is_some());
/// assert!(snapshot.seats.ip.hand.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandSnapshot {
    pub street: Street,
    pub pot: u32,
    pub community_cards: Vec<Card>,
    pub current_bet: u32,
    pub last_action: Option<ActionKind>,
    pub num_actions: u8,
    pub to_act: Position,
    pub hand_over: bool,
    pub is_all_in: bool,
    pub seats: Seats<SeatSnapshot>,
    pub winnings: Seats<u32>,
}

impl From<&HandState> for HandSnapshot {
    fn from(state: &HandState) -> Self {
        Self {
            street: state.street,
            pot: state.pot,
            community_cards: state.board.clone(),
            current_bet: state.current_bet,
            last_action: state.last_action,
            num_actions: state.num_actions,
            to_act: state.to_act,
            hand_over: state.hand_over,
            is_all_in: state.is_all_in,
            seats: state.seats.map(|seat| SeatSnapshot::from(seat)),
            winnings: state.winnings,
        }
    }
}

impl HandSnapshot {
    /// The view from one seat: the opponent's hole cards are hidden.
    pub fn public_for(&self, position: Position) -> Self {
        let mut snapshot = self.clone();
        snapshot.seats[position.other()].hand = None;
        snapshot
    }

    /// The view from outside the table: no hole cards at all.
    pub fn public(&self) -> Self {
        let mut snapshot = self.clone();
        snapshot.seats.oop.hand = None;
        snapshot.seats.ip.hand = None;
        snapshot
    }

    /// Chips in the pot plus both stacks.
    pub fn total_chips(&self) -> u32 {
        self.pot + self.seats.oop.chips + self.seats.ip.chips
    }
}
