use core::fmt;
use std::fmt::Display;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::core::Card;
use crate::omaha::HandRanker;

use super::action::{ActionKind, AgentAction};
use super::config::{BettingRules, ConfigError, TableConfig};
use super::errors::GameStateError;

/// One of the two seats at a heads-up table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Position {
    /// Out of position. Posts the big blind and acts first after the flop.
    Oop,
    /// In position. Posts the small blind and acts first preflop.
    Ip,
}

impl Position {
    pub const BOTH: [Position; 2] = [Position::Oop, Position::Ip];

    pub fn other(self) -> Self {
        match self {
            Position::Oop => Position::Ip,
            Position::Ip => Position::Oop,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Oop => write!(f, "OOP"),
            Position::Ip => write!(f, "IP"),
        }
    }
}

/// A pair of values, one per seat.
///
/// ```
/// use rs_plo::arena::{Position, Seats};
///
/// let mut stacks = Seats::new(100, 250);
/// stacks[Position::Ip] -= 50;
/// assert_eq!(200, stacks[Position::Ip]);
/// assert_eq!(300, stacks.iter().map(|(_, s)| *s).sum::<u32>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seats<T> {
    pub oop: T,
    pub ip: T,
}

impl<T> Seats<T> {
    pub fn new(oop: T, ip: T) -> Self {
        Self { oop, ip }
    }

    pub fn get(&self, position: Position) -> &T {
        match position {
            Position::Oop => &self.oop,
            Position::Ip => &self.ip,
        }
    }

    pub fn get_mut(&mut self, position: Position) -> &mut T {
        match position {
            Position::Oop => &mut self.oop,
            Position::Ip => &mut self.ip,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        [(Position::Oop, &self.oop), (Position::Ip, &self.ip)].into_iter()
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Seats<U> {
        Seats {
            oop: f(&self.oop),
            ip: f(&self.ip),
        }
    }
}

impl<T> Index<Position> for Seats<T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        self.get(position)
    }
}

impl<T> IndexMut<Position> for Seats<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        self.get_mut(position)
    }
}

/// The street of the hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
        }
    }
}

impl Street {
    pub fn advance(&self) -> Self {
        match *self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown => Street::Showdown,
        }
    }

    /// How many community cards are dealt going into this street.
    pub fn cards_dealt(&self) -> usize {
        match *self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }

    /// How many community cards are on the board once this street is dealt.
    pub fn board_size(&self) -> usize {
        match *self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }
}

/// A small set of `ActionKind`s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn new(kinds: &[ActionKind]) -> Self {
        kinds.iter().fold(Self::default(), |mut set, k| {
            set.insert(*k);
            set
        })
    }

    pub fn insert(&mut self, kind: ActionKind) {
        self.0 |= 1 << kind.code();
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.0 & (1 << kind.code()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|k| k.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Everything an agent needs to know about what it is allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub position: Position,
    pub legal: ActionSet,
    pub min_bet: u32,
    pub max_bet: u32,
    /// Chips needed to match the opponent's commitment.
    pub to_call: u32,
}

/// Where the betting on the current street stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BettingStatus {
    AwaitingAction,
    StreetComplete,
    HandOver,
}

/// A single seat's money and cards.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seat {
    /// Chips behind, not counting anything committed.
    pub chips: u32,
    /// The hole cards, empty until dealt.
    pub hand: Vec<Card>,
    /// Chips put in during the current street.
    pub committed: u32,
    /// Chips at the start of the hand.
    pub starting_chips: u32,
}

impl Seat {
    pub fn new(chips: u32) -> Self {
        Self {
            chips,
            hand: vec![],
            committed: 0,
            starting_chips: chips,
        }
    }

    /// The largest commitment this seat can reach on the current street.
    pub fn available(&self) -> u32 {
        self.chips + self.committed
    }
}

/// What applying an action did to the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub settled_as: ActionKind,
    /// Chips moved from the actor's stack into the pot.
    pub paid: u32,
    /// Chips handed back to the opponent by a short all-in call.
    pub refund: u32,
}

/// The outcome of comparing both hands at showdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowdownResult<S> {
    pub strengths: Seats<S>,
    /// None on a tie.
    pub winner: Option<Position>,
    pub awards: Seats<u32>,
}

/// The full state of one heads-up hand and the betting engine that drives it.
///
/// Chips only ever move between the seats' stacks and the pot, so
/// `pot + oop.chips + ip.chips` stays equal to the chips at the start of the
/// hand. `check_conservation` verifies that.
#[derive(Clone, PartialEq, Debug)]
pub struct HandState {
    pub seats: Seats<Seat>,
    /// The total amount in the pot.
    pub pot: u32,
    /// The pot when the current street started.
    pub street_start_pot: u32,
    /// The commitment needed to call.
    pub current_bet: u32,
    /// Number of actions processed on the current street.
    pub num_actions: u8,
    pub last_action: Option<ActionKind>,
    pub to_act: Position,
    pub num_active_players: usize,
    /// Set once a seat has nothing behind. No more betting after
    /// commitments are matched.
    pub is_all_in: bool,
    pub hand_over: bool,
    pub street: Street,
    /// The community cards.
    pub board: Vec<Card>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub rules: BettingRules,
    /// Have the blinds been posted. Guards against posting twice.
    pub blinds_posted: bool,
    /// Chips in play when the hand started.
    pub starting_total: u32,
    pub winnings: Seats<u32>,
}

impl HandState {
    /// Create a fresh hand from a table config. No blinds are posted and no
    /// cards are dealt yet.
    ///
    /// ```
    /// use rs_plo::arena::{HandState, Position, TableConfig};
    ///
    /// let mut state = HandState::new(&TableConfig::default()).unwrap();
    /// state.post_blinds();
    /// assert_eq!(3, state.pot);
    /// assert_eq!(Position::Ip, state.to_act);
    /// assert_eq!(199, state.seats.ip.chips);
    /// ```
    pub fn new(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats = config.starting_stacks.map(|chips| Seat::new(*chips));
        let starting_total = config.starting_stacks.oop + config.starting_stacks.ip;
        Ok(Self {
            seats,
            pot: 0,
            street_start_pot: 0,
            current_bet: 0,
            num_actions: 0,
            last_action: None,
            to_act: Position::Ip,
            num_active_players: 2,
            is_all_in: false,
            hand_over: false,
            street: Street::Preflop,
            board: vec![],
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            rules: config.rules,
            blinds_posted: false,
            starting_total,
            winnings: Seats::default(),
        })
    }

    pub fn current_seat(&self) -> &Seat {
        &self.seats[self.to_act]
    }

    pub fn opponent_seat(&self) -> &Seat {
        &self.seats[self.to_act.other()]
    }

    /// Post both blinds and set up preflop betting. Returns what each seat
    /// actually posted; a short stack posts what it has.
    pub fn post_blinds(&mut self) -> Seats<u32> {
        if self.blinds_posted {
            return Seats::new(self.seats.oop.committed, self.seats.ip.committed);
        }
        self.blinds_posted = true;

        let ip_post = self.seats.ip.chips.min(self.small_blind);
        let oop_post = self.seats.oop.chips.min(self.big_blind);
        for (position, amount) in [(Position::Ip, ip_post), (Position::Oop, oop_post)] {
            let seat = &mut self.seats[position];
            seat.chips -= amount;
            seat.committed = amount;
            self.pot += amount;
        }

        self.street = Street::Preflop;
        self.current_bet = oop_post.max(ip_post);
        self.num_actions = 0;
        // The big blind counts as the opening bet.
        self.last_action = Some(ActionKind::Bet);
        self.to_act = Position::Ip;
        self.street_start_pot = self.pot;

        if self.seats.oop.chips == 0 || self.seats.ip.chips == 0 {
            self.is_all_in = true;
            // A blind that is all in for less than the other blind caps
            // what the other seat has at risk.
            let short = if self.seats.oop.chips == 0 && oop_post < ip_post {
                Some(Position::Oop)
            } else if self.seats.ip.chips == 0 && ip_post < oop_post {
                Some(Position::Ip)
            } else {
                None
            };
            if let Some(position) = short {
                let refund = self.equalize_to(position);
                debug!(?position, refund, "Short blind, refunded the excess");
            }
        }

        debug!(oop_post, ip_post, pot = self.pot, "Posted blinds");
        Seats::new(oop_post, ip_post)
    }

    pub fn deal_hole_cards(&mut self, position: Position, cards: Vec<Card>) {
        self.seats[position].hand = cards;
    }

    pub fn deal_community(&mut self, card: Card) {
        self.board.push(card);
    }

    /// Move to the next street and reset the per street betting.
    pub fn advance_street(&mut self) -> Street {
        self.street = self.street.advance();
        self.seats.oop.committed = 0;
        self.seats.ip.committed = 0;
        self.current_bet = 0;
        self.num_actions = 0;
        self.last_action = None;
        self.to_act = Position::Oop;
        self.street_start_pot = self.pot;
        trace!(street = ?self.street, pot = self.pot, "Advanced street");
        self.street
    }

    /// The seats have matched each other and an all in means nobody can
    /// bet any more this hand.
    pub fn is_betting_closed(&self) -> bool {
        self.is_all_in && self.commitments_match()
    }

    fn commitments_match(&self) -> bool {
        self.seats.oop.committed == self.seats.ip.committed
    }

    /// Check whether the current street needs another action.
    pub fn betting_status(&self) -> BettingStatus {
        if self.hand_over || self.num_active_players == 1 {
            BettingStatus::HandOver
        } else if self.commitments_match()
            && (self.num_actions as usize >= self.num_active_players || self.is_all_in)
        {
            BettingStatus::StreetComplete
        } else {
            BettingStatus::AwaitingAction
        }
    }

    /// The actions the current actor may take.
    ///
    /// ```
    /// use rs_plo::arena::action::ActionKind;
    /// use rs_plo::arena::{HandState, TableConfig};
    ///
    /// let mut state = HandState::new(&TableConfig::default()).unwrap();
    /// state.post_blinds();
    /// let legal = state.legal_actions();
    /// assert!(legal.contains(ActionKind::Call));
    /// assert!(legal.contains(ActionKind::Bet));
    /// assert!(legal.contains(ActionKind::Fold));
    /// assert!(!legal.contains(ActionKind::Check));
    /// ```
    pub fn legal_actions(&self) -> ActionSet {
        use ActionKind::*;

        if self.hand_over {
            ActionSet::default()
        } else if self.seats.oop.chips == 0 || self.seats.ip.chips == 0 {
            // Facing an all in there's nothing left to raise.
            ActionSet::new(&[Call, Fold])
        } else if self.street == Street::Preflop
            && self.to_act == Position::Ip
            && self.num_actions == 0
        {
            ActionSet::new(&[Call, Bet, Fold])
        } else if self.street == Street::Preflop
            && self.to_act == Position::Oop
            && self.last_action == Some(Call)
        {
            // The big blind facing a limp.
            ActionSet::new(&[Check, Bet])
        } else if self.street != Street::Preflop && self.current_bet == 0 {
            ActionSet::new(&[Check, Bet])
        } else {
            ActionSet::new(&[Call, Bet, Fold])
        }
    }

    /// The largest bet allowed without the stack cap.
    fn bet_ceiling(&self) -> u32 {
        if self.street == Street::Preflop {
            self.rules
                .preflop_raise_multiplier
                .saturating_mul(self.current_bet)
        } else if self.current_bet == 0 {
            self.street_start_pot
        } else {
            self.rules
                .postflop_raise_multiplier
                .saturating_mul(self.current_bet)
                .saturating_add(self.street_start_pot)
        }
    }

    /// The largest total commitment the current actor may bet to.
    pub fn max_bet(&self) -> u32 {
        self.bet_ceiling().min(self.current_seat().available())
    }

    /// The smallest total commitment the current actor may bet to, unless
    /// going all in for less.
    pub fn min_bet(&self) -> u32 {
        let raise_to = self
            .rules
            .min_raise_multiplier
            .saturating_mul(self.current_bet);
        self.rules
            .minimum_increment
            .max(raise_to.min(self.current_seat().available()))
    }

    pub fn to_call(&self) -> u32 {
        self.opponent_seat()
            .committed
            .saturating_sub(self.current_seat().committed)
    }

    pub fn action_request(&self) -> ActionRequest {
        ActionRequest {
            position: self.to_act,
            legal: self.legal_actions(),
            min_bet: self.min_bet(),
            max_bet: self.max_bet(),
            to_call: self.to_call(),
        }
    }

    /// Apply the current actor's action.
    ///
    /// Nothing is changed when an error is returned, so the same seat can
    /// be asked again.
    pub fn apply(&mut self, action: AgentAction) -> Result<Settlement, GameStateError> {
        if self.hand_over {
            return Err(GameStateError::HandOver);
        }
        let legal = self.legal_actions();
        if !legal.contains(action.kind()) {
            return Err(GameStateError::InvalidAction { action, legal });
        }

        let settlement = match action {
            AgentAction::Fold => self.do_fold(),
            AgentAction::Check => Settlement {
                settled_as: ActionKind::Check,
                paid: 0,
                refund: 0,
            },
            AgentAction::Call => self.do_call(),
            AgentAction::Bet(amount) => {
                let target = self.validate_bet_amount(amount)?;
                if target <= self.opponent_seat().committed {
                    // Only an all in for less can land here.
                    debug!(amount, target, "Bet doesn't cover the opponent, settling as a call");
                    self.do_call()
                } else {
                    self.do_bet(target)
                }
            }
        };

        self.num_actions = self.num_actions.saturating_add(1);
        self.last_action = Some(settlement.settled_as);
        self.to_act = self.to_act.other();

        trace!(
            ?action,
            ?settlement,
            pot = self.pot,
            current_bet = self.current_bet,
            "Applied action"
        );
        Ok(settlement)
    }

    fn validate_bet_amount(&self, amount: u32) -> Result<u32, GameStateError> {
        let available = self.current_seat().available();
        let min = self.min_bet();
        let max = self.max_bet();
        // Anything over the stack is an all in.
        let target = amount.min(available);
        let is_all_in = target == available;

        if target > max || (target < min && !is_all_in) {
            Err(GameStateError::InvalidBetAmount { amount, min, max })
        } else {
            Ok(target)
        }
    }

    fn do_fold(&mut self) -> Settlement {
        let winner = self.to_act.other();
        self.num_active_players = 1;
        self.hand_over = true;
        let pot = self.pot;
        self.award(winner, pot);
        debug!(?winner, pot, "Fold ends the hand");
        Settlement {
            settled_as: ActionKind::Fold,
            paid: 0,
            refund: 0,
        }
    }

    fn do_call(&mut self) -> Settlement {
        let position = self.to_act;
        let to_call = self.to_call();
        let seat = &mut self.seats[position];

        let (paid, refund) = if to_call <= seat.chips {
            seat.chips -= to_call;
            seat.committed += to_call;
            self.pot += to_call;
            (to_call, 0)
        } else {
            // Short all in. Put everything in and hand the uncalled
            // part of the opponent's bet back.
            let paid = seat.chips;
            seat.committed += paid;
            seat.chips = 0;
            self.pot += paid;
            let refund = self.equalize_to(position);
            debug!(?position, paid, refund, "Short all in call");
            (paid, refund)
        };

        if self.seats[position].chips == 0 {
            self.is_all_in = true;
        }
        self.current_bet = self.seats[position].committed;

        Settlement {
            settled_as: ActionKind::Call,
            paid,
            refund,
        }
    }

    fn do_bet(&mut self, target: u32) -> Settlement {
        let position = self.to_act;
        let seat = &mut self.seats[position];
        let paid = target - seat.committed;
        seat.chips -= paid;
        seat.committed = target;
        self.pot += paid;
        self.current_bet = target;
        if self.seats[position].chips == 0 {
            self.is_all_in = true;
        }
        Settlement {
            settled_as: ActionKind::Bet,
            paid,
            refund: 0,
        }
    }

    /// Lower the other seat's commitment to match `position`'s,
    /// returning the excess to its stack.
    fn equalize_to(&mut self, position: Position) -> u32 {
        let level = self.seats[position].committed;
        let other = &mut self.seats[position.other()];
        let excess = other.committed.saturating_sub(level);
        other.committed -= excess;
        other.chips += excess;
        self.pot -= excess;
        self.current_bet = level;
        excess
    }

    /// Move chips from the pot to a seat.
    pub fn award(&mut self, position: Position, amount: u32) {
        let amount = amount.min(self.pot);
        self.pot -= amount;
        self.seats[position].chips += amount;
        self.winnings[position] += amount;
    }

    /// The pot that is, or was, being played for.
    pub fn contested_pot(&self) -> u32 {
        self.pot + self.winnings.oop + self.winnings.ip
    }

    /// Compare both hands. This doesn't change anything so it gives the same
    /// answer every time it's asked about the same hand.
    pub fn showdown_result<R: HandRanker + ?Sized>(
        &self,
        ranker: &R,
    ) -> Result<ShowdownResult<R::Strength>, GameStateError> {
        let board: &[Card; 5] = self
            .board
            .as_slice()
            .try_into()
            .map_err(|_| GameStateError::IncompleteBoard(self.board.len()))?;
        let hole = |position: Position| -> Result<&[Card; 4], GameStateError> {
            self.seats[position]
                .hand
                .as_slice()
                .try_into()
                .map_err(|_| GameStateError::MissingHoleCards(position))
        };

        let strengths = Seats::new(
            ranker.rank(board, hole(Position::Oop)?),
            ranker.rank(board, hole(Position::Ip)?),
        );

        let pot = self.contested_pot();
        let (winner, awards) = match strengths.oop.cmp(&strengths.ip) {
            std::cmp::Ordering::Less => (Some(Position::Oop), Seats::new(pot, 0)),
            std::cmp::Ordering::Greater => (Some(Position::Ip), Seats::new(0, pot)),
            // The odd chip goes to the first seat after the button.
            std::cmp::Ordering::Equal => (None, Seats::new(pot - pot / 2, pot / 2)),
        };

        Ok(ShowdownResult {
            strengths,
            winner,
            awards,
        })
    }

    /// Run the showdown and pay out the pot.
    pub fn settle_showdown<R: HandRanker + ?Sized>(
        &mut self,
        ranker: &R,
    ) -> Result<ShowdownResult<R::Strength>, GameStateError> {
        if self.hand_over {
            return Err(GameStateError::HandOver);
        }
        let result = self.showdown_result(ranker)?;
        self.street = Street::Showdown;
        for position in Position::BOTH {
            self.award(position, result.awards[position]);
        }
        self.hand_over = true;
        debug!(winner = ?result.winner, awards = ?result.awards, "Settled showdown");
        Ok(result)
    }

    /// Chips in the pot plus both stacks.
    pub fn total_chips(&self) -> u32 {
        self.pot + self.seats.oop.chips + self.seats.ip.chips
    }

    pub fn check_conservation(&self) -> Result<(), GameStateError> {
        let actual = self.total_chips();
        if actual == self.starting_total {
            Ok(())
        } else {
            Err(GameStateError::StateConsistency {
                expected: self.starting_total,
                actual,
            })
        }
    }

    /// The change in a seat's stack since the start of the hand.
    pub fn player_reward(&self, position: Position) -> i64 {
        let seat = &self.seats[position];
        i64::from(seat.chips) - i64::from(seat.starting_chips)
    }
}
