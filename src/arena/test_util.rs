use std::collections::HashSet;

use super::HandState;
use super::action::{Action, ActionKind};
use super::game_state::{Position, Street};

use crate::arena::historian::HistoryRecord;

/// Check everything that has to be true about a hand once it has finished.
pub fn assert_valid_hand_state(game_state: &HandState) {
    assert!(game_state.hand_over, "The hand should be over");
    assert!(
        game_state.check_conservation().is_ok(),
        "Chips not conserved: {game_state:?}"
    );

    // Everything in the pot was paid out.
    assert_eq!(0, game_state.pot);
    let total_winnings = game_state.winnings.oop + game_state.winnings.ip;
    assert_eq!(total_winnings, game_state.contested_pot());
    assert!(game_state.blinds_posted);
    assert!(total_winnings > 0 || game_state.small_blind + game_state.big_blind == 0);

    assert_eq!(
        0,
        game_state.player_reward(Position::Oop) + game_state.player_reward(Position::Ip),
        "One seat's gain is the other seat's loss"
    );

    assert!(game_state.small_blind <= game_state.big_blind);

    validate_board_cards(game_state);
    validate_seats(game_state);
    validate_deck_integrity(game_state);
}

fn validate_board_cards(game_state: &HandState) {
    let board_len = game_state.board.len();
    assert!(
        matches!(board_len, 0 | 3 | 4 | 5),
        "Board should be empty, a flop, a turn or a river, found {board_len} cards"
    );

    if game_state.num_active_players == 2 {
        // Nobody folded so it went to showdown with a full board.
        assert_eq!(Street::Showdown, game_state.street);
        assert_eq!(5, board_len);
    } else {
        assert_eq!(1, game_state.num_active_players);
        assert_ne!(Street::Showdown, game_state.street);
        assert_eq!(game_state.street.board_size(), board_len);
        assert_eq!(Some(ActionKind::Fold), game_state.last_action);
    }
}

fn validate_seats(game_state: &HandState) {
    for (position, seat) in game_state.seats.iter() {
        assert_eq!(
            4,
            seat.hand.len(),
            "{position} should have four hole cards"
        );
        assert!(
            seat.committed <= seat.starting_chips,
            "{position} committed more than it started with"
        );
    }
}

fn validate_deck_integrity(game_state: &HandState) {
    let mut seen = HashSet::new();
    let cards = game_state
        .board
        .iter()
        .chain(game_state.seats.oop.hand.iter())
        .chain(game_state.seats.ip.hand.iter());
    for card in cards {
        assert!(seen.insert(*card), "Card {card} was dealt twice");
    }
}

/// Check the events recorded for a single finished hand.
pub fn assert_valid_history(history_storage: &[HistoryRecord]) {
    // There should always be some history
    assert!(!history_storage.is_empty());

    assert!(
        matches!(history_storage[0].action, Action::HandStart(_)),
        "First action should be HandStart, but was: {:?}",
        history_storage[0].action
    );
    assert!(
        matches!(history_storage.last().map(|r| &r.action), Some(Action::HandComplete)),
        "Last action should be HandComplete"
    );

    // Every event belongs to the same hand.
    let id = history_storage[0].id;
    assert!(history_storage.iter().all(|r| r.id == id));

    let count = |pred: fn(&Action) -> bool| history_storage.iter().filter(|r| pred(&r.action)).count();
    assert_eq!(1, count(|a| matches!(a, Action::HandComplete)));
    assert_eq!(2, count(|a| matches!(a, Action::ForcedBet(_))));
    assert_eq!(2, count(|a| matches!(a, Action::DealHoleCards(_))));
    assert!(count(|a| matches!(a, Action::Showdown(_))) <= 1);

    assert_no_player_actions_after_fold(history_storage);
    validate_betting_sequence(history_storage);
    validate_street_progression(history_storage);
    validate_awards(history_storage);
}

fn assert_no_player_actions_after_fold(history_storage: &[HistoryRecord]) {
    let fold_idx = history_storage.iter().position(|r| {
        matches!(&r.action, Action::PlayedAction(p) if p.settled_as == ActionKind::Fold)
    });
    if let Some(idx) = fold_idx {
        let later = &history_storage[idx + 1..];
        assert!(
            !later
                .iter()
                .any(|r| matches!(r.action, Action::PlayedAction(_) | Action::DealCommunity(_))),
            "Nothing can be played or dealt after a fold"
        );
    }
}

fn validate_betting_sequence(history_storage: &[HistoryRecord]) {
    let mut last_position: Option<Position> = None;
    for record in history_storage {
        match &record.action {
            Action::StreetAdvance(_) => last_position = None,
            Action::PlayedAction(payload) => {
                if let Some(prev) = last_position {
                    assert_ne!(
                        prev, payload.position,
                        "The same seat acted twice in a row"
                    );
                }
                last_position = Some(payload.position);

                if payload.settled_as == ActionKind::Bet {
                    assert!(payload.final_bet > payload.starting_bet || payload.is_all_in);
                }
                // A fold pays out the pot, everything else only adds to it.
                if payload.settled_as != ActionKind::Fold {
                    assert!(
                        payload.final_pot >= payload.starting_pot.saturating_sub(payload.refund)
                    );
                    assert_eq!(payload.final_pot, record.after_game_state.pot);
                }
            }
            _ => {}
        }
    }
}

fn validate_street_progression(history_storage: &[HistoryRecord]) {
    let mut street = Street::Preflop;
    let mut dealt_this_street = 0;
    for record in history_storage {
        match &record.action {
            Action::StreetAdvance(next) => {
                assert_eq!(street.cards_dealt(), dealt_this_street);
                assert_eq!(street.advance(), *next, "Streets have to advance in order");
                street = *next;
                dealt_this_street = 0;
            }
            Action::DealCommunity(_) => {
                dealt_this_street += 1;
            }
            Action::PlayedAction(payload) => {
                assert_eq!(street, payload.street);
            }
            _ => {}
        }
    }
    assert_eq!(street.cards_dealt(), dealt_this_street);
}

fn validate_awards(history_storage: &[HistoryRecord]) {
    let awards: Vec<_> = history_storage
        .iter()
        .filter_map(|r| match &r.action {
            Action::Award(payload) => Some(payload),
            _ => None,
        })
        .collect();
    assert!(!awards.is_empty(), "Someone has to be paid");
    let total_pot = awards[0].total_pot;
    assert!(awards.iter().all(|a| a.total_pot == total_pot));
    assert_eq!(
        total_pot,
        awards.iter().map(|a| a.award_amount).sum::<u32>()
    );
}
