//! Showdown evaluation for Omaha.
//!
//! The engine only needs a total order over hands, so it talks to hand
//! evaluation through [`HandRanker`]. Lower strengths win, equal strengths
//! split the pot.
use std::cmp::Reverse;

use crate::core::{Card, Rank, Rankable};

/// Ranks a finished Omaha hand.
///
/// Implementations must be deterministic and free of side effects: the same
/// board and hole cards always produce the same strength.
pub trait HandRanker {
    /// The comparable result. The lower value is the stronger hand.
    type Strength: Ord + std::fmt::Debug;

    fn rank(&self, board: &[Card; 5], hole: &[Card; 4]) -> Self::Strength;
}

/// The standard Omaha ranking: the best five card hand made from exactly two
/// hole cards and exactly three board cards.
///
/// ```
/// use rs_plo::core::Card;
/// use rs_plo::omaha::{HandRanker, OmahaRanker};
///
/// let board: [Card; 5] = Card::parse_many("AsKsQs2d3c").unwrap().try_into().unwrap();
/// // One spade in the hand is not enough for a flush in Omaha.
/// let one_spade: [Card; 4] = Card::parse_many("Js7h7d8c").unwrap().try_into().unwrap();
/// let two_spades: [Card; 4] = Card::parse_many("Js9s4h4d").unwrap().try_into().unwrap();
///
/// let ranker = OmahaRanker;
/// assert!(ranker.rank(&board, &two_spades) < ranker.rank(&board, &one_spade));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OmahaRanker;

/// Every way to pick two of the four hole cards.
const HOLE_PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Every way to pick three of the five board cards.
const BOARD_TRIPLES: [(usize, usize, usize); 10] = [
    (0, 1, 2),
    (0, 1, 3),
    (0, 1, 4),
    (0, 2, 3),
    (0, 2, 4),
    (0, 3, 4),
    (1, 2, 3),
    (1, 2, 4),
    (1, 3, 4),
    (2, 3, 4),
];

impl OmahaRanker {
    /// The best `Rank` available, higher is better.
    pub fn best_rank(board: &[Card; 5], hole: &[Card; 4]) -> Rank {
        HOLE_PAIRS
            .iter()
            .flat_map(|&(h1, h2)| {
                BOARD_TRIPLES.iter().map(move |&(b1, b2, b3)| {
                    [hole[h1], hole[h2], board[b1], board[b2], board[b3]].rank_five()
                })
            })
            .max()
            // Both tables are non-empty.
            .unwrap_or(Rank::HighCard(0))
    }
}

impl HandRanker for OmahaRanker {
    type Strength = Reverse<Rank>;

    fn rank(&self, board: &[Card; 5], hole: &[Card; 4]) -> Self::Strength {
        Reverse(Self::best_rank(board, hole))
    }
}
