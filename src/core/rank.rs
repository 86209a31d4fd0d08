use crate::core::card::Card;

/// The strength of a five card hand.
///
/// Categories compare in the usual poker order. Inside a category the
/// `u32` breaks ties: it packs the card values most important first, so a
/// bigger number is a better hand of the same category.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum Rank {
    HighCard(u32),
    OnePair(u32),
    TwoPair(u32),
    ThreeOfAKind(u32),
    /// Holds the value of the top card. The wheel is topped by the five.
    Straight(u32),
    Flush(u32),
    FullHouse(u32),
    FourOfAKind(u32),
    StraightFlush(u32),
}

/// Just the category of a `Rank`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum CoreRank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl From<Rank> for CoreRank {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::HighCard(_) => CoreRank::HighCard,
            Rank::OnePair(_) => CoreRank::OnePair,
            Rank::TwoPair(_) => CoreRank::TwoPair,
            Rank::ThreeOfAKind(_) => CoreRank::ThreeOfAKind,
            Rank::Straight(_) => CoreRank::Straight,
            Rank::Flush(_) => CoreRank::Flush,
            Rank::FullHouse(_) => CoreRank::FullHouse,
            Rank::FourOfAKind(_) => CoreRank::FourOfAKind,
            Rank::StraightFlush(_) => CoreRank::StraightFlush,
        }
    }
}

/// A-2-3-4-5
const WHEEL: u32 = 0b1_0000_0000_1111;
const FIVE_HIGH: u32 = 3;
const RUN: u32 = 0b1_1111;

/// The value of the top card of a straight in `value_set`, if any.
fn straight_top(value_set: u32) -> Option<u32> {
    (4..13)
        .rev()
        .find(|top| value_set & (RUN << (top - 4)) == RUN << (top - 4))
        .or_else(|| (value_set & WHEEL == WHEEL).then_some(FIVE_HIGH))
}

/// Something that holds a five card hand.
pub trait Rankable {
    fn cards(&self) -> impl Iterator<Item = Card>;

    /// Rank the hand.
    ///
    /// # Examples
    /// ```
    /// use rs_plo::core::{Card, CoreRank, Rankable};
    ///
    /// let hand = Card::parse_many("2h2d8d8sKd").unwrap();
    /// assert_eq!(CoreRank::TwoPair, CoreRank::from(hand.rank_five()));
    /// ```
    fn rank_five(&self) -> Rank {
        let mut counts = [0u8; 13];
        let mut suits = 0u8;
        let mut num_cards = 0;
        for card in self.cards() {
            counts[card.value as usize] += 1;
            suits |= 1 << (card.suit as u8);
            num_cards += 1;
        }

        // (count, value) for every value in the hand, biggest groups first
        // and higher values first within a group size.
        let mut groups = [(0u8, 0u8); 13];
        for (value, &count) in counts.iter().enumerate() {
            groups[value] = (count, value as u8);
        }
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let distinct = groups.iter().take_while(|(count, _)| *count > 0);
        let kickers = distinct
            .clone()
            .fold(0u32, |acc, &(_, value)| (acc << 4) | u32::from(value));
        let value_set = distinct.fold(0u32, |acc, &(_, value)| acc | (1 << value));

        match (groups[0].0, groups[1].0) {
            (4, _) => Rank::FourOfAKind(kickers),
            (3, 2) => Rank::FullHouse(kickers),
            (3, _) => Rank::ThreeOfAKind(kickers),
            (2, 2) => Rank::TwoPair(kickers),
            (2, _) => Rank::OnePair(kickers),
            _ => {
                let is_flush = num_cards == 5 && suits.count_ones() == 1;
                let straight = if num_cards == 5 {
                    straight_top(value_set)
                } else {
                    None
                };
                match (straight, is_flush) {
                    (Some(top), true) => Rank::StraightFlush(top),
                    (Some(top), false) => Rank::Straight(top),
                    (None, true) => Rank::Flush(kickers),
                    (None, false) => Rank::HighCard(kickers),
                }
            }
        }
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for Vec<Card> {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl<const N: usize> Rankable for [Card; N] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Value;

    fn rank(s: &str) -> Rank {
        Card::parse_many(s).unwrap().rank_five()
    }

    fn category(s: &str) -> CoreRank {
        CoreRank::from(rank(s))
    }

    #[test]
    fn test_categories() {
        assert_eq!(CoreRank::HighCard, category("Ad8h9cTc5c"));
        assert_eq!(CoreRank::OnePair, category("AdAc9d8cTs"));
        assert_eq!(CoreRank::TwoPair, category("AdAc9d9cTs"));
        assert_eq!(CoreRank::ThreeOfAKind, category("2c2s2h5s6d"));
        assert_eq!(CoreRank::Straight, category("9dTcJdQdKd"));
        assert_eq!(CoreRank::Flush, category("Ad8d9dTd5d"));
        assert_eq!(CoreRank::FullHouse, category("AdAc9d9c9s"));
        assert_eq!(CoreRank::FourOfAKind, category("AdAcAsAhTs"));
        assert_eq!(CoreRank::StraightFlush, category("9dTdJdQdKd"));
    }

    #[test]
    fn test_category_order() {
        assert!(Rank::HighCard(u32::MAX) < Rank::OnePair(0));
        assert!(rank("9dTdJdQdKd") > rank("AsAhAdAcKs"));
        assert!(rank("AdAc9d9c9s") > rank("Ad8d9dTd5d"));
        assert!(CoreRank::OnePair < CoreRank::TwoPair);
    }

    #[test]
    fn test_high_card_kickers() {
        let expected = [Value::Ace, Value::Ten, Value::Nine, Value::Eight, Value::Five]
            .iter()
            .fold(0u32, |acc, v| (acc << 4) | *v as u32);
        assert_eq!(Rank::HighCard(expected), rank("Ad8h9cTc5c"));
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        assert_eq!(Rank::Straight(Value::Five as u32), rank("Ad2c3s4h5s"));
        assert!(rank("Ad2c3s4h5s") < rank("2c3s4h5s6d"));
        assert_eq!(Rank::Straight(Value::Ace as u32), rank("TsJhQdKcAs"));
        assert_eq!(CoreRank::HighCard, category("Ad2c3s4h6d"));
    }

    #[test]
    fn test_kickers_break_ties() {
        assert!(rank("AsAhKdQcJs") > rank("KsKhAdQcJs"));
        assert!(rank("AsAhKdKcJs") > rank("AsAhQdQcKs"));
        assert!(rank("AsAhKdQcJs") > rank("AsAhKdQc9s"));
        // Trips outrank the pair in a full house.
        assert!(rank("3s3h3d2c2s") > rank("2s2h2dAcAs"));
        assert_eq!(rank("AsAhKdQcJs"), rank("AdAcKhQsJd"));
    }
}
