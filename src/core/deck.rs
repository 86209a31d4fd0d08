use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use thiserror::Error;
use tracing::trace;

use crate::core::card::{Card, Suit, Value};

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DeckError {
    #[error("Tried to draw {requested} cards with only {remaining} left in the deck")]
    Exhausted { requested: usize, remaining: usize },
}

/// `Deck` is the ordered set of cards a hand is dealt from.
///
/// A new deck holds all 52 cards sorted by suit and then value. Cards
/// come off the top of the deck (the end of the underlying vector) so
/// drawing never has to shift the remaining cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create the canonical 52 card deck.
    pub fn new() -> Self {
        let cards = Suit::suits()
            .into_iter()
            .flat_map(|s| Value::values().into_iter().map(move |v| Card::new(v, s)))
            .collect();
        Self { cards }
    }

    /// Shuffle using the thread local generator. That generator is a CSPRNG
    /// seeded from the operating system, so past deals say nothing about
    /// future ones.
    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffle_with_rng(&mut rng);
    }

    /// Shuffle with a caller supplied cryptographically secure generator.
    pub fn shuffle_with_rng<R: Rng + CryptoRng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        trace!(remaining = self.cards.len(), "Shuffled deck");
    }

    /// Take `n` cards off the top of the deck.
    ///
    /// ```
    /// use rs_plo::core::{Deck, DeckError};
    ///
    /// let mut deck = Deck::new();
    /// assert_eq!(3, deck.draw(3).unwrap().len());
    /// assert_eq!(
    ///     Err(DeckError::Exhausted {
    ///         requested: 50,
    ///         remaining: 49
    ///     }),
    ///     deck.draw(50)
    /// );
    /// ```
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining,
            });
        }
        let mut drawn = self.cards.split_off(remaining - n);
        // The top of the deck is the end of the vector.
        drawn.reverse();
        Ok(drawn)
    }

    /// Remove a card, returning true if it was in the deck.
    pub fn remove(&mut self, card: &Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|c| c == card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a deck from an explicit card order. The last card is the top of
/// the deck. This is how tests stack a deck.
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
