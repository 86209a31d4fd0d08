/// card.rs has value and suit for playing card.
mod card;
/// Export `Card`, `Suit`, and `Value`
pub use self::card::{Card, CardParseError, Suit, Value};

/// deck.rs has the ordered 52 card deck that hands are dealt from.
mod deck;
/// Export `Deck`
pub use self::deck::{Deck, DeckError};

/// 5 card hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{CoreRank, Rank, Rankable};
