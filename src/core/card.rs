use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Given a character parse that char into a value.
    /// Case is ignored as long as the char is in the ascii range (It should
    /// be). @returns None if there's no value there.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_plo::core::Value;
    ///
    /// assert_eq!(Value::Ace, Value::from_char('A').unwrap());
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Ace),
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'J' => Some(Self::Jack),
            'T' => Some(Self::Ten),
            '9' => Some(Self::Nine),
            '8' => Some(Self::Eight),
            '7' => Some(Self::Seven),
            '6' => Some(Self::Six),
            '5' => Some(Self::Five),
            '4' => Some(Self::Four),
            '3' => Some(Self::Three),
            '2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Convert this Value to a char.
    pub fn to_char(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Jack => 'J',
            Self::Ten => 'T',
            Self::Nine => '9',
            Self::Eight => '8',
            Self::Seven => '7',
            Self::Six => '6',
            Self::Five => '5',
            Self::Four => '4',
            Self::Three => '3',
            Self::Two => '2',
        }
    }

    /// The face number of the card, 2 through 14 with the ace high.
    ///
    /// ```
    /// use rs_plo::core::Value;
    ///
    /// assert_eq!(2, Value::Two.number());
    /// assert_eq!(14, Value::Ace.number());
    /// ```
    pub fn number(self) -> u8 {
        self as u8 + 2
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// This Suit to the character that represents it.
    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'd' => Some(Self::Diamond),
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    /// This Suit to the character that represents it.
    pub fn to_char(self) -> char {
        match self {
            Self::Diamond => 'd',
            Self::Spade => 's',
            Self::Heart => 'h',
            Self::Club => 'c',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CardParseError {
    #[error("expected two characters, got {0:?}")]
    InvalidLength(String),
    #[error("unknown card value {0:?}")]
    UnexpectedValueChar(char),
    #[error("unknown card suit {0:?}")]
    UnexpectedSuitChar(char),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse a two character card like `"As"` or `"td"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(v), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardParseError::InvalidLength(s.to_string()));
        };
        let value = Value::from_char(v).ok_or(CardParseError::UnexpectedValueChar(v))?;
        let suit = Suit::from_char(su).ok_or(CardParseError::UnexpectedSuitChar(su))?;
        Ok(Card { value, suit })
    }
}

impl TryFrom<&str> for Card {
    type Error = CardParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Card {
    /// Parse a run of cards with no separators, for example `"AsKd7h2c"`.
    ///
    /// ```
    /// use rs_plo::core::Card;
    ///
    /// let cards = Card::parse_many("AsKd7h2c").unwrap();
    /// assert_eq!(4, cards.len());
    /// assert_eq!("Kd", cards[1].to_string());
    /// ```
    pub fn parse_many(s: &str) -> Result<Vec<Card>, CardParseError> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() % 2 != 0 {
            return Err(CardParseError::InvalidLength(s.to_string()));
        }
        chars
            .chunks(2)
            .map(|pair| {
                let value =
                    Value::from_char(pair[0]).ok_or(CardParseError::UnexpectedValueChar(pair[0]))?;
                let suit =
                    Suit::from_char(pair[1]).ok_or(CardParseError::UnexpectedSuitChar(pair[1]))?;
                Ok(Card { value, suit })
            })
            .collect()
    }
}
