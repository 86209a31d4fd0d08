//! # Table Configuration
//!
//! Blinds, starting stacks, and the pot-limit sizing rules for a hand.
//! With the `serde` feature these can be loaded from JSON files or inline
//! JSON strings. Every field has a default so partial configs work.
//!
//! ```json
//! {
//!   "starting_stacks": {"oop": 200, "ip": 200},
//!   "small_blind": 1,
//!   "big_blind": 2,
//!   "rules": {
//!     "minimum_increment": 2,
//!     "min_raise_multiplier": 2,
//!     "preflop_raise_multiplier": 3,
//!     "postflop_raise_multiplier": 3
//!   }
//! }
//! ```
use thiserror::Error;

use super::game_state::Seats;

/// The multipliers and increments behind `min_bet` and `max_bet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BettingRules {
    /// The smallest bet allowed, unless it's an all in.
    pub minimum_increment: u32,
    /// A raise has to reach at least this multiple of the current bet.
    pub min_raise_multiplier: u32,
    /// Preflop the most a seat can raise to is this multiple of the
    /// current bet.
    pub preflop_raise_multiplier: u32,
    /// Postflop, facing a bet, the most a seat can raise to is this
    /// multiple of the current bet plus the pot at the start of the street.
    pub postflop_raise_multiplier: u32,
}

impl BettingRules {
    /// The standard rules for a given big blind.
    pub fn for_big_blind(big_blind: u32) -> Self {
        Self {
            minimum_increment: big_blind,
            ..Self::default()
        }
    }
}

impl Default for BettingRules {
    fn default() -> Self {
        Self {
            minimum_increment: 2,
            min_raise_multiplier: 2,
            preflop_raise_multiplier: 3,
            postflop_raise_multiplier: 3,
        }
    }
}

/// Everything needed to start a hand besides the cards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    pub starting_stacks: Seats<u32>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub rules: BettingRules,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stacks: Seats::new(200, 200),
            small_blind: 1,
            big_blind: 2,
            rules: BettingRules::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(feature = "serde")]
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl TableConfig {
    /// Make sure a hand can actually be played with this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::ValidationError(
                "big_blind must be positive".to_string(),
            ));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::ValidationError(format!(
                "small_blind {} is larger than big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stacks.oop == 0 || self.starting_stacks.ip == 0 {
            return Err(ConfigError::ValidationError(
                "both starting stacks must be positive".to_string(),
            ));
        }
        if self
            .starting_stacks
            .oop
            .checked_add(self.starting_stacks.ip)
            .is_none()
        {
            return Err(ConfigError::ValidationError(format!(
                "starting stacks {} and {} add up to more than {} chips",
                self.starting_stacks.oop,
                self.starting_stacks.ip,
                u32::MAX
            )));
        }
        let rules = &self.rules;
        if rules.minimum_increment == 0 {
            return Err(ConfigError::ValidationError(
                "minimum_increment must be positive".to_string(),
            ));
        }
        // A postflop pot is at least two big blinds, so any increment up to
        // the big blind fits under the pot limit.
        if rules.minimum_increment > self.big_blind {
            return Err(ConfigError::ValidationError(format!(
                "minimum_increment {} is larger than big_blind {}",
                rules.minimum_increment, self.big_blind
            )));
        }
        if rules.min_raise_multiplier < 1 {
            return Err(ConfigError::ValidationError(
                "min_raise_multiplier must be at least 1".to_string(),
            ));
        }
        if rules.preflop_raise_multiplier < rules.min_raise_multiplier
            || rules.postflop_raise_multiplier < rules.min_raise_multiplier
        {
            return Err(ConfigError::ValidationError(format!(
                "raise multipliers ({}, {}) can't be below min_raise_multiplier {}",
                rules.preflop_raise_multiplier,
                rules.postflop_raise_multiplier,
                rules.min_raise_multiplier
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl TableConfig {
    /// Create from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create from a file path
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to parse as file path first, then as inline JSON
    pub fn from_str_or_file(input: &str) -> Result<Self, ConfigError> {
        match Self::from_file(input) {
            Ok(config) => Ok(config),
            Err(ConfigError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::from_json(input)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(200, config.starting_stacks.oop);
        assert_eq!(3, config.rules.preflop_raise_multiplier);
    }

    #[test]
    fn test_for_big_blind() {
        let rules = BettingRules::for_big_blind(10);
        assert_eq!(10, rules.minimum_increment);
        assert_eq!(2, rules.min_raise_multiplier);
    }

    #[test]
    fn test_rejects_zero_big_blind() {
        let config = TableConfig {
            big_blind: 0,
            small_blind: 0,
            ..TableConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_small_multiplier() {
        let config = TableConfig {
            rules: BettingRules {
                preflop_raise_multiplier: 1,
                ..BettingRules::default()
            },
            ..TableConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_stacks_that_overflow() {
        let half = u32::MAX / 2 + 1;
        let config = TableConfig {
            starting_stacks: Seats::new(half, half),
            ..TableConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let config = TableConfig {
            starting_stacks: Seats::new(u32::MAX - 200, 200),
            ..TableConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_increment_above_big_blind() {
        let config = TableConfig {
            rules: BettingRules {
                minimum_increment: 10,
                ..BettingRules::default()
            },
            ..TableConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let config = TableConfig {
            small_blind: 5,
            big_blind: 10,
            rules: BettingRules::for_big_blind(10),
            ..TableConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_partial() {
        let config = TableConfig::from_json(
            r#"{"starting_stacks": {"oop": 50, "ip": 300}, "rules": {"preflop_raise_multiplier": 2}}"#,
        )
        .unwrap();
        assert_eq!(Seats::new(50, 300), config.starting_stacks);
        assert_eq!(2, config.big_blind);
        assert_eq!(2, config.rules.preflop_raise_multiplier);
        assert_eq!(3, config.rules.postflop_raise_multiplier);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_validates() {
        let res = TableConfig::from_json(r#"{"small_blind": 5, "big_blind": 2}"#);
        assert!(matches!(res, Err(ConfigError::ValidationError(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_str_or_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"big_blind": 4, "small_blind": 2}}"#).unwrap();
        let from_file = TableConfig::from_str_or_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(4, from_file.big_blind);

        let inline = TableConfig::from_str_or_file(r#"{"big_blind": 6}"#).unwrap();
        assert_eq!(6, inline.big_blind);
    }
}
