//! # Agent Configuration
//!
//! JSON configuration for the stock agents, so which agents sit at the table
//! can be chosen from a file or an inline string.
//!
//! ```rust
//! use rs_plo::arena::agent::{AgentGenerator, ConfigAgentGenerator};
//! use rs_plo::arena::{Agent, HandState, Position, TableConfig};
//!
//! let generator = ConfigAgentGenerator::from_json(r#"{"type": "calling"}"#).unwrap();
//! let state = HandState::new(&TableConfig::default()).unwrap();
//! let agent = generator.generate(Position::Oop, &state);
//! assert_eq!("CallingAgent-OOP", agent.name());
//! ```
//!
//! ## Supported Agent Types
//!
//! - `all_in` - Bets the most the pot limit allows
//! - `calling` - Checks or calls
//! - `folding` - Folds whenever it can
//! - `random` - Random legal actions, with optional probabilities and seed
//! - `replay` - Plays a fixed list of actions
//!
//! ```json
//! {
//!   "type": "random",
//!   "percent_fold": [0.2, 0.3, 0.5],
//!   "percent_call": [0.5, 0.6, 0.45],
//!   "seed": 42
//! }
//! ```
//!
//! ```json
//! {"type": "replay", "actions": ["call", {"bet": 12}, "fold"], "default": "check"}
//! ```
use std::{io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::{Agent, HandState, action::AgentAction, game_state::Position};

use super::{
    AgentGenerator, AllInAgent, CallingAgent, FoldingAgent, RandomAgent, VecReplayAgent,
};

/// Configuration for different agent types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentConfig {
    /// Agent that always bets the maximum
    AllIn,
    /// Agent that always checks or calls
    Calling,
    /// Agent that always folds
    Folding,
    /// Agent that makes random decisions based on probability vectors
    Random {
        /// Probability of folding indexed by actions so far on the street
        #[serde(default = "default_percent_fold")]
        percent_fold: Vec<f64>,
        /// Probability of checking or calling indexed by actions so far
        #[serde(default = "default_percent_call")]
        percent_call: Vec<f64>,
        /// Fixed seed for reproducible play
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Agent that replays a fixed list of actions
    Replay {
        actions: Vec<AgentAction>,
        /// What to play once the list runs out
        #[serde(default = "default_replay_action")]
        default: AgentAction,
    },
}

fn default_percent_fold() -> Vec<f64> {
    vec![0.25, 0.30, 0.50]
}

fn default_percent_call() -> Vec<f64> {
    vec![0.5, 0.6, 0.45]
}

fn default_replay_action() -> AgentAction {
    AgentAction::Fold
}

/// Errors that can occur during agent configuration
#[derive(Debug, Error)]
pub enum AgentConfigError {
    /// Invalid probability value (must be between 0.0 and 1.0)
    #[error("Invalid probability value: {0} (must be between 0.0 and 1.0)")]
    InvalidProbability(f64),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AgentConfig {
    /// Validate that the configuration is correct
    pub fn validate(&self) -> Result<(), AgentConfigError> {
        match self {
            AgentConfig::Random {
                percent_fold,
                percent_call,
                ..
            } => {
                if percent_fold.is_empty() || percent_call.is_empty() {
                    return Err(AgentConfigError::ValidationError(
                        "random agent probabilities can't be empty".to_string(),
                    ));
                }
                validate_probabilities(percent_fold)?;
                validate_probabilities(percent_call)?;
            }
            AgentConfig::AllIn
            | AgentConfig::Calling
            | AgentConfig::Folding
            | AgentConfig::Replay { .. } => {}
        }
        Ok(())
    }
}

fn validate_probabilities(probs: &[f64]) -> Result<(), AgentConfigError> {
    for &p in probs {
        if !(0.0..=1.0).contains(&p) {
            return Err(AgentConfigError::InvalidProbability(p));
        }
    }
    Ok(())
}

/// Agent generator that creates agents from configuration
#[derive(Debug, Clone)]
pub struct ConfigAgentGenerator {
    config: AgentConfig,
}

impl ConfigAgentGenerator {
    /// Create a new generator from a validated config
    pub fn new(config: AgentConfig) -> Result<Self, AgentConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Create from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AgentConfigError> {
        let config: AgentConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    /// Create from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AgentConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to parse as file path first, then as inline JSON
    pub fn from_str_or_file(input: &str) -> Result<Self, AgentConfigError> {
        match Self::from_file(input) {
            Ok(generator) => Ok(generator),
            Err(AgentConfigError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
                Self::from_json(input)
            }
            Err(err) => Err(err),
        }
    }
}

impl AgentGenerator for ConfigAgentGenerator {
    fn generate(&self, position: Position, _game_state: &HandState) -> Box<dyn Agent> {
        match &self.config {
            AgentConfig::AllIn => Box::new(AllInAgent::new(format!("AllInAgent-{position}"))),
            AgentConfig::Calling => {
                Box::new(CallingAgent::new(format!("CallingAgent-{position}")))
            }
            AgentConfig::Folding => {
                Box::new(FoldingAgent::new(format!("FoldingAgent-{position}")))
            }
            AgentConfig::Random {
                percent_fold,
                percent_call,
                seed,
            } => {
                let name = format!("RandomAgent-{position}");
                match seed {
                    Some(seed) => Box::new(RandomAgent::new_with_seed(
                        name,
                        percent_fold.clone(),
                        percent_call.clone(),
                        *seed,
                    )),
                    None => Box::new(RandomAgent::new(
                        name,
                        percent_fold.clone(),
                        percent_call.clone(),
                    )),
                }
            }
            AgentConfig::Replay { actions, default } => Box::new(VecReplayAgent::new_with_default(
                format!("ReplayAgent-{position}"),
                actions.clone(),
                *default,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::TableConfig;

    use super::*;

    fn test_game_state() -> HandState {
        HandState::new(&TableConfig::default()).unwrap()
    }

    #[test]
    fn test_serialize_simple_agents() {
        assert_eq!(
            r#"{"type":"all_in"}"#,
            serde_json::to_string(&AgentConfig::AllIn).unwrap()
        );
        assert_eq!(
            r#"{"type":"calling"}"#,
            serde_json::to_string(&AgentConfig::Calling).unwrap()
        );
        assert_eq!(
            r#"{"type":"folding"}"#,
            serde_json::to_string(&AgentConfig::Folding).unwrap()
        );
    }

    #[test]
    fn test_deserialize_random_with_defaults() {
        let config: AgentConfig = serde_json::from_str(r#"{"type":"random"}"#).unwrap();
        assert_eq!(
            AgentConfig::Random {
                percent_fold: vec![0.25, 0.30, 0.50],
                percent_call: vec![0.5, 0.6, 0.45],
                seed: None,
            },
            config
        );
    }

    #[test]
    fn test_deserialize_replay() {
        let config: AgentConfig = serde_json::from_str(
            r#"{"type":"replay","actions":["call",{"bet":12},"fold"],"default":"check"}"#,
        )
        .unwrap();
        assert_eq!(
            AgentConfig::Replay {
                actions: vec![AgentAction::Call, AgentAction::Bet(12), AgentAction::Fold],
                default: AgentAction::Check,
            },
            config
        );
    }

    #[test]
    fn test_validate_invalid_probability() {
        let config = AgentConfig::Random {
            percent_fold: vec![1.5],
            percent_call: vec![0.5],
            seed: None,
        };
        assert!(matches!(
            config.validate(),
            Err(AgentConfigError::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_validate_empty_probabilities() {
        let config = AgentConfig::Random {
            percent_fold: vec![],
            percent_call: vec![0.5],
            seed: None,
        };
        assert!(matches!(
            config.validate(),
            Err(AgentConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_round_trip_serialization() {
        let configs = vec![
            AgentConfig::AllIn,
            AgentConfig::Calling,
            AgentConfig::Folding,
            AgentConfig::Random {
                percent_fold: vec![0.2],
                percent_call: vec![0.5],
                seed: Some(3),
            },
            AgentConfig::Replay {
                actions: vec![AgentAction::Bet(4)],
                default: AgentAction::Fold,
            },
        ];

        for config in configs {
            let json = serde_json::to_string(&config).unwrap();
            let deserialized: AgentConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config, deserialized);
        }
    }

    #[test]
    fn test_generated_names() {
        let state = test_game_state();
        for (json, name) in [
            (r#"{"type":"all_in"}"#, "AllInAgent-IP"),
            (r#"{"type":"folding"}"#, "FoldingAgent-IP"),
            (r#"{"type":"random","seed":1}"#, "RandomAgent-IP"),
            (r#"{"type":"replay","actions":[]}"#, "ReplayAgent-IP"),
        ] {
            let generator = ConfigAgentGenerator::from_json(json).unwrap();
            assert_eq!(name, generator.generate(Position::Ip, &state).name());
        }
    }

    #[test]
    fn test_validation_on_construction() {
        let json = r#"{"type":"random","percent_fold":[1.5],"percent_call":[0.5]}"#;
        assert!(ConfigAgentGenerator::from_json(json).is_err());
    }

    #[test]
    fn test_from_str_or_file() {
        use std::io::Write;

        let generator = ConfigAgentGenerator::from_str_or_file(r#"{"type":"all_in"}"#).unwrap();
        assert_eq!(&AgentConfig::AllIn, generator.config());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type":"folding"}}"#).unwrap();
        let generator =
            ConfigAgentGenerator::from_str_or_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(&AgentConfig::Folding, generator.config());
    }
}
