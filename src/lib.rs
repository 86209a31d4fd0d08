//! RS-PLO is a library for running heads-up Pot-Limit Omaha hands.
//!
//! It deals the cards, enforces pot-limit betting on every street between
//! two pluggable agents, settles the showdown, and records what happened.
//!
//! ## Core
//!
//! The core module contains the card model, the deck, and a fast 5-card hand
//! ranking.
//!
//! ```
//! use rs_plo::core::{Card, Deck, Suit, Value};
//!
//! let mut deck = Deck::new();
//! assert!(deck.contains(&Card::new(Value::Ace, Suit::Spade)));
//! deck.shuffle();
//! let hole = deck.draw(4).unwrap();
//! assert_eq!(4, hole.len());
//! assert_eq!(48, deck.len());
//! ```
//!
//! ## Omaha
//!
//! Showdowns are decided through the `HandRanker` trait. `OmahaRanker` is the
//! default implementation; it finds the best hand using exactly two hole cards
//! and exactly three board cards.
//!
//! ## Arena
//!
//! The arena is where hands are played. A `HandSimulation` owns one hand and
//! is an iterator of snapshots; each step posts blinds, deals, asks an agent
//! for a decision, or settles the pot.
//!
//! ```
//! use rs_plo::arena::agent::CallingAgent;
//! use rs_plo::arena::{HandSimulationBuilder, Seats, TableConfig};
//!
//! let mut sim = HandSimulationBuilder::default()
//!     .table_config(TableConfig::default())
//!     .agents(Seats::new(
//!         Box::new(CallingAgent::new("oop")),
//!         Box::new(CallingAgent::new("ip")),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let outcome = sim.run().unwrap();
//! assert_eq!(400, sim.game_state.total_chips());
//! assert_eq!(4, outcome.pot);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;

/// Omaha specific hand evaluation.
pub mod omaha;

/// The arena is where two agents play a hand against each other.
pub mod arena;
