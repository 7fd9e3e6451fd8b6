//! # Card Duel AI Library
//!
//! A turn-based card-battle agent built around a Monte Carlo Tree Search
//! decision engine.
//!
//! ## Features
//!
//! - **Battle Domain**: card kinds, actions and a simulation contract, plus a
//!   small self-contained battle engine for demos and tests
//! - **MCTS Engine**: UCT selection, stochastic expansion, heuristic rollouts
//!   and reward backpropagation over an index-based tree
//! - **Decision Driver**: iteration loop over independently randomized
//!   simulation clones, extracting the most-visited action
//!
//! ## Usage
//!
//! ```rust
//! use card_duel::{agent::MctsAgent, battle::duel::Duel, mcts::config::MctsConfig};
//!
//! let mut agent = MctsAgent::new(MctsConfig::default());
//! let duel = Duel::with_seed(7);
//! let chosen = agent.choose_card(&duel).unwrap();
//! ```

/// Battle domain: cards, actions and the simulation contract
pub mod battle;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Decision driver tying the search to a live battle
pub mod agent;

/// Logging setup helper
pub mod logging;

/// Main error type for the Card Duel library
#[derive(Debug, thiserror::Error)]
pub enum CardDuelError {
    #[error("Battle error: {0}")]
    Battle(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CardDuelError>;

pub use agent::MctsAgent;
pub use battle::action::{GameAction, Move};
pub use battle::card::CardKind;
pub use battle::simulator::BattleSimulator;
pub use mcts::config::MctsConfig;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
