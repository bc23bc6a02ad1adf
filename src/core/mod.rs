//! Core value types: cards, players, RNG, configuration, decisions, errors.
//!
//! Everything here is independent of turn scheduling and strategies.

pub mod card;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use card::{Card, DECK_SIZE, RANKS, SEVEN, SUITS};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, TableOpening};
pub use action::{Decision, PassReason, TurnOutcome, TurnRecord};
pub use error::{EngineError, IllegalMove, InvalidCard, StrategyError, TableError};
