//! # sevens-engine
//!
//! Turn engine and pluggable strategies for Sevens (Fan Tan).
//!
//! ## Design Principles
//!
//! 1. **Engine Owns State**: The table, every hand and every strategy are
//!    owned by `GameEngine`. Strategies only ever see read-only borrows.
//!
//! 2. **N-Player First**: Any table size from 1 to 52 seats. Nothing
//!    assumes four players.
//!
//! 3. **Deterministic**: All randomness flows from explicit seeds through
//!    `GameRng`. The same config and strategies replay the same game.
//!
//! ## Rules
//!
//! A card is playable when it is a 7 of an unopened suit, or when it sits
//! directly above or below a card of its suit already on the table. Players
//! act in seat order; a player with no legal card passes. Emptying your hand
//! earns the next finish position. A round with no plays at all ends the
//! game, and the remaining players are ranked in seat order.
//!
//! ## Modules
//!
//! - `core`: Cards, players, RNG, configuration, decisions, errors
//! - `cards`: Deck and hands
//! - `table`: Shared table layout and the adjacency rule
//! - `strategy`: Strategy trait, built-in strategies, registry
//! - `rules`: Turn engine, results, match setup
//!
//! ## Example
//!
//! ```
//! use sevens_engine::{demo_lineup, GameConfig, Match};
//!
//! let seats = demo_lineup(&["Ann", "Bo", "Cy", "Di"], 7);
//! let standings = Match::new(GameConfig::default().with_seed(7), seats)
//!     .unwrap()
//!     .play();
//! assert_eq!(standings.result.player_count(), 4);
//! ```

pub mod core;
pub mod cards;
pub mod table;
pub mod strategy;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Card, DECK_SIZE, RANKS, SEVEN, SUITS,
    PlayerId, PlayerMap,
    GameRng,
    GameConfig, TableOpening,
    Decision, PassReason, TurnOutcome, TurnRecord,
    EngineError, IllegalMove, InvalidCard, StrategyError, TableError,
};

pub use crate::cards::{Deck, Hand};

pub use crate::table::TableLayout;

pub use crate::strategy::{
    Strategy, RandomStrategy, GreedyFirstFit,
    HeuristicStrategy, HeuristicWeights, PhaseWeights, Phase, PhaseSignal,
    OpponentTracker,
    StrategyProvider, StaticRegistry, StrategyFactory,
};

pub use crate::rules::{
    EngineStatus, GameEngine, GameResult, PlayerState,
    internal_lineup, demo_lineup, competition_lineup,
    Match, Seat, Standings,
};
