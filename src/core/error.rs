//! Error types.
//!
//! Setup failures (`EngineError`, `StrategyError`) are returned before any
//! turn runs. In-turn problems are `IllegalMove`s: the engine logs them and
//! converts them to passes, so they never escape a running game.

use thiserror::Error;

use super::card::Card;
use super::player::PlayerId;

/// Failure to turn a locator into a live strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// The module is missing or cannot be read.
    #[error("failed to load strategy `{locator}`: {reason}")]
    Load { locator: String, reason: String },

    /// The module exists but exports no construction entry point.
    #[error("strategy `{locator}` has no factory")]
    MissingFactory { locator: String },

    /// The factory ran but returned no usable instance.
    #[error("factory for strategy `{locator}` returned no instance")]
    Instantiation { locator: String },
}

impl StrategyError {
    pub fn load(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        StrategyError::Load {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn locator(&self) -> &str {
        match self {
            StrategyError::Load { locator, .. }
            | StrategyError::MissingFactory { locator }
            | StrategyError::Instantiation { locator } => locator,
        }
    }
}

/// A `(suit, rank)` pair outside the 52-card deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("({suit}, {rank}) is not a card: suit must be in 0..4 and rank in 1..=13")]
pub struct InvalidCard {
    pub suit: u8,
    pub rank: u8,
}

/// A strategy asked for a move the table does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("index {index} is out of range for a hand of {hand_len}")]
    OutOfRange { index: usize, hand_len: usize },

    #[error("{card} is not playable on the current table")]
    NotPlayable { card: Card },
}

/// Rejected table mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{0} is already on the table")]
    AlreadyPlayed(Card),

    #[error("{0} has no played neighbour and is not an opening seven")]
    NotAdjacent(Card),
}

/// Game setup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("player count must be between 1 and 52, got {0}")]
    InvalidPlayerCount(usize),

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("strategies cannot change once the game has started")]
    AlreadyStarted,

    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    #[error("no players could be seated")]
    NoPlayers,

    #[error(transparent)]
    Strategy(#[from] StrategyError),
}
