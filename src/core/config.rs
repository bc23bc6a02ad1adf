//! Game configuration.
//!
//! A `GameConfig` fully determines a game's deal: the same config always
//! produces the same hands. Strategies may still introduce their own
//! (separately seeded) randomness.

use serde::{Deserialize, Serialize};

use super::card::DECK_SIZE;

/// How the table looks before the first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableOpening {
    /// All four 7s start on the table and are withheld from the deal.
    #[default]
    SevensPrePlayed,
    /// Empty table: each suit's first legal card is its own 7.
    Empty,
}

/// Setup parameters for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats, `1..=52`.
    pub player_count: usize,

    /// Seed for the deck shuffle. Never derived from the clock.
    pub seed: u64,

    /// Initial table layout.
    #[serde(default)]
    pub opening: TableOpening,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            seed: 0,
            opening: TableOpening::default(),
        }
    }
}

impl GameConfig {
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self {
            player_count,
            seed,
            ..Self::default()
        }
    }

    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_opening(mut self, opening: TableOpening) -> Self {
        self.opening = opening;
        self
    }

    /// Whether `player_count` is within the supported range.
    #[must_use]
    pub fn is_valid_player_count(&self) -> bool {
        (1..=DECK_SIZE).contains(&self.player_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opening_is_pre_played() {
        let config = GameConfig::default();
        assert_eq!(config.opening, TableOpening::SevensPrePlayed);
        assert_eq!(config.player_count, 4);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(3, 9).with_opening(TableOpening::Empty).with_seed(11);
        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, 11);
        assert_eq!(config.opening, TableOpening::Empty);
    }

    #[test]
    fn test_player_count_range() {
        assert!(!GameConfig::new(0, 0).is_valid_player_count());
        assert!(GameConfig::new(1, 0).is_valid_player_count());
        assert!(GameConfig::new(52, 0).is_valid_player_count());
        assert!(!GameConfig::new(53, 0).is_valid_player_count());
    }

    #[test]
    fn test_opening_defaults_when_missing_from_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{"player_count": 5, "seed": 3}"#).unwrap();
        assert_eq!(config, GameConfig::new(5, 3));
    }
}
