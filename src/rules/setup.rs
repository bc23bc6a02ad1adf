//! Seating strategies and running whole matches.
//!
//! Three ways to fill the table:
//!
//! - [`internal_lineup`]: N random players named by seat, for self-play
//! - [`demo_lineup`]: named seats, all random, for showing the rules off
//! - [`competition_lineup`]: strategies resolved from locators

use tracing::{info, warn};

use crate::core::{EngineError, GameConfig, PlayerId, StrategyError};
use crate::strategy::{RandomStrategy, Strategy, StrategyProvider};

use super::engine::GameEngine;
use super::result::GameResult;

/// A named seat at the table.
pub struct Seat {
    pub name: String,
    pub strategy: Box<dyn Strategy>,
}

impl Seat {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat")
            .field("name", &self.name)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// `player_count` random players named by seat.
#[must_use]
pub fn internal_lineup(player_count: usize, seed: u64) -> Vec<Seat> {
    PlayerId::all(player_count)
        .map(|player| Seat::new(player.to_string(), Box::new(RandomStrategy::new(seed))))
        .collect()
}

/// One random player per name. Seats share `seed`; each seat still draws
/// its own stream once initialized.
#[must_use]
pub fn demo_lineup<S: AsRef<str>>(names: &[S], seed: u64) -> Vec<Seat> {
    names
        .iter()
        .map(|name| Seat::new(name.as_ref(), Box::new(RandomStrategy::new(seed))))
        .collect()
}

/// Resolve one seat per locator.
///
/// Locators the provider does not recognise are skipped with a warning. A
/// recognised locator that then fails to resolve aborts the whole lineup.
pub fn competition_lineup<S: AsRef<str>>(
    provider: &dyn StrategyProvider,
    locators: &[S],
) -> Result<Vec<Seat>, StrategyError> {
    let mut seats = Vec::with_capacity(locators.len());
    for locator in locators.iter().map(AsRef::as_ref) {
        if !provider.is_valid(locator) {
            warn!(locator, "skipping invalid strategy locator");
            continue;
        }
        let strategy = provider.resolve(locator)?;
        info!(locator, name = strategy.name(), seat = seats.len(), "seated strategy");
        seats.push(Seat::new(strategy.name().to_string(), strategy));
    }
    Ok(seats)
}

/// A dealt game with every seat filled.
#[derive(Debug)]
pub struct Match {
    engine: GameEngine,
    names: Vec<String>,
}

impl Match {
    /// Deal a game for `seats`. The seat count overrides
    /// `config.player_count`.
    pub fn new(config: GameConfig, seats: Vec<Seat>) -> Result<Self, EngineError> {
        if seats.is_empty() {
            return Err(EngineError::NoPlayers);
        }

        let mut engine = GameEngine::new(config.with_player_count(seats.len()))?;
        let mut names = Vec::with_capacity(seats.len());
        for (player, seat) in PlayerId::all(seats.len()).zip(seats) {
            engine.register_strategy(player, seat.strategy)?;
            names.push(seat.name);
        }

        Ok(Self { engine, names })
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Seat names in seat order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Play to the end.
    pub fn play(mut self) -> Standings {
        let result = self.engine.run();
        Standings {
            names: self.names,
            result,
        }
    }
}

/// Named final standings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standings {
    pub names: Vec<String>,
    pub result: GameResult,
}

impl Standings {
    /// Position of the first seat called `name`.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<u32> {
        let seat = self.names.iter().position(|n| n == name)?;
        self.result.position(PlayerId::new(u8::try_from(seat).ok()?))
    }

    /// Seat names from first to last place.
    #[must_use]
    pub fn podium(&self) -> Vec<&str> {
        self.result
            .finish_order()
            .into_iter()
            .filter_map(|player| self.names.get(player.index()).map(String::as_str))
            .collect()
    }
}

impl std::fmt::Display for Standings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ((player, position), name) in self.result.iter().zip(&self.names) {
            writeln!(f, "{name} ({player}) finished with rank {position}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StaticRegistry;

    #[test]
    fn test_oversized_internal_lineup_is_rejected() {
        let seats = internal_lineup(256, 1);
        assert_eq!(seats.len(), 256);
        assert_eq!(
            Match::new(GameConfig::default(), seats).err(),
            Some(EngineError::InvalidPlayerCount(256))
        );
    }

    #[test]
    fn test_internal_lineup_names() {
        let seats = internal_lineup(3, 9);
        let names: Vec<_> = seats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Player 0", "Player 1", "Player 2"]);
        assert!(seats.iter().all(|s| s.strategy.name() == RandomStrategy::NAME));
    }

    #[test]
    fn test_competition_skips_invalid() {
        let registry = StaticRegistry::with_builtins(3);
        let seats =
            competition_lineup(&registry, &["greedy", "nope.so", "hand-pressure"]).unwrap();
        let names: Vec<_> = seats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["GreedyFirstFit", "HandPressure"]);
    }

    #[test]
    fn test_empty_lineup_has_no_players() {
        let err = Match::new(GameConfig::default(), Vec::new()).unwrap_err();
        assert_eq!(err, EngineError::NoPlayers);
    }

    #[test]
    fn test_match_standings_display() {
        let seats = demo_lineup(&["Ann", "Bo", "Cy"], 11);
        let standings = Match::new(GameConfig::new(4, 11), seats).unwrap().play();

        assert_eq!(standings.result.player_count(), 3);
        let text = standings.to_string();
        assert!(text.lines().next().unwrap().starts_with("Ann (Player 0) finished with rank "));
        assert_eq!(standings.podium().len(), 3);
        assert!(standings.position_of("Bo").is_some());
        assert_eq!(standings.position_of("Zed"), None);
    }
}
