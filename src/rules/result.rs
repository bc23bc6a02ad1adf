//! Final standings.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Finish positions of a completed game.
///
/// Positions are a permutation of `1..=N`. Players who emptied their hands
/// are ranked in the order they did so; the rest follow in seat order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    positions: PlayerMap<u32>,
    /// Whether the game ended on a round with no plays.
    pub stalled: bool,
    /// Rounds played, including the final one.
    pub rounds: u32,
}

impl GameResult {
    pub(crate) fn new(positions: PlayerMap<u32>, stalled: bool, rounds: u32) -> Self {
        Self {
            positions,
            stalled,
            rounds,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.positions.player_count()
    }

    /// Finish position of `player`, 1-based.
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Option<u32> {
        self.positions.get(player).copied()
    }

    /// `(player, position)` pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.positions.iter().map(|(p, &pos)| (p, pos))
    }

    /// Players ordered from first to last place.
    #[must_use]
    pub fn finish_order(&self) -> Vec<PlayerId> {
        let mut order: Vec<_> = self.iter().collect();
        order.sort_by_key(|&(_, pos)| pos);
        order.into_iter().map(|(p, _)| p).collect()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.iter().find(|&(_, pos)| pos == 1).map(|(p, _)| p)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (player, position) in self.iter() {
            writeln!(f, "{player} finished with rank {position}")?;
        }
        Ok(())
    }
}
