//! Per-strategy memory of what opponents have done.
//!
//! Built purely from `observe_move` / `observe_pass` callbacks. Strategies do
//! not learn the player count, so opponents are keyed by id as they appear.

use rustc_hash::FxHashMap;

use crate::core::{Card, PlayerId, SUITS};

/// Consecutive passes after which an opponent is considered blocked.
pub const BLOCKED_PASS_THRESHOLD: u32 = 2;

/// Observed opponent behaviour for one game.
#[derive(Clone, Debug, Default)]
pub struct OpponentTracker {
    /// Consecutive passes per opponent; a play resets it.
    pass_streaks: FxHashMap<PlayerId, u32>,
    seen_per_suit: [u8; SUITS as usize],
}

impl OpponentTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.pass_streaks.clear();
        self.seen_per_suit = [0; SUITS as usize];
    }

    pub fn record_move(&mut self, player: PlayerId, card: Card) {
        self.pass_streaks.insert(player, 0);
        let seen = &mut self.seen_per_suit[card.suit() as usize];
        *seen = seen.saturating_add(1);
    }

    pub fn record_pass(&mut self, player: PlayerId) {
        *self.pass_streaks.entry(player).or_default() += 1;
    }

    #[must_use]
    pub fn consecutive_passes(&self, player: PlayerId) -> u32 {
        self.pass_streaks.get(&player).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_blocked(&self, player: PlayerId) -> bool {
        self.consecutive_passes(player) >= BLOCKED_PASS_THRESHOLD
    }

    /// Number of opponents currently at or over the pass threshold.
    #[must_use]
    pub fn blocked_opponents(&self) -> usize {
        self.pass_streaks
            .values()
            .filter(|&&streak| streak >= BLOCKED_PASS_THRESHOLD)
            .count()
    }

    /// Cards of `suit` seen played by opponents.
    #[must_use]
    pub fn seen_in_suit(&self, suit: u8) -> u8 {
        self.seen_per_suit[suit as usize]
    }
}
