//! Uniform random play among legal cards.

use crate::core::{Card, Decision, GameRng, PlayerId};
use crate::table::TableLayout;

use super::traits::{legal_indices, Strategy};

/// Picks uniformly among the currently legal cards; passes when none are.
///
/// Seeded at construction. `initialize` derives a per-seat stream from that
/// seed, so two copies seated at different places make different choices
/// while each stays reproducible.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    seed: u64,
    rng: GameRng,
}

impl RandomStrategy {
    pub const NAME: &'static str = "RandomStrategy";

    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: GameRng::new(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn initialize(&mut self, player: PlayerId) {
        self.rng = GameRng::new(self.seed).for_context(&format!("player-{}", player.index()));
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &TableLayout) -> Decision {
        let legal = legal_indices(hand, table);
        Decision::from_index(self.rng.choose(&legal).copied())
    }

    fn observe_move(&mut self, _player: PlayerId, _card: Card) {}

    fn observe_pass(&mut self, _player: PlayerId) {}

    fn name(&self) -> &str {
        Self::NAME
    }
}
