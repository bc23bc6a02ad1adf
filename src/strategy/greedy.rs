//! First-fit play.

use crate::core::{Card, Decision, PlayerId};
use crate::table::TableLayout;

use super::traits::{first_legal, Strategy};

/// Always plays the first legal card in hand order, else passes.
#[derive(Clone, Debug, Default)]
pub struct GreedyFirstFit;

impl GreedyFirstFit {
    pub const NAME: &'static str = "GreedyFirstFit";
}

impl Strategy for GreedyFirstFit {
    fn initialize(&mut self, _player: PlayerId) {}

    fn select_card_to_play(&mut self, hand: &[Card], table: &TableLayout) -> Decision {
        first_legal(hand, table)
    }

    fn observe_move(&mut self, _player: PlayerId, _card: Card) {}

    fn observe_pass(&mut self, _player: PlayerId) {}

    fn name(&self) -> &str {
        Self::NAME
    }
}
