//! The strategy capability interface.

use crate::core::{Card, Decision, PlayerId};
use crate::table::TableLayout;

/// A pluggable decision-maker for one seat.
///
/// The engine holds one boxed `Strategy` per player and never inspects which
/// implementation it is.
///
/// ## Contract
///
/// - `initialize` is called exactly once, before the first turn, and resets
///   all private memory.
/// - `select_card_to_play` sees the player's hand (dealt order) and the table.
///   It may return any index; the engine treats out-of-range or unplayable
///   indices as a pass. Passing while a legal card exists is allowed.
/// - `observe_move` / `observe_pass` report every turn taken by *other*
///   players, in turn order.
pub trait Strategy: Send {
    /// Reset private memory for a new game as `player`.
    fn initialize(&mut self, player: PlayerId);

    /// Choose a card from `hand` or pass.
    fn select_card_to_play(&mut self, hand: &[Card], table: &TableLayout) -> Decision;

    /// Another player placed `card` on the table.
    fn observe_move(&mut self, player: PlayerId, card: Card);

    /// Another player passed (voluntarily or through an illegal decision).
    fn observe_pass(&mut self, player: PlayerId);

    /// Display name.
    fn name(&self) -> &str;
}

/// Indices of the cards in `hand` that the table currently accepts.
pub fn legal_indices(hand: &[Card], table: &TableLayout) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|&(_, &card)| table.is_playable(card))
        .map(|(i, _)| i)
        .collect()
}

/// First playable card in hand order.
#[must_use]
pub fn first_legal(hand: &[Card], table: &TableLayout) -> Decision {
    Decision::from_index(hand.iter().position(|&card| table.is_playable(card)))
}
