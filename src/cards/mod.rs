//! Deck and hands.
//!
//! - `Deck`: the 52 distinct cards, shuffled with an explicit `GameRng`
//! - `Hand`: one player's cards in dealt order

pub mod deck;
pub mod hand;

pub use deck::Deck;
pub use hand::Hand;
