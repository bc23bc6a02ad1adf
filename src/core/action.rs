//! Strategy decisions and the turn history.
//!
//! A `Decision` is what a strategy returns. It is untrusted: the engine
//! validates it and records what actually happened as a `TurnRecord`.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::player::PlayerId;

/// A strategy's answer to "which card do you play?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Play the card at this index of the hand as presented.
    Play(usize),
    /// Sit this turn out.
    Pass,
}

impl Decision {
    /// Map an optional hand index to a decision.
    #[must_use]
    pub fn from_index(index: Option<usize>) -> Self {
        index.map_or(Decision::Pass, Decision::Play)
    }

    #[must_use]
    pub fn is_pass(self) -> bool {
        matches!(self, Decision::Pass)
    }
}

/// Why a turn ended without a card reaching the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassReason {
    /// The strategy returned `Decision::Pass`.
    Declined,
    /// The index did not reference a card in hand.
    OutOfRange { index: usize },
    /// The referenced card is not adjacent to the table.
    NotPlayable { card: Card },
}

/// Outcome of a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Played(Card),
    Passed(PassReason),
}

/// One entry of the engine's turn log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based round number.
    pub round: u32,
    pub player: PlayerId,
    pub outcome: TurnOutcome,
}

impl TurnRecord {
    /// The card played this turn, if any.
    #[must_use]
    pub fn played(&self) -> Option<Card> {
        match self.outcome {
            TurnOutcome::Played(card) => Some(card),
            TurnOutcome::Passed(_) => None,
        }
    }
}
