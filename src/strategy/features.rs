//! Phase classification and per-candidate feature extraction.
//!
//! Heuristic strategies score each legal card as a weighted sum of the
//! features computed here. The weights live in `heuristic.rs`; this module
//! only describes the position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, RANKS, SUITS};
use crate::table::TableLayout;

use super::memory::OpponentTracker;

/// Coarse stage of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

/// Which progress signal drives phase classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseSignal {
    /// Cards on the table: below 10 is early, below 30 mid, then late.
    TableProgress,
    /// Early while fewer than 12 cards are on the table; late once the
    /// acting hand is down to 4 cards or fewer.
    HandPressure,
}

impl PhaseSignal {
    #[must_use]
    pub fn classify(self, table_played: usize, hand_len: usize) -> Phase {
        match self {
            PhaseSignal::TableProgress => match table_played {
                0..=9 => Phase::Early,
                10..=29 => Phase::Mid,
                _ => Phase::Late,
            },
            PhaseSignal::HandPressure => {
                if table_played < 12 {
                    Phase::Early
                } else if hand_len <= 4 {
                    Phase::Late
                } else {
                    Phase::Mid
                }
            }
        }
    }
}

/// Everything a heuristic knows about one legal card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateFeatures {
    /// Index in the hand as presented.
    pub index: usize,
    pub card: Card,
    pub is_seven: bool,
    pub is_edge: bool,
    /// Rank 6 or 8.
    pub beside_seven: bool,
    /// Hand holds a same-suit card one rank away.
    pub has_neighbour: bool,
    /// Ace with the 2 in hand, or king with the queen.
    pub edge_combo: bool,
    /// Consecutive same-suit ranks held, counting this card.
    pub chain_length: u8,
    /// Playing this card leaves both neighbouring ranks playable.
    pub opens_both_ends: bool,
    /// 0, 1 or 2 from the suit's open ends and coverage.
    pub suit_playability: u8,
    /// Cards of this suit in hand, counting this card.
    pub suit_length: u8,
    /// This suit is (one of) the most represented in hand.
    pub in_longest_suit: bool,
    /// Cards of this suit not yet on the table.
    pub remaining_in_suit: u8,
    /// Cards of this suit opponents have been seen playing.
    pub opponent_plays_in_suit: u8,
    /// Opponents currently considered blocked.
    pub opponents_blocked: u8,
}

/// Features for every legal card in `hand`, in hand order.
pub fn extract(
    hand: &[Card],
    table: &TableLayout,
    tracker: &OpponentTracker,
) -> SmallVec<[CandidateFeatures; 8]> {
    let mut suit_lengths = [0u8; SUITS as usize];
    for card in hand {
        suit_lengths[card.suit() as usize] += 1;
    }
    let longest = suit_lengths.iter().copied().max().unwrap_or(0);
    let blocked = tracker.blocked_opponents().min(u8::MAX as usize) as u8;

    hand.iter()
        .enumerate()
        .filter(|&(_, &card)| table.is_playable(card))
        .map(|(index, &card)| {
            let suit_length = suit_lengths[card.suit() as usize];
            CandidateFeatures {
                index,
                card,
                is_seven: card.is_seven(),
                is_edge: card.is_edge(),
                beside_seven: card.rank() == 6 || card.rank() == 8,
                has_neighbour: holds(hand, card.lower()) || holds(hand, card.higher()),
                edge_combo: (card.rank() == 1 && holds(hand, card.higher()))
                    || (card.rank() == RANKS && holds(hand, card.lower())),
                chain_length: chain_length(card, hand),
                opens_both_ends: opens_both_ends(card, table),
                suit_playability: suit_playability(table, card.suit()),
                suit_length,
                in_longest_suit: suit_length == longest,
                remaining_in_suit: RANKS - table.suit_count(card.suit()) as u8,
                opponent_plays_in_suit: tracker.seen_in_suit(card.suit()),
                opponents_blocked: blocked,
            }
        })
        .collect()
}

/// Length of the same-suit run held in `hand` that passes through `card`.
#[must_use]
pub fn chain_length(card: Card, hand: &[Card]) -> u8 {
    let mut length = 1;

    let mut below = card.lower();
    while let Some(c) = below.filter(|c| hand.contains(c)) {
        length += 1;
        below = c.lower();
    }

    let mut above = card.higher();
    while let Some(c) = above.filter(|c| hand.contains(c)) {
        length += 1;
        above = c.higher();
    }

    length
}

/// Whether placing `card` would make both of its neighbours playable.
///
/// A neighbour becomes playable when it exists and is not already on the
/// table. This hands opponents two new options at once.
#[must_use]
pub fn opens_both_ends(card: Card, table: &TableLayout) -> bool {
    let opens = |neighbour: Option<Card>| neighbour.is_some_and(|c| !table.is_played(c));
    opens(card.lower()) && opens(card.higher())
}

/// How lively a suit is: 0 unopened or stuck, 1 some open ends,
/// 2 three or more open ends or at least 10 cards down.
#[must_use]
pub fn suit_playability(table: &TableLayout, suit: u8) -> u8 {
    if !table.is_suit_open(suit) {
        return 0;
    }
    if table.suit_count(suit) >= 10 {
        return 2;
    }
    match table.open_ends(suit) {
        0 => 0,
        1 | 2 => 1,
        _ => 2,
    }
}

fn holds(hand: &[Card], card: Option<Card>) -> bool {
    card.is_some_and(|c| hand.contains(&c))
}
