//! Phase-weighted heuristic scoring.
//!
//! Each turn:
//! 1. classify the phase from a progress signal,
//! 2. extract features for every legal card,
//! 3. score each card with that phase's linear weights,
//! 4. play the highest score, first in hand order on ties; pass if nothing
//!    is legal.
//!
//! Two tunings ship: [`HeuristicStrategy::table_progress`] and
//! [`HeuristicStrategy::hand_pressure`]. The weight values are policy and
//! can be replaced wholesale with [`HeuristicStrategy::with_weights`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Card, Decision, PlayerId};
use crate::table::TableLayout;

use super::features::{extract, CandidateFeatures, Phase, PhaseSignal};
use super::memory::OpponentTracker;
use super::traits::Strategy;

/// Weights for one phase. Every term is `weight * feature` with booleans
/// counting as 0/1; `opens_both_ends` is subtracted. Sums saturate, so
/// extreme configured weights clamp instead of overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseWeights {
    pub seven: i32,
    pub beside_seven: i32,
    pub edge: i32,
    pub edge_combo: i32,
    pub neighbour: i32,
    pub chain_length: i32,
    pub suit_length: i32,
    /// Flat bonus once the suit holds 3+ cards in hand.
    pub deep_suit: i32,
    pub longest_suit: i32,
    pub remaining_in_suit: i32,
    pub suit_playability: i32,
    pub blocked_opponent: i32,
    /// Per card of the suit opponents have played.
    pub contested_suit: i32,
    /// Penalty, always subtracted.
    pub opens_both_ends: i32,
}

impl PhaseWeights {
    #[must_use]
    pub fn score(&self, f: &CandidateFeatures) -> i32 {
        let flag = |b: bool| i32::from(b);

        let terms = [
            (self.seven, flag(f.is_seven)),
            (self.beside_seven, flag(f.beside_seven)),
            (self.edge, flag(f.is_edge)),
            (self.edge_combo, flag(f.edge_combo)),
            (self.neighbour, flag(f.has_neighbour)),
            (self.chain_length, i32::from(f.chain_length)),
            (self.suit_length, i32::from(f.suit_length)),
            (self.deep_suit, flag(f.suit_length >= 3)),
            (self.longest_suit, flag(f.in_longest_suit)),
            (self.remaining_in_suit, i32::from(f.remaining_in_suit)),
            (self.suit_playability, i32::from(f.suit_playability)),
            (self.blocked_opponent, i32::from(f.opponents_blocked)),
            (self.contested_suit, i32::from(f.opponent_plays_in_suit)),
            (-self.opens_both_ends.saturating_abs(), flag(f.opens_both_ends)),
        ];

        terms
            .iter()
            .fold(0i32, |acc, &(weight, value)| {
                acc.saturating_add(weight.saturating_mul(value))
            })
    }
}

/// One weight table per phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub early: PhaseWeights,
    pub mid: PhaseWeights,
    pub late: PhaseWeights,
}

impl HeuristicWeights {
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> &PhaseWeights {
        match phase {
            Phase::Early => &self.early,
            Phase::Mid => &self.mid,
            Phase::Late => &self.late,
        }
    }

    /// Sevens first, then long runs; late game dumps long suits.
    #[must_use]
    pub fn table_progress() -> Self {
        let shared = PhaseWeights {
            seven: 200,
            edge_combo: 80,
            suit_playability: 40,
            blocked_opponent: 30,
            opens_both_ends: 80,
            ..PhaseWeights::default()
        };
        Self {
            early: PhaseWeights {
                seven: 300,
                chain_length: 30,
                neighbour: 70,
                edge: 20,
                ..shared
            },
            mid: PhaseWeights {
                chain_length: 50,
                deep_suit: 60,
                edge: 40,
                ..shared
            },
            late: PhaseWeights {
                suit_length: 50,
                longest_suit: 40,
                remaining_in_suit: 10,
                contested_suit: -5,
                ..shared
            },
        }
    }

    /// Hug the sevens early, avoid giving away runs mid-game, and race to
    /// empty the hand once it is short.
    #[must_use]
    pub fn hand_pressure() -> Self {
        Self {
            early: PhaseWeights {
                seven: 250,
                beside_seven: 120,
                neighbour: 30,
                opens_both_ends: 40,
                ..PhaseWeights::default()
            },
            mid: PhaseWeights {
                seven: 150,
                neighbour: 30,
                chain_length: 15,
                deep_suit: 40,
                suit_playability: 20,
                contested_suit: -10,
                opens_both_ends: 100,
                ..PhaseWeights::default()
            },
            late: PhaseWeights {
                seven: 100,
                neighbour: 30,
                suit_length: 30,
                longest_suit: 60,
                blocked_opponent: 20,
                opens_both_ends: 40,
                ..PhaseWeights::default()
            },
        }
    }
}

/// Feature/weight/phase scorer with opponent memory.
#[derive(Clone, Debug)]
pub struct HeuristicStrategy {
    name: &'static str,
    signal: PhaseSignal,
    weights: HeuristicWeights,
    player: Option<PlayerId>,
    tracker: OpponentTracker,
}

impl HeuristicStrategy {
    pub const TABLE_PROGRESS: &'static str = "Heuristic";
    pub const HAND_PRESSURE: &'static str = "HandPressure";

    /// Phase from cards on the table.
    #[must_use]
    pub fn table_progress() -> Self {
        Self::with_weights(
            Self::TABLE_PROGRESS,
            PhaseSignal::TableProgress,
            HeuristicWeights::table_progress(),
        )
    }

    /// Phase from table progress and own hand size.
    #[must_use]
    pub fn hand_pressure() -> Self {
        Self::with_weights(
            Self::HAND_PRESSURE,
            PhaseSignal::HandPressure,
            HeuristicWeights::hand_pressure(),
        )
    }

    #[must_use]
    pub fn with_weights(name: &'static str, signal: PhaseSignal, weights: HeuristicWeights) -> Self {
        Self {
            name,
            signal,
            weights,
            player: None,
            tracker: OpponentTracker::new(),
        }
    }

    /// What this strategy has observed about opponents.
    #[must_use]
    pub fn tracker(&self) -> &OpponentTracker {
        &self.tracker
    }

    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }

    /// Score every legal card, in hand order.
    pub fn evaluate(&self, hand: &[Card], table: &TableLayout) -> Vec<(CandidateFeatures, i32)> {
        let phase = self.signal.classify(table.played_count(), hand.len());
        let weights = self.weights.for_phase(phase);

        extract(hand, table, &self.tracker)
            .into_iter()
            .map(|f| {
                let score = weights.score(&f);
                trace!(
                    strategy = self.name,
                    card = %f.card,
                    ?phase,
                    chain = f.chain_length,
                    playability = f.suit_playability,
                    risky = f.opens_both_ends,
                    score,
                    "scored candidate"
                );
                (f, score)
            })
            .collect()
    }
}

impl Strategy for HeuristicStrategy {
    fn initialize(&mut self, player: PlayerId) {
        self.player = Some(player);
        self.tracker.reset();
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &TableLayout) -> Decision {
        let mut best: Option<(usize, i32)> = None;
        for (features, score) in self.evaluate(hand, table) {
            // Strict comparison keeps the earliest card on ties.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((features.index, score));
            }
        }

        Decision::from_index(best.map(|(index, _)| index))
    }

    fn observe_move(&mut self, player: PlayerId, card: Card) {
        self.tracker.record_move(player, card);
    }

    fn observe_pass(&mut self, player: PlayerId) {
        self.tracker.record_pass(player);
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seated(mut strategy: HeuristicStrategy) -> HeuristicStrategy {
        strategy.initialize(PlayerId::new(0));
        strategy
    }

    #[test]
    fn test_passes_without_legal_card() {
        let mut strategy = seated(HeuristicStrategy::table_progress());
        let decision =
            strategy.select_card_to_play(&[Card::new(0, 5)], &TableLayout::with_sevens());
        assert_eq!(decision, Decision::Pass);
    }

    #[test]
    fn test_prefers_opening_seven_early() {
        let mut strategy = seated(HeuristicStrategy::table_progress());
        let table = TableLayout::empty();
        let hand = [Card::new(0, 1), Card::new(2, 7)];
        assert_eq!(strategy.select_card_to_play(&hand, &table), Decision::Play(1));
    }

    #[test]
    fn test_prefers_longer_chain() {
        let mut strategy = seated(HeuristicStrategy::table_progress());
        let table = TableLayout::with_sevens();
        let hand = [Card::new(1, 8), Card::new(0, 6), Card::new(0, 5), Card::new(0, 4)];
        assert_eq!(strategy.select_card_to_play(&hand, &table), Decision::Play(1));
    }

    #[test]
    fn test_ties_keep_hand_order() {
        let mut strategy = seated(HeuristicStrategy::table_progress());
        let table = TableLayout::with_sevens();
        let hand = [Card::new(2, 8), Card::new(3, 8)];
        assert_eq!(strategy.select_card_to_play(&hand, &table), Decision::Play(0));
    }

    #[test]
    fn test_risk_term_always_subtracts() {
        let weights = PhaseWeights {
            opens_both_ends: -50,
            ..PhaseWeights::default()
        };
        let table = TableLayout::empty();
        let features = extract(&[Card::new(0, 7)], &table, &OpponentTracker::new());
        assert_eq!(weights.score(&features[0]), -50);
    }

    #[test]
    fn test_extreme_weights_saturate() {
        let table = TableLayout::with_sevens();
        let tracker = OpponentTracker::new();
        let hand = [Card::new(0, 6), Card::new(0, 5), Card::new(0, 4)];
        let features = extract(&hand, &table, &tracker);

        let huge: PhaseWeights = serde_json::from_str(r#"{"chain_length": 2000000000}"#).unwrap();
        assert_eq!(huge.score(&features[0]), i32::MAX);

        let floor = PhaseWeights {
            opens_both_ends: i32::MIN,
            ..PhaseWeights::default()
        };
        let seven = extract(&[Card::new(0, 7)], &TableLayout::empty(), &tracker);
        assert_eq!(floor.score(&seven[0]), -i32::MAX);

        let mut strategy = seated(HeuristicStrategy::with_weights(
            "Huge",
            PhaseSignal::TableProgress,
            HeuristicWeights {
                early: huge,
                mid: huge,
                late: huge,
            },
        ));
        assert_eq!(strategy.select_card_to_play(&hand, &table), Decision::Play(0));
    }

    #[test]
    fn test_contested_suit_lowers_score() {
        let mut table = TableLayout::with_sevens();
        for rank in 8..=13 {
            table.mark_played(Card::new(0, rank));
            table.mark_played(Card::new(1, rank));
        }
        // Five cards on a 16-card table is mid game for hand pressure.
        let hand = [
            Card::new(2, 6),
            Card::new(3, 1),
            Card::new(3, 2),
            Card::new(3, 3),
            Card::new(3, 4),
        ];

        let mut strategy = seated(HeuristicStrategy::hand_pressure());
        let before = strategy.evaluate(&hand, &table)[0].1;

        strategy.observe_move(PlayerId::new(1), Card::new(2, 8));
        strategy.observe_move(PlayerId::new(2), Card::new(2, 9));
        let after = strategy.evaluate(&hand, &table)[0].1;

        assert_eq!(before - after, 20);
    }

    #[test]
    fn test_blocked_opponents_raise_scores() {
        let table = TableLayout::with_sevens();
        let hand = [Card::new(0, 6)];

        let mut strategy = seated(HeuristicStrategy::table_progress());
        let before = strategy.evaluate(&hand, &table)[0].1;

        strategy.observe_pass(PlayerId::new(1));
        strategy.observe_pass(PlayerId::new(1));
        let after = strategy.evaluate(&hand, &table)[0].1;

        assert_eq!(after - before, 30);
    }

    #[test]
    fn test_initialize_resets_memory() {
        let mut strategy = seated(HeuristicStrategy::hand_pressure());
        strategy.observe_pass(PlayerId::new(1));
        strategy.observe_pass(PlayerId::new(1));
        assert_eq!(strategy.tracker().blocked_opponents(), 1);

        strategy.initialize(PlayerId::new(2));
        assert_eq!(strategy.tracker().blocked_opponents(), 0);
        assert_eq!(strategy.player(), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_weights_deserialize_with_defaults() {
        let weights: PhaseWeights = serde_json::from_str(r#"{"seven": 10}"#).unwrap();
        assert_eq!(weights.seven, 10);
        assert_eq!(weights.chain_length, 0);
    }
}
