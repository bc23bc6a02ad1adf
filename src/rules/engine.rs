//! Turn scheduler.
//!
//! One round visits every unfinished player in seat order. Each visit asks
//! the player's strategy for a decision, validates it against the table and
//! either plays the card or records a pass. Every outcome is broadcast to the
//! other players' strategies.
//!
//! ```text
//! Running --round with a play--> Running
//! Running --round without plays--> Stalled --settle--> Finished
//! Running --last hand emptied--> Finished
//! ```
//!
//! Termination: every round that does not stall places at least one card,
//! and there are finitely many cards.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::cards::{Deck, Hand};
use crate::core::{
    Card, Decision, EngineError, GameConfig, GameRng, IllegalMove, PassReason, PlayerId,
    PlayerMap, TurnOutcome, TurnRecord,
};
use crate::strategy::{first_legal, Strategy};
use crate::table::TableLayout;

use super::result::GameResult;

/// Engine lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    Running,
    /// A full round passed without a single play. Remaining players are
    /// ranked on the next step.
    Stalled,
    Finished,
}

/// Everything the engine tracks for one seat.
pub struct PlayerState {
    id: PlayerId,
    hand: Hand,
    strategy: Option<Box<dyn Strategy>>,
    consecutive_passes: u32,
    finished_at: Option<u32>,
}

impl PlayerState {
    fn new(id: PlayerId, hand: Hand) -> Self {
        Self {
            id,
            hand,
            strategy: None,
            consecutive_passes: 0,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    /// Finish position, once assigned.
    #[must_use]
    pub fn finished_at(&self) -> Option<u32> {
        self.finished_at
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Name of the registered strategy, if any.
    #[must_use]
    pub fn strategy_name(&self) -> Option<&str> {
        self.strategy.as_deref().map(|s| s.name())
    }
}

impl std::fmt::Debug for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerState")
            .field("id", &self.id)
            .field("hand", &self.hand)
            .field("strategy", &self.strategy_name())
            .field("consecutive_passes", &self.consecutive_passes)
            .field("finished_at", &self.finished_at)
            .finish()
    }
}

/// Owns the table, every hand and every strategy for a single game.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    table: TableLayout,
    players: PlayerMap<PlayerState>,
    status: EngineStatus,
    started: bool,
    stalled: bool,
    round: u32,
    next_position: u32,
    total_cards: usize,
    history: Vec<TurnRecord>,
    result: Option<GameResult>,
}

impl GameEngine {
    /// Shuffle and deal a fresh game from `config`.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        if !config.is_valid_player_count() {
            return Err(EngineError::InvalidPlayerCount(config.player_count));
        }

        let mut deck = Deck::for_opening(config.opening);
        deck.shuffle(&mut GameRng::new(config.seed).for_context("deck"));
        let hands = deck.deal(config.player_count);

        let table = TableLayout::for_opening(config.opening);
        Ok(Self::assemble(config, table, hands))
    }

    /// Start from explicit hands instead of a shuffled deal.
    ///
    /// The hands need not cover the whole deck, but no card may appear twice
    /// or already be on the opening table.
    pub fn with_hands(config: GameConfig, hands: Vec<Hand>) -> Result<Self, EngineError> {
        let config = config.with_player_count(hands.len());
        if !config.is_valid_player_count() {
            return Err(EngineError::InvalidPlayerCount(config.player_count));
        }

        let table = TableLayout::for_opening(config.opening);
        let mut seen = FxHashSet::default();
        for card in hands.iter().flat_map(|h| h.cards().iter().copied()) {
            if table.is_played(card) {
                return Err(EngineError::InvalidDeal(format!(
                    "{card} is dealt but already on the table"
                )));
            }
            if !seen.insert(card) {
                return Err(EngineError::InvalidDeal(format!("{card} is dealt twice")));
            }
        }

        Ok(Self::assemble(config, table, hands))
    }

    fn assemble(config: GameConfig, table: TableLayout, hands: Vec<Hand>) -> Self {
        let total_cards = table.played_count() + hands.iter().map(Hand::len).sum::<usize>();
        let players = PlayerMap::from_vec(
            PlayerId::all(hands.len())
                .zip(hands)
                .map(|(id, hand)| PlayerState::new(id, hand))
                .collect(),
        );

        Self {
            config,
            table,
            players,
            status: EngineStatus::Running,
            started: false,
            stalled: false,
            round: 0,
            next_position: 1,
            total_cards,
            history: Vec::new(),
            result: None,
        }
    }

    /// Seat a strategy. Players without one play their first legal card.
    pub fn register_strategy(
        &mut self,
        player: PlayerId,
        strategy: Box<dyn Strategy>,
    ) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        let state = self
            .players
            .get_mut(player)
            .ok_or(EngineError::UnknownPlayer(player))?;

        info!(%player, strategy = strategy.name(), "registered strategy");
        state.strategy = Some(strategy);
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &TableLayout {
        &self.table
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Rounds started so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.values()
    }

    /// Every turn taken so far, in order.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Cards in hands plus cards on the table. Constant for a game.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.table.played_count() + self.players.values().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Final standings, once the game has finished.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Play rounds until the game finishes.
    pub fn run(&mut self) -> GameResult {
        while self.status != EngineStatus::Finished {
            self.play_round();
        }
        self.result.clone().unwrap_or_else(|| self.settle())
    }

    /// Advance by one round (or settle a stalled game).
    pub fn play_round(&mut self) -> EngineStatus {
        match self.status {
            EngineStatus::Finished => return self.status,
            EngineStatus::Stalled => {
                self.settle();
                return self.status;
            }
            EngineStatus::Running => {}
        }

        self.start();
        self.round += 1;

        let mut plays = 0;
        for player in self.players.player_ids().collect::<Vec<_>>() {
            if self.players[player].is_finished() {
                continue;
            }
            if self.take_turn(player) {
                plays += 1;
            }
        }

        if self.players.values().all(PlayerState::is_finished) {
            self.settle();
        } else if plays == 0 {
            info!(round = self.round, "no plays this round, game stalled");
            self.stalled = true;
            self.status = EngineStatus::Stalled;
        }
        self.status
    }

    fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        for (player, state) in self.players.iter_mut() {
            debug!(%player, hand = %state.hand, "initial hand");
            if let Some(strategy) = state.strategy.as_mut() {
                strategy.initialize(player);
            }
        }
        // Nothing to play with: done before the first turn.
        for (player, state) in self.players.iter_mut() {
            if state.hand.is_empty() {
                state.finished_at = Some(self.next_position);
                info!(%player, position = self.next_position, "finished");
                self.next_position += 1;
            }
        }
    }

    /// Run one player's turn. Returns whether a card was played.
    fn take_turn(&mut self, player: PlayerId) -> bool {
        let state = &mut self.players[player];
        let decision = match state.strategy.as_mut() {
            Some(strategy) => strategy.select_card_to_play(state.hand.cards(), &self.table),
            None => first_legal(state.hand.cards(), &self.table),
        };

        let outcome = match validate(decision, &state.hand, &self.table) {
            Ok((index, card)) => {
                state.hand.remove(index);
                self.table.mark_played(card);
                state.consecutive_passes = 0;
                debug!(round = self.round, %player, %card, "played");

                if state.hand.is_empty() {
                    state.finished_at = Some(self.next_position);
                    info!(%player, position = self.next_position, "finished");
                    self.next_position += 1;
                }
                TurnOutcome::Played(card)
            }
            Err(reason) => {
                state.consecutive_passes += 1;
                debug!(
                    round = self.round,
                    %player,
                    passes = state.consecutive_passes,
                    ?reason,
                    "passed"
                );
                TurnOutcome::Passed(reason)
            }
        };

        debug_assert_eq!(self.cards_in_play(), self.total_cards);

        self.history.push(TurnRecord {
            round: self.round,
            player,
            outcome,
        });
        self.broadcast(player, outcome);

        matches!(outcome, TurnOutcome::Played(_))
    }

    /// Tell every other player's strategy what `actor` did.
    fn broadcast(&mut self, actor: PlayerId, outcome: TurnOutcome) {
        for (player, state) in self.players.iter_mut() {
            if player == actor {
                continue;
            }
            let Some(strategy) = state.strategy.as_mut() else {
                continue;
            };
            match outcome {
                TurnOutcome::Played(card) => strategy.observe_move(actor, card),
                TurnOutcome::Passed(_) => strategy.observe_pass(actor),
            }
        }
    }

    /// Rank unfinished players in seat order and close the game.
    fn settle(&mut self) -> GameResult {
        let mut next = self.next_position;
        let positions: Vec<u32> = self
            .players
            .iter_mut()
            .map(|(player, state)| {
                *state.finished_at.get_or_insert_with(|| {
                    info!(%player, position = next, "ranked without finishing");
                    next += 1;
                    next - 1
                })
            })
            .collect();
        self.next_position = next;
        self.status = EngineStatus::Finished;

        let result = GameResult::new(PlayerMap::from_vec(positions), self.stalled, self.round);
        info!(rounds = self.round, stalled = self.stalled, "game finished");
        self.result = Some(result.clone());
        result
    }
}

/// Check a decision against the hand and table.
///
/// Illegal indices are logged and turned into passes; a strategy can never
/// corrupt the table.
fn validate(
    decision: Decision,
    hand: &Hand,
    table: &TableLayout,
) -> Result<(usize, Card), PassReason> {
    let index = match decision {
        Decision::Pass => return Err(PassReason::Declined),
        Decision::Play(index) => index,
    };

    let illegal = match hand.get(index) {
        Some(card) if table.is_playable(card) => return Ok((index, card)),
        Some(card) => IllegalMove::NotPlayable { card },
        None => IllegalMove::OutOfRange {
            index,
            hand_len: hand.len(),
        },
    };

    warn!(error = %illegal, "illegal move treated as pass");
    Err(match illegal {
        IllegalMove::OutOfRange { index, .. } => PassReason::OutOfRange { index },
        IllegalMove::NotPlayable { card } => PassReason::NotPlayable { card },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TableOpening, DECK_SIZE};
    use crate::strategy::{GreedyFirstFit, RandomStrategy};

    /// Always asks for the same index.
    struct Stubborn(usize);

    impl Strategy for Stubborn {
        fn initialize(&mut self, _player: PlayerId) {}

        fn select_card_to_play(&mut self, _hand: &[Card], _table: &TableLayout) -> Decision {
            Decision::Play(self.0)
        }

        fn observe_move(&mut self, _player: PlayerId, _card: Card) {}

        fn observe_pass(&mut self, _player: PlayerId) {}

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    fn hands(cards: &[&[(u8, u8)]]) -> Vec<Hand> {
        cards
            .iter()
            .map(|h| Hand::new(h.iter().map(|&(s, r)| Card::new(s, r)).collect()))
            .collect()
    }

    #[test]
    fn test_new_deals_all_cards() {
        let engine = GameEngine::new(GameConfig::new(4, 42)).unwrap();
        assert_eq!(engine.player_count(), 4);
        assert_eq!(engine.cards_in_play(), DECK_SIZE);
        assert!(engine.players().all(|p| p.hand().len() == 12));
    }

    #[test]
    fn test_new_rejects_bad_player_count() {
        assert_eq!(
            GameEngine::new(GameConfig::new(0, 1)).unwrap_err(),
            EngineError::InvalidPlayerCount(0)
        );
        assert_eq!(
            GameEngine::new(GameConfig::new(53, 1)).unwrap_err(),
            EngineError::InvalidPlayerCount(53)
        );
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = GameEngine::new(GameConfig::new(3, 7)).unwrap();
        let b = GameEngine::new(GameConfig::new(3, 7)).unwrap();
        for player in PlayerId::all(3) {
            assert_eq!(a.player(player).unwrap().hand(), b.player(player).unwrap().hand());
        }
    }

    #[test]
    fn test_with_hands_rejects_duplicates_and_table_cards() {
        let config = GameConfig::default();
        let dup = hands(&[&[(0, 6)], &[(0, 6)]]);
        assert!(matches!(
            GameEngine::with_hands(config.clone(), dup),
            Err(EngineError::InvalidDeal(_))
        ));

        let on_table = hands(&[&[(0, 7)]]);
        assert!(matches!(
            GameEngine::with_hands(config, on_table),
            Err(EngineError::InvalidDeal(_))
        ));
    }

    #[test]
    fn test_register_unknown_player() {
        let mut engine = GameEngine::new(GameConfig::new(2, 1)).unwrap();
        let err = engine
            .register_strategy(PlayerId::new(5), Box::new(GreedyFirstFit))
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownPlayer(PlayerId::new(5)));
    }

    #[test]
    fn test_register_after_start_rejected() {
        let mut engine = GameEngine::new(GameConfig::new(2, 1)).unwrap();
        engine.play_round();
        assert_eq!(
            engine
                .register_strategy(PlayerId::new(0), Box::new(GreedyFirstFit))
                .unwrap_err(),
            EngineError::AlreadyStarted
        );
    }

    #[test]
    fn test_out_of_range_index_is_pass() {
        let mut engine =
            GameEngine::with_hands(GameConfig::default(), hands(&[&[(0, 6), (0, 5)]])).unwrap();
        engine.register_strategy(PlayerId::new(0), Box::new(Stubborn(9))).unwrap();

        engine.play_round();
        let record = &engine.history()[0];
        assert_eq!(record.outcome, TurnOutcome::Passed(PassReason::OutOfRange { index: 9 }));
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().consecutive_passes(), 1);
        assert_eq!(engine.table().played_count(), 4);
    }

    #[test]
    fn test_unplayable_index_is_pass_and_stalls() {
        let mut engine =
            GameEngine::with_hands(GameConfig::default(), hands(&[&[(0, 6), (0, 5)]])).unwrap();
        engine.register_strategy(PlayerId::new(0), Box::new(Stubborn(1))).unwrap();

        assert_eq!(engine.play_round(), EngineStatus::Stalled);
        assert_eq!(
            engine.history()[0].outcome,
            TurnOutcome::Passed(PassReason::NotPlayable { card: Card::new(0, 5) })
        );

        assert_eq!(engine.play_round(), EngineStatus::Finished);
        let result = engine.result().unwrap();
        assert!(result.stalled);
        assert_eq!(result.position(PlayerId::new(0)), Some(1));
    }

    #[test]
    fn test_fallback_without_strategy_finishes() {
        let mut engine =
            GameEngine::with_hands(GameConfig::default(), hands(&[&[(0, 5), (0, 6)]])).unwrap();
        let result = engine.run();

        assert!(!result.stalled);
        assert_eq!(result.rounds, 2);
        assert_eq!(
            engine.history().iter().filter_map(TurnRecord::played).collect::<Vec<_>>(),
            vec![Card::new(0, 6), Card::new(0, 5)]
        );
    }

    #[test]
    fn test_empty_hand_finishes_before_first_turn() {
        let mut engine = GameEngine::with_hands(
            GameConfig::default(),
            hands(&[&[(1, 8)], &[]]),
        )
        .unwrap();
        let result = engine.run();
        assert_eq!(result.position(PlayerId::new(1)), Some(1));
        assert_eq!(result.position(PlayerId::new(0)), Some(2));
        assert!(engine.history().iter().all(|r| r.player == PlayerId::new(0)));
    }

    #[test]
    fn test_full_random_game_conserves_cards() {
        let config = GameConfig::new(4, 2024).with_opening(TableOpening::Empty);
        let mut engine = GameEngine::new(config).unwrap();
        for player in PlayerId::all(4) {
            engine
                .register_strategy(player, Box::new(RandomStrategy::new(player.0 as u64)))
                .unwrap();
        }

        let result = engine.run();
        assert_eq!(engine.cards_in_play(), DECK_SIZE);
        let mut positions: Vec<_> = result.iter().map(|(_, pos)| pos).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3, 4]);
        assert_eq!(engine.play_round(), EngineStatus::Finished);
    }
}
