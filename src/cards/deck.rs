//! Deck construction and dealing.

use crate::core::{Card, GameRng, TableOpening};

use super::hand::Hand;

/// An ordered sequence of distinct cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The full 52-card deck, suit-major, unshuffled.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }

    /// The cards that go into players' hands for a given opening.
    ///
    /// With pre-played sevens those four cards start on the table, so they
    /// are left out of the deal.
    #[must_use]
    pub fn for_opening(opening: TableOpening) -> Self {
        let mut deck = Self::standard();
        if opening == TableOpening::SevensPrePlayed {
            deck.cards.retain(|card| !card.is_seven());
        }
        deck
    }

    /// Shuffle with the caller's generator.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal round-robin: card `i` goes to player `i % player_count`.
    pub fn deal(self, player_count: usize) -> Vec<Hand> {
        assert!(player_count > 0, "Must deal to at least 1 player");

        let mut hands = vec![Hand::default(); player_count];
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[i % player_count].push(card);
        }
        hands
    }
}
