//! A player's private hand.

use serde::{Deserialize, Serialize};

use crate::core::Card;

/// Cards held by one player, in the order they were dealt.
///
/// Hands only shrink: the engine removes the card a strategy plays and
/// never adds one after the deal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Read-only view in dealt order.
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

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Remove and return the card at `index`, keeping the rest in order.
    pub fn remove(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_preserves_order() {
        let mut hand = Hand::new(vec![Card::new(0, 1), Card::new(1, 2), Card::new(2, 3)]);
        assert_eq!(hand.remove(1), Some(Card::new(1, 2)));
        assert_eq!(hand.cards(), &[Card::new(0, 1), Card::new(2, 3)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut hand = Hand::new(vec![Card::new(0, 1)]);
        assert_eq!(hand.remove(1), None);
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_display() {
        let hand = Hand::new(vec![Card::new(0, 6), Card::new(3, 13)]);
        assert_eq!(hand.to_string(), "(0, 6) (3, 13)");
    }
}
