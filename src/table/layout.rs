//! Shared table layout and the adjacency rule.
//!
//! One 13-bit mask per suit; bit `rank - 1` is set once that card has been
//! played. Bits are only ever set, never cleared.

use serde::{Deserialize, Serialize};

use crate::core::{Card, TableError, TableOpening, RANKS, SEVEN, SUITS};

const FULL_SUIT: u16 = (1 << RANKS) - 1;

/// Which cards have reached the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableLayout {
    masks: [u16; SUITS as usize],
}

impl TableLayout {
    /// A table with nothing played.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table with all four 7s played.
    #[must_use]
    pub fn with_sevens() -> Self {
        let mut table = Self::empty();
        for suit in 0..SUITS {
            table.set(Card::new(suit, SEVEN));
        }
        table
    }

    #[must_use]
    pub fn for_opening(opening: TableOpening) -> Self {
        match opening {
            TableOpening::SevensPrePlayed => Self::with_sevens(),
            TableOpening::Empty => Self::empty(),
        }
    }

    #[must_use]
    pub fn is_played(&self, card: Card) -> bool {
        self.masks[card.suit() as usize] & bit(card.rank()) != 0
    }

    /// Adjacency rule: an unplayed card is playable if it is its suit's 7,
    /// or if a same-suit neighbour is already on the table.
    #[must_use]
    pub fn is_playable(&self, card: Card) -> bool {
        if self.is_played(card) {
            return false;
        }
        card.is_seven()
            || card.lower().is_some_and(|c| self.is_played(c))
            || card.higher().is_some_and(|c| self.is_played(c))
    }

    /// Place a card, rejecting anything the adjacency rule forbids.
    pub fn try_mark_played(&mut self, card: Card) -> Result<(), TableError> {
        if self.is_played(card) {
            return Err(TableError::AlreadyPlayed(card));
        }
        if !self.is_playable(card) {
            return Err(TableError::NotAdjacent(card));
        }
        self.set(card);
        Ok(())
    }

    /// Place a card that the caller has already checked with `is_playable`.
    ///
    /// Panics if the card is not playable: that is a broken engine invariant,
    /// not a recoverable condition.
    pub fn mark_played(&mut self, card: Card) {
        if let Err(err) = self.try_mark_played(card) {
            panic!("table invariant violated: {err}");
        }
    }

    /// Raw mask for a suit (bit `rank - 1` set when played).
    #[must_use]
    pub fn suit_mask(&self, suit: u8) -> u16 {
        self.masks[suit as usize]
    }

    /// Ranks of a suit currently on the table, ascending.
    pub fn played_ranks(&self, suit: u8) -> impl Iterator<Item = u8> + '_ {
        (1..=RANKS).filter(move |&rank| self.masks[suit as usize] & bit(rank) != 0)
    }

    /// Number of cards of `suit` on the table.
    #[must_use]
    pub fn suit_count(&self, suit: u8) -> usize {
        self.masks[suit as usize].count_ones() as usize
    }

    /// Total number of cards on the table.
    #[must_use]
    pub fn played_count(&self) -> usize {
        self.masks.iter().map(|m| m.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_suit_open(&self, suit: u8) -> bool {
        self.masks[suit as usize] != 0
    }

    #[must_use]
    pub fn is_suit_complete(&self, suit: u8) -> bool {
        self.masks[suit as usize] == FULL_SUIT
    }

    /// Played cards of `suit` with at least one in-range unplayed neighbour.
    #[must_use]
    pub fn open_ends(&self, suit: u8) -> usize {
        self.played_ranks(suit)
            .filter(|&rank| {
                let card = Card::new(suit, rank);
                card.lower().is_some_and(|c| !self.is_played(c))
                    || card.higher().is_some_and(|c| !self.is_played(c))
            })
            .count()
    }

    /// Every card that could be played right now, suit-major.
    pub fn playable_cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::all().filter(move |&card| self.is_playable(card))
    }

    fn set(&mut self, card: Card) {
        self.masks[card.suit() as usize] |= bit(card.rank());
    }
}

fn bit(rank: u8) -> u16 {
    1 << (rank - 1)
}

impl std::fmt::Display for TableLayout {
    /// One line per suit: played ranks as numbers, unplayed as `.`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for suit in 0..SUITS {
            write!(f, "Suit {suit}:")?;
            for rank in 1..=RANKS {
                if self.is_played(Card::new(suit, rank)) {
                    write!(f, " {rank}")?;
                } else {
                    write!(f, " .")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
