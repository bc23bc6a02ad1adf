//! Card value type.
//!
//! A card is a `(suit, rank)` pair with suits `0..4` and ranks `1..=13`.
//! Every combination exists exactly once in a game.

use serde::{Deserialize, Serialize};

use super::error::InvalidCard;

/// Number of suits in the deck.
pub const SUITS: u8 = 4;

/// Number of ranks per suit.
pub const RANKS: u8 = 13;

/// Total number of distinct cards.
pub const DECK_SIZE: usize = (SUITS as usize) * (RANKS as usize);

/// The rank every suit opens on.
pub const SEVEN: u8 = 7;

/// An immutable playing card.
///
/// Ordering is by suit, then rank. Out-of-range values cannot be built,
/// deserialized included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    suit: u8,
    rank: u8,
}

#[derive(Deserialize)]
struct RawCard {
    suit: u8,
    rank: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = InvalidCard;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::try_new(raw.suit, raw.rank).ok_or(InvalidCard {
            suit: raw.suit,
            rank: raw.rank,
        })
    }
}

impl Card {
    /// Create a card, panicking on an out-of-range suit or rank.
    ///
    /// ```
    /// use sevens_engine::core::Card;
    ///
    /// let card = Card::new(2, 7);
    /// assert!(card.is_seven());
    /// ```
    #[must_use]
    pub fn new(suit: u8, rank: u8) -> Self {
        assert!(suit < SUITS, "Suit must be in 0..{SUITS}, got {suit}");
        assert!((1..=RANKS).contains(&rank), "Rank must be in 1..={RANKS}, got {rank}");
        Self { suit, rank }
    }

    /// Create a card, returning `None` for an out-of-range suit or rank.
    #[must_use]
    pub fn try_new(suit: u8, rank: u8) -> Option<Self> {
        (suit < SUITS && (1..=RANKS).contains(&rank)).then_some(Self { suit, rank })
    }

    #[must_use]
    pub const fn suit(self) -> u8 {
        self.suit
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn is_seven(self) -> bool {
        self.rank == SEVEN
    }

    /// Ace or king: the two ends of a suit's run.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        self.rank == 1 || self.rank == RANKS
    }

    /// The card one rank below in the same suit, if any.
    #[must_use]
    pub fn lower(self) -> Option<Self> {
        Self::try_new(self.suit, self.rank.wrapping_sub(1))
    }

    /// The card one rank above in the same suit, if any.
    #[must_use]
    pub fn higher(self) -> Option<Self> {
        Self::try_new(self.suit, self.rank + 1)
    }

    /// Dense index in `0..DECK_SIZE`.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.suit as usize) * (RANKS as usize) + (self.rank as usize - 1)
    }

    /// Iterate over all 52 cards, suit-major.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..SUITS).flat_map(|suit| (1..=RANKS).map(move |rank| Card { suit, rank }))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.suit, self.rank)
    }
}
