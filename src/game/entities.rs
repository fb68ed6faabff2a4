use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
    // Jokers carry their own suit so a full set is exactly
    // 13 ranks x 4 suits + 2 jokers.
    Joker,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Spade => "♠",
            Self::Joker => "🃏",
        };
        write!(f, "{repr}")
    }
}

/// Card ranks of the climbing game. Trick strength does NOT follow the
/// usual poker order: threes are weakest, twos outrank aces, and the two
/// jokers sit on top. The mapping lives in [`Rank::strength`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
    LittleJoker,
    BigJoker,
}

impl Rank {
    /// Every rank once, weakest first.
    pub const ALL: [Self; 15] = [
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
        Self::Two,
        Self::LittleJoker,
        Self::BigJoker,
    ];

    /// Trick-strength table: 3 < 4 < .. < A < 2 < little joker < big joker.
    #[must_use]
    pub const fn strength(self) -> u8 {
        match self {
            Self::Three => 1,
            Self::Four => 2,
            Self::Five => 3,
            Self::Six => 4,
            Self::Seven => 5,
            Self::Eight => 6,
            Self::Nine => 7,
            Self::Ten => 8,
            Self::Jack => 9,
            Self::Queen => 10,
            Self::King => 11,
            Self::Ace => 12,
            Self::Two => 13,
            Self::LittleJoker => 14,
            Self::BigJoker => 15,
        }
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Self::LittleJoker | Self::BigJoker)
    }

    /// Whether the rank may appear inside a run (straight, consecutive
    /// pairs, airplane). Twos and jokers are excluded; a Two may still
    /// terminate a run directly after an Ace.
    #[must_use]
    pub const fn in_run_window(self) -> bool {
        self.strength() <= Self::Ace.strength()
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strength().cmp(&other.strength())
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
            Self::Two => "2",
            Self::LittleJoker => "lj",
            Self::BigJoker => "BJ",
        };
        write!(f, "{repr}")
    }
}

/// An immutable suit/rank pair with value equality. Multi-deck games hold
/// several physically distinct but equal cards; hands track each physical
/// occurrence separately.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.rank.is_joker() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{}{}", self.rank, self.suit)
        }
    }
}

/// One full 54-card set. Consumed entirely at deal time; a shuffled pool
/// for multi-deck games comes from [`card_pool`].
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = Vec::with_capacity(54);
        for rank in &Rank::ALL[..13] {
            for suit in [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade] {
                cards.push(Card::new(suit, *rank));
            }
        }
        cards.push(Card::new(Suit::Joker, Rank::LittleJoker));
        cards.push(Card::new(Suit::Joker, Rank::BigJoker));
        Self { cards }
    }
}

impl Deck {
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Concatenate `deck_count` full sets and shuffle uniformly.
#[must_use]
pub fn card_pool(deck_count: usize) -> Vec<Card> {
    let mut pool = Vec::with_capacity(deck_count * 54);
    for _ in 0..deck_count {
        pool.extend(Deck::default().into_cards());
    }
    pool.shuffle(&mut rand::rng());
    pool
}

/// Sort a hand weakest-first by the strength table, for display and for
/// deterministic hand state after bottom-card merges.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort_by_key(|card| card.rank.strength());
}

/// Opaque player identifier. Seat resolution, names, and accounts live in
/// the calling layer; the engine only sees an ordered list of these.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = self.0.simple().to_string();
        write!(f, "{}", &repr[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_has_54_cards() {
        let deck = Deck::default();
        assert_eq!(deck.len(), 54);
    }

    #[test]
    fn test_deck_has_exactly_two_jokers() {
        let cards = Deck::default().into_cards();
        let jokers = cards.iter().filter(|c| c.rank.is_joker()).count();
        assert_eq!(jokers, 2);
    }

    #[test]
    fn test_card_pool_size_scales_with_deck_count() {
        for n in 1..=4 {
            assert_eq!(card_pool(n).len(), n * 54);
        }
    }

    #[test]
    fn test_strength_table_order() {
        assert!(Rank::Two > Rank::Ace);
        assert!(Rank::LittleJoker > Rank::Two);
        assert!(Rank::BigJoker > Rank::LittleJoker);
        assert!(Rank::Three < Rank::Four);
    }

    #[test]
    fn test_run_window_excludes_twos_and_jokers() {
        assert!(Rank::Ace.in_run_window());
        assert!(!Rank::Two.in_run_window());
        assert!(!Rank::LittleJoker.in_run_window());
        assert!(!Rank::BigJoker.in_run_window());
    }

    #[test]
    fn test_sort_hand_is_weakest_first() {
        let mut hand = vec![
            Card::new(Suit::Joker, Rank::BigJoker),
            Card::new(Suit::Heart, Rank::Three),
            Card::new(Suit::Spade, Rank::Two),
            Card::new(Suit::Club, Rank::Ace),
        ];
        sort_hand(&mut hand);
        let ranks: Vec<Rank> = hand.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Three, Rank::Ace, Rank::Two, Rank::BigJoker]);
    }

    #[test]
    fn test_player_ids_are_unique() {
        let a = PlayerId::new();
        let b = PlayerId::new();
        assert_ne!(a, b);
    }
}
