//! Combination detection: classifying a raw pile of cards into one of the
//! canonical playable shapes.
//!
//! Detection walks an ordered list of shape matchers from most specific to
//! least specific and keeps the first match. The ordering is load-bearing:
//! a rocket must win over the two-card pair rule, and a bomb with kickers
//! must win over the plain bomb rule. See [`MATCHERS`].

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use super::entities::{Card, Rank, sort_hand};

/// Canonical set of playable combinations.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ComboType {
    Single,
    Pair,
    Triple,
    TripleWithSingle,
    TripleWithPair,
    /// Five or more consecutive singles.
    Straight,
    /// Three or more consecutive pairs.
    ConsecutivePairs,
    /// Two or more consecutive triples.
    Airplane,
    AirplaneWithSingles,
    AirplaneWithPairs,
    /// Four or more of one rank. Multi-deck games produce oversized bombs.
    Bomb,
    BombWithSingles,
    BombWithPairs,
    /// Both jokers together. Beats everything.
    Rocket,
}

impl ComboType {
    /// Bomb-family shapes may be thrown on any non-rocket lead.
    #[must_use]
    pub const fn is_bomb_family(self) -> bool {
        matches!(self, Self::Bomb | Self::BombWithSingles | Self::BombWithPairs)
    }

    /// Shapes whose kickers are single cards; forbidden at large tables.
    #[must_use]
    pub const fn has_single_kickers(self) -> bool {
        matches!(
            self,
            Self::TripleWithSingle | Self::AirplaneWithSingles | Self::BombWithSingles
        )
    }
}

impl fmt::Display for ComboType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Single => "single",
            Self::Pair => "pair",
            Self::Triple => "triple",
            Self::TripleWithSingle => "triple+single",
            Self::TripleWithPair => "triple+pair",
            Self::Straight => "straight",
            Self::ConsecutivePairs => "consecutive pairs",
            Self::Airplane => "airplane",
            Self::AirplaneWithSingles => "airplane+singles",
            Self::AirplaneWithPairs => "airplane+pairs",
            Self::Bomb => "bomb",
            Self::BombWithSingles => "bomb+singles",
            Self::BombWithPairs => "bomb+pairs",
            Self::Rocket => "rocket",
        };
        write!(f, "{repr}")
    }
}

/// A normalized, already-validated play. Only [`detect`] builds these, so
/// holding one is proof the cards form the claimed shape.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayedHand {
    combo: ComboType,
    cards: Vec<Card>,
}

impl PlayedHand {
    #[must_use]
    pub const fn combo(&self) -> ComboType {
        self.combo
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// The rank that decides comparisons: the bomb rank for bomb-family
    /// shapes, the (highest) main-unit rank for kicker shapes, and the
    /// highest rank present otherwise. Kickers never contribute.
    #[must_use]
    pub fn primary_rank(&self) -> Rank {
        let counts = rank_counts(&self.cards);
        match self.combo {
            ComboType::Rocket => Rank::BigJoker,
            ComboType::Bomb | ComboType::BombWithSingles | ComboType::BombWithPairs => {
                bomb_ranks(&counts)[0]
            }
            ComboType::TripleWithSingle
            | ComboType::TripleWithPair
            | ComboType::AirplaneWithSingles
            | ComboType::AirplaneWithPairs => ranks_with_count(&counts, 3)
                .last()
                .copied()
                .unwrap_or(Rank::Three),
            _ => self.cards.iter().map(|c| c.rank).max().unwrap_or(Rank::Three),
        }
    }

    /// Physical size of the bomb unit, for bomb-family shapes only.
    #[must_use]
    pub fn bomb_size(&self) -> Option<usize> {
        if !self.combo.is_bomb_family() {
            return None;
        }
        let counts = rank_counts(&self.cards);
        let rank = bomb_ranks(&counts)[0];
        counts.get(&rank).copied()
    }
}

impl fmt::Display for PlayedHand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [", self.combo)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}

/// Classify an unordered pile of cards, or reject it. Pure: the same
/// multiset always classifies the same way. The returned hand carries the
/// cards sorted weakest-first.
#[must_use]
pub fn detect(cards: &[Card]) -> Option<PlayedHand> {
    if cards.is_empty() {
        return None;
    }
    let counts = rank_counts(cards);
    let combo = MATCHERS
        .iter()
        .find_map(|matcher| matcher(cards.len(), &counts))?;
    let mut cards = cards.to_vec();
    sort_hand(&mut cards);
    Some(PlayedHand { combo, cards })
}

type RankCounts = BTreeMap<Rank, usize>;

/// First-match-wins chain, most specific shape first. Reordering entries
/// changes detection semantics.
const MATCHERS: &[fn(usize, &RankCounts) -> Option<ComboType>] = &[
    rocket,
    bomb_with_pairs,
    bomb_with_singles,
    bomb,
    airplane_with_pairs,
    airplane_with_singles,
    airplane,
    triple_with_pair,
    triple_with_single,
    consecutive_pairs,
    straight,
    triple,
    pair,
    single,
];

fn rank_counts(cards: &[Card]) -> RankCounts {
    let mut counts = RankCounts::new();
    for card in cards {
        *counts.entry(card.rank).or_insert(0) += 1;
    }
    counts
}

fn ranks_with_count(counts: &RankCounts, n: usize) -> Vec<Rank> {
    counts
        .iter()
        .filter(|&(_, &count)| count == n)
        .map(|(&rank, _)| rank)
        .collect()
}

/// Non-joker ranks held four or more times.
fn bomb_ranks(counts: &RankCounts) -> Vec<Rank> {
    counts
        .iter()
        .filter(|&(rank, &count)| count >= 4 && !rank.is_joker())
        .map(|(&rank, _)| rank)
        .collect()
}

/// A legal run: strictly consecutive by the strength table, jokers never,
/// Two only as a terminal card directly after an Ace. Ace and Two are
/// adjacent in the table, so the terminal case falls out of the
/// consecutiveness check once the window rule admits a trailing Two.
fn is_run(ranks: &[Rank]) -> bool {
    let Some((&last, rest)) = ranks.split_last() else {
        return false;
    };
    if rest.iter().any(|rank| !rank.in_run_window()) {
        return false;
    }
    if !last.in_run_window() && last != Rank::Two {
        return false;
    }
    ranks
        .windows(2)
        .all(|pair| pair[1].strength() == pair[0].strength() + 1)
}

fn single(len: usize, _counts: &RankCounts) -> Option<ComboType> {
    (len == 1).then_some(ComboType::Single)
}

fn pair(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len != 2 || counts.len() != 1 {
        return None;
    }
    let (&rank, _) = counts.iter().next()?;
    (!rank.is_joker()).then_some(ComboType::Pair)
}

fn triple(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len != 3 || counts.len() != 1 {
        return None;
    }
    let (&rank, _) = counts.iter().next()?;
    (!rank.is_joker()).then_some(ComboType::Triple)
}

fn rocket(len: usize, counts: &RankCounts) -> Option<ComboType> {
    (len == 2
        && counts.contains_key(&Rank::LittleJoker)
        && counts.contains_key(&Rank::BigJoker))
    .then_some(ComboType::Rocket)
}

fn bomb(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len < 4 || counts.len() != 1 {
        return None;
    }
    let (&rank, _) = counts.iter().next()?;
    (!rank.is_joker()).then_some(ComboType::Bomb)
}

fn bomb_with_singles(len: usize, counts: &RankCounts) -> Option<ComboType> {
    let bombs = bomb_ranks(counts);
    let [bomb_rank] = bombs[..] else { return None };
    let kickers = ranks_with_count(counts, 1);
    (kickers.len() == 2 && len == counts[&bomb_rank] + 2).then_some(ComboType::BombWithSingles)
}

fn bomb_with_pairs(len: usize, counts: &RankCounts) -> Option<ComboType> {
    let bombs = bomb_ranks(counts);
    let [bomb_rank] = bombs[..] else { return None };
    let kickers = ranks_with_count(counts, 2);
    (kickers.len() == 2 && len == counts[&bomb_rank] + 4).then_some(ComboType::BombWithPairs)
}

fn straight(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len < 5 || counts.len() != len {
        return None;
    }
    let ranks: Vec<Rank> = counts.keys().copied().collect();
    is_run(&ranks).then_some(ComboType::Straight)
}

fn consecutive_pairs(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len < 6 || counts.len() < 3 || len != counts.len() * 2 {
        return None;
    }
    if counts.values().any(|&count| count != 2) {
        return None;
    }
    let ranks: Vec<Rank> = counts.keys().copied().collect();
    is_run(&ranks).then_some(ComboType::ConsecutivePairs)
}

fn airplane(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len < 6 || counts.len() < 2 || len != counts.len() * 3 {
        return None;
    }
    if counts.values().any(|&count| count != 3) {
        return None;
    }
    let ranks: Vec<Rank> = counts.keys().copied().collect();
    is_run(&ranks).then_some(ComboType::Airplane)
}

// Kicker shapes must partition exactly: N consecutive main triples plus N
// kicker units and nothing else, kicker ranks disjoint from the mains.

fn triple_with_single(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len != 4 || counts.len() != 2 {
        return None;
    }
    let mains = ranks_with_count(counts, 3);
    let [main] = mains[..] else { return None };
    (!main.is_joker() && ranks_with_count(counts, 1).len() == 1)
        .then_some(ComboType::TripleWithSingle)
}

fn triple_with_pair(len: usize, counts: &RankCounts) -> Option<ComboType> {
    if len != 5 || counts.len() != 2 {
        return None;
    }
    let mains = ranks_with_count(counts, 3);
    let [main] = mains[..] else { return None };
    (!main.is_joker() && ranks_with_count(counts, 2).len() == 1)
        .then_some(ComboType::TripleWithPair)
}

fn airplane_with_singles(len: usize, counts: &RankCounts) -> Option<ComboType> {
    let mains = ranks_with_count(counts, 3);
    if mains.len() < 2 || !is_run(&mains) {
        return None;
    }
    let kickers = ranks_with_count(counts, 1);
    (kickers.len() == mains.len() && len == mains.len() * 4)
        .then_some(ComboType::AirplaneWithSingles)
}

fn airplane_with_pairs(len: usize, counts: &RankCounts) -> Option<ComboType> {
    let mains = ranks_with_count(counts, 3);
    if mains.len() < 2 || !is_run(&mains) {
        return None;
    }
    let kickers = ranks_with_count(counts, 2);
    (kickers.len() == mains.len() && len == mains.len() * 5)
        .then_some(ComboType::AirplaneWithPairs)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::game::entities::{Card, Rank, Suit};

    /// Build cards from compact specs like `"3H"`, `"10D"`, `"QS"`,
    /// `"LJ"`, `"BJ"`.
    pub fn cards(specs: &[&str]) -> Vec<Card> {
        specs.iter().map(|spec| card(spec)).collect()
    }

    pub fn card(spec: &str) -> Card {
        match spec {
            "LJ" => return Card::new(Suit::Joker, Rank::LittleJoker),
            "BJ" => return Card::new(Suit::Joker, Rank::BigJoker),
            _ => {}
        }
        let (rank_part, suit_part) = spec.split_at(spec.len() - 1);
        let rank = match rank_part {
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "2" => Rank::Two,
            other => panic!("bad rank spec: {other}"),
        };
        let suit = match suit_part {
            "C" => Suit::Club,
            "D" => Suit::Diamond,
            "H" => Suit::Heart,
            "S" => Suit::Spade,
            other => panic!("bad suit spec: {other}"),
        };
        Card::new(suit, rank)
    }
}
