//! Game configuration and standard presets.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ConfigError;

/// Immutable table setup: how many players, decks, landlords, reserved
/// bottom cards, and how high bidding may go. Validated at construction;
/// every instance deals evenly by the time it exists.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameConfig {
    player_count: usize,
    deck_count: usize,
    landlord_count: usize,
    extra_bottom_cards: usize,
    max_bid: u32,
}

impl GameConfig {
    /// Standard preset for a table of `player_count` (3-12) players.
    ///
    /// Deck, landlord, and bid tables follow the classic variants: one
    /// deck and a single landlord for 3 players, scaling to four decks
    /// and a three-player landlord team at 10+.
    pub fn standard(player_count: usize) -> Result<Self, ConfigError> {
        let (deck_count, landlord_count, extra_bottom_cards, max_bid) = preset(player_count)?;
        Self::custom(
            player_count,
            deck_count,
            landlord_count,
            extra_bottom_cards,
            max_bid,
        )
    }

    /// Fully custom table. Fails unless
    /// `deck_count*54 - extra_bottom_cards*landlord_count` splits evenly
    /// across `player_count` hands.
    pub fn custom(
        player_count: usize,
        deck_count: usize,
        landlord_count: usize,
        extra_bottom_cards: usize,
        max_bid: u32,
    ) -> Result<Self, ConfigError> {
        if !(3..=12).contains(&player_count) {
            return Err(ConfigError::PlayerCount(player_count));
        }
        if deck_count < 1 {
            return Err(ConfigError::DeckCount);
        }
        if landlord_count < 1 || landlord_count >= player_count {
            return Err(ConfigError::LandlordCount(landlord_count));
        }
        if max_bid < 1 {
            return Err(ConfigError::MaxBid);
        }
        let total = deck_count * 54;
        let reserved = extra_bottom_cards * landlord_count;
        if reserved >= total || (total - reserved) % player_count != 0 {
            return Err(ConfigError::UnevenDeal {
                total,
                reserved,
                players: player_count,
            });
        }
        Ok(Self {
            player_count,
            deck_count,
            landlord_count,
            extra_bottom_cards,
            max_bid,
        })
    }

    /// High-variance preset: the standard table for `player_count` with
    /// decks and reserved bottom cards multiplied by `deck_multiplier`
    /// (at least 2). More decks means more bombs.
    pub fn high_variance(player_count: usize, deck_multiplier: usize) -> Result<Self, ConfigError> {
        if deck_multiplier < 2 {
            return Err(ConfigError::DeckMultiplier);
        }
        let (deck_count, landlord_count, extra_bottom_cards, max_bid) = preset(player_count)?;
        Self::custom(
            player_count,
            deck_count * deck_multiplier,
            landlord_count,
            extra_bottom_cards * deck_multiplier,
            max_bid,
        )
    }

    #[must_use]
    pub const fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub const fn deck_count(&self) -> usize {
        self.deck_count
    }

    #[must_use]
    pub const fn landlord_count(&self) -> usize {
        self.landlord_count
    }

    #[must_use]
    pub const fn extra_bottom_cards(&self) -> usize {
        self.extra_bottom_cards
    }

    #[must_use]
    pub const fn max_bid(&self) -> u32 {
        self.max_bid
    }

    #[must_use]
    pub const fn farmer_count(&self) -> usize {
        self.player_count - self.landlord_count
    }

    #[must_use]
    pub const fn total_cards(&self) -> usize {
        self.deck_count * 54
    }

    /// Cards reserved as the bottom at deal time.
    #[must_use]
    pub const fn bottom_size(&self) -> usize {
        self.extra_bottom_cards * self.landlord_count
    }

    #[must_use]
    pub const fn cards_per_player(&self) -> usize {
        (self.total_cards() - self.bottom_size()) / self.player_count
    }

    /// Tables of 5+ players forbid single-card kickers; pair kickers are
    /// required instead.
    #[must_use]
    pub const fn pair_kickers_required(&self) -> bool {
        self.player_count >= 5
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} players, {} decks, {} landlords, {} bottom cards each, max bid {}",
            self.player_count,
            self.deck_count,
            self.landlord_count,
            self.extra_bottom_cards,
            self.max_bid
        )
    }
}

// Per-player-count presets: (decks, landlords, extra bottom cards, max bid).
// Deck/landlord/bid tables are the classic ones; the reserve is tuned per
// table size so the remaining pool always deals evenly.
fn preset(player_count: usize) -> Result<(usize, usize, usize, u32), ConfigError> {
    match player_count {
        3 => Ok((1, 1, 3, 3)),
        4 => Ok((2, 1, 4, 6)),
        5 => Ok((2, 2, 4, 6)),
        6 => Ok((2, 2, 3, 6)),
        7 => Ok((3, 2, 4, 6)),
        8 => Ok((3, 3, 6, 15)),
        9 => Ok((4, 3, 3, 6)),
        10 => Ok((4, 3, 2, 7)),
        11 => Ok((4, 3, 6, 6)),
        12 => Ok((4, 3, 4, 6)),
        other => Err(ConfigError::PlayerCount(other)),
    }
}
