//! External action envelope.
//!
//! One variant per action kind, each carrying its own payload; the rules
//! engine decides by pattern match instead of downcasting.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Card, PlayerId};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameAction {
    /// System action: shuffle, deal, and enter bidding. From a terminated
    /// round this restarts with the same players and running scores.
    Start,
    /// A bid of `value` points; 0 passes.
    Bid { player: PlayerId, value: u32 },
    /// Play `cards`; an empty list passes (only legal against a standing
    /// lead).
    Play { player: PlayerId, cards: Vec<Card> },
    /// The current selector drafts `target` onto the landlord team.
    SelectLandlord { player: PlayerId, target: PlayerId },
}

impl GameAction {
    /// The acting player, or `None` for system actions.
    #[must_use]
    pub fn actor(&self) -> Option<PlayerId> {
        match self {
            Self::Start => None,
            Self::Bid { player, .. }
            | Self::Play { player, .. }
            | Self::SelectLandlord { player, .. } => Some(*player),
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Bid { player, value: 0 } => write!(f, "{player} passes the bid"),
            Self::Bid { player, value } => write!(f, "{player} bids {value}"),
            Self::Play { player, cards } if cards.is_empty() => write!(f, "{player} passes"),
            Self::Play { player, cards } => write!(f, "{player} plays {} cards", cards.len()),
            Self::SelectLandlord { player, target } => {
                write!(f, "{player} drafts {target} as landlord")
            }
        }
    }
}
