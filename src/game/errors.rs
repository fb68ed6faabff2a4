//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Phase;

/// Fatal construction errors for [`super::config::GameConfig`]. Never
/// recoverable; a config that fails here must not be used to open a game.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ConfigError {
    #[error("player count must be between 3 and 12, got {0}")]
    PlayerCount(usize),
    #[error("deck count must be at least 1")]
    DeckCount,
    #[error("landlord count must be at least 1 and less than player count, got {0}")]
    LandlordCount(usize),
    #[error("max bid must be at least 1")]
    MaxBid,
    #[error("deck multiplier must be at least 2")]
    DeckMultiplier,
    #[error("{total} cards minus {reserved} reserved do not deal evenly to {players} players")]
    UnevenDeal {
        total: usize,
        reserved: usize,
        players: usize,
    },
}

/// Validation rejections surfaced to the action submitter. Expected and
/// frequent; the state is guaranteed untouched when one of these comes
/// back, and the rejected action never reaches the action log.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("not your turn")]
    OutOfTurn,
    #[error("not your turn to pick a landlord")]
    NotSelector,
    #[error("action not allowed in the {0} phase")]
    WrongPhase(Phase),
    #[error("game over")]
    GameOver,
    #[error("players can only join before the deal")]
    GameAlreadyStarted,
    #[error("expected {expected} seated players, got {actual}")]
    WrongSeatCount { expected: usize, actual: usize },
    #[error("bid must be between 0 and {max}")]
    BidOutOfRange { max: u32 },
    #[error("cards do not form a playable combination")]
    InvalidCombo,
    #[error("single kickers are not allowed at this table size; use pair kickers")]
    SingleKickersNotAllowed,
    #[error("card(s) not in hand")]
    CardsNotInHand,
    #[error("play does not beat the current lead")]
    DoesNotBeatLead,
    #[error("combinations of different type or size cannot be compared")]
    MismatchedPlay,
    #[error("leader must play; cannot pass on an open trick")]
    LeaderMustPlay,
    #[error("player is already on the landlord team")]
    AlreadyLandlord,
    #[error("selected player is not seated in this game")]
    UnknownPlayer,
}
