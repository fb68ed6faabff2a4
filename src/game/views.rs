//! Per-player projections of the game state.
//!
//! A view carries everything public plus the viewer's own cards, and only
//! hand *sizes* for everyone else, so a host can ship a player's view
//! verbatim without further redaction work.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::combos::PlayedHand;
use super::entities::{Card, PlayerId};
use super::state::{GameState, Phase};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameView {
    pub game_id: String,
    pub phase: Phase,
    pub players: Vec<PlayerId>,
    pub current_player: Option<PlayerId>,
    /// The viewer's own cards; never anyone else's.
    pub hand: Vec<Card>,
    pub hand_sizes: HashMap<PlayerId, usize>,
    pub current_lead: Option<PlayedHand>,
    pub current_lead_player: Option<PlayerId>,
    pub passes_in_row: usize,
    pub bids: HashMap<PlayerId, u32>,
    pub landlords: Vec<PlayerId>,
    pub awaiting_selector: Option<PlayerId>,
    pub scores: HashMap<PlayerId, i64>,
    pub bombs_played: u32,
    pub rockets_played: u32,
}

/// Project the state for one player.
#[must_use]
pub fn view_for(state: &GameState, viewer: &PlayerId) -> GameView {
    GameView {
        game_id: state.game_id().to_string(),
        phase: state.phase(),
        players: state.players().to_vec(),
        current_player: state.current_player_id(),
        hand: state.hand_of(viewer).to_vec(),
        hand_sizes: state.hand_sizes(),
        current_lead: state.current_lead().cloned(),
        current_lead_player: state.current_lead_player(),
        passes_in_row: state.passes_in_row(),
        bids: state.bids().clone(),
        landlords: state.landlords().to_vec(),
        awaiting_selector: state.awaiting_selector(),
        scores: state.scores().clone(),
        bombs_played: state.bombs_played(),
        rockets_played: state.rockets_played(),
    }
}

pub type GameViews = HashMap<PlayerId, GameView>;

/// One view per seated player.
#[must_use]
pub fn views(state: &GameState) -> GameViews {
    state
        .players()
        .iter()
        .map(|player| (*player, view_for(state, player)))
        .collect()
}
