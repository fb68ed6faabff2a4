//! The mutable aggregate for one game instance.
//!
//! All mutation goes through the rules engine and the game loop; the rest
//! of the crate (and the host) sees read-only accessors. Round-scoped
//! fields reset on restart, while players, seating, and cumulative scores
//! survive across rounds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
};

use super::actions::GameAction;
use super::combos::PlayedHand;
use super::entities::{Card, PlayerId};
use super::errors::GameError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    Lobby,
    Bidding,
    Play,
    /// Logical pseudo-phase: entered and left inside terminal handling,
    /// never observable between actions and never enterable from outside.
    Scoring,
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "lobby",
            Self::Bidding => "bidding",
            Self::Play => "play",
            Self::Scoring => "scoring",
            Self::Terminated => "terminated",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    game_id: String,
    players: Vec<PlayerId>,
    hands: HashMap<PlayerId, Vec<Card>>,
    phase: Phase,
    current_player_index: usize,
    current_lead: Option<PlayedHand>,
    current_lead_player: Option<PlayerId>,
    passes_in_row: usize,
    bids: HashMap<PlayerId, u32>,
    bottom: Vec<Card>,
    /// Landlord team in selection order; the first entry is the primary
    /// landlord and leads the first trick.
    landlords: Vec<PlayerId>,
    /// Set while the bidding phase is in its landlord-selection sub-mode.
    awaiting_selector: Option<PlayerId>,
    bombs_played: u32,
    rockets_played: u32,
    landlord_played: bool,
    farmers_played: bool,
    scores: HashMap<PlayerId, i64>,
    action_log: Vec<GameAction>,
    updated_at: DateTime<Utc>,
}

impl GameState {
    #[must_use]
    pub fn new(game_id: impl Into<String>, players: &[PlayerId]) -> Self {
        let players: Vec<PlayerId> = players.to_vec();
        let hands = players.iter().map(|&p| (p, Vec::new())).collect();
        Self {
            game_id: game_id.into(),
            players,
            hands,
            phase: Phase::Lobby,
            current_player_index: 0,
            current_lead: None,
            current_lead_player: None,
            passes_in_row: 0,
            bids: HashMap::new(),
            bottom: Vec::new(),
            landlords: Vec::new(),
            awaiting_selector: None,
            bombs_played: 0,
            rockets_played: 0,
            landlord_played: false,
            farmers_played: false,
            scores: HashMap::new(),
            action_log: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Seat another player. Seating is append-only and closes at the
    /// first deal; between rounds (terminated state) it reopens.
    pub fn add_player(&mut self, player: PlayerId) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Lobby | Phase::Terminated) {
            return Err(GameError::GameAlreadyStarted);
        }
        if !self.players.contains(&player) {
            self.players.push(player);
            self.hands.insert(player, Vec::new());
            self.touch();
        }
        Ok(())
    }

    // ===== read-only surface =====

    #[must_use]
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn hand_of(&self, player: &PlayerId) -> &[Card] {
        self.hands.get(player).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn hand_sizes(&self) -> HashMap<PlayerId, usize> {
        self.hands.iter().map(|(&p, h)| (p, h.len())).collect()
    }

    #[must_use]
    pub const fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.players.get(self.current_player_index).copied()
    }

    #[must_use]
    pub const fn current_lead(&self) -> Option<&PlayedHand> {
        self.current_lead.as_ref()
    }

    #[must_use]
    pub const fn current_lead_player(&self) -> Option<PlayerId> {
        self.current_lead_player
    }

    #[must_use]
    pub const fn passes_in_row(&self) -> usize {
        self.passes_in_row
    }

    #[must_use]
    pub const fn bids(&self) -> &HashMap<PlayerId, u32> {
        &self.bids
    }

    #[must_use]
    pub fn everyone_bid(&self) -> bool {
        self.bids.len() == self.players.len()
    }

    #[must_use]
    pub fn highest_bid(&self) -> u32 {
        self.bids.values().copied().max().unwrap_or(0)
    }

    /// Players holding the highest non-pass bid, in seating order. Empty
    /// when everyone passed.
    #[must_use]
    pub fn highest_bidders(&self) -> Vec<PlayerId> {
        let max = self.highest_bid();
        if max == 0 {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|p| self.bids.get(p) == Some(&max))
            .copied()
            .collect()
    }

    #[must_use]
    pub fn bottom(&self) -> &[Card] {
        &self.bottom
    }

    #[must_use]
    pub fn landlords(&self) -> &[PlayerId] {
        &self.landlords
    }

    #[must_use]
    pub fn is_landlord(&self, player: &PlayerId) -> bool {
        self.landlords.contains(player)
    }

    #[must_use]
    pub const fn awaiting_selector(&self) -> Option<PlayerId> {
        self.awaiting_selector
    }

    #[must_use]
    pub const fn bombs_played(&self) -> u32 {
        self.bombs_played
    }

    #[must_use]
    pub const fn rockets_played(&self) -> u32 {
        self.rockets_played
    }

    #[must_use]
    pub const fn landlord_played(&self) -> bool {
        self.landlord_played
    }

    #[must_use]
    pub const fn farmers_played(&self) -> bool {
        self.farmers_played
    }

    #[must_use]
    pub const fn scores(&self) -> &HashMap<PlayerId, i64> {
        &self.scores
    }

    #[must_use]
    pub fn action_log(&self) -> &[GameAction] {
        &self.action_log
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Exact multiset containment: every physical occurrence in `cards`
    /// must be covered by a distinct occurrence in the player's hand.
    #[must_use]
    pub fn holds_cards(&self, player: &PlayerId, cards: &[Card]) -> bool {
        let hand = self.hand_of(player);
        let mut needed: HashMap<Card, usize> = HashMap::new();
        for card in cards {
            *needed.entry(*card).or_insert(0) += 1;
        }
        needed
            .iter()
            .all(|(card, &count)| hand.iter().filter(|held| *held == card).count() >= count)
    }

    // ===== mutation, rules engine / loop only =====

    pub(super) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.touch();
    }

    pub(super) fn set_current_player_index(&mut self, index: usize) {
        self.current_player_index = index;
        self.touch();
    }

    pub(super) fn next_player(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        self.touch();
    }

    pub(super) fn hand_of_mut(&mut self, player: &PlayerId) -> &mut Vec<Card> {
        self.hands.entry(*player).or_default()
    }

    /// Remove exactly one physical occurrence per played card; never
    /// strips other equal cards the player still holds.
    pub(super) fn remove_cards(&mut self, player: &PlayerId, cards: &[Card]) {
        let hand = self.hand_of_mut(player);
        for card in cards {
            if let Some(pos) = hand.iter().position(|held| held == card) {
                hand.remove(pos);
            }
        }
        self.touch();
    }

    pub(super) fn set_current_lead(&mut self, lead: Option<(PlayedHand, PlayerId)>) {
        match lead {
            Some((hand, player)) => {
                self.current_lead = Some(hand);
                self.current_lead_player = Some(player);
            }
            None => {
                self.current_lead = None;
                self.current_lead_player = None;
            }
        }
        self.touch();
    }

    pub(super) fn set_passes_in_row(&mut self, passes: usize) {
        self.passes_in_row = passes;
        self.touch();
    }

    pub(super) fn record_bid(&mut self, player: PlayerId, value: u32) {
        self.bids.insert(player, value);
        self.touch();
    }

    pub(super) fn set_bottom(&mut self, cards: Vec<Card>) {
        self.bottom = cards;
        self.touch();
    }

    pub(super) fn take_bottom(&mut self) -> Vec<Card> {
        self.touch();
        std::mem::take(&mut self.bottom)
    }

    pub(super) fn push_landlord(&mut self, player: PlayerId) {
        if !self.landlords.contains(&player) {
            self.landlords.push(player);
        }
        self.touch();
    }

    pub(super) fn set_awaiting_selector(&mut self, selector: Option<PlayerId>) {
        self.awaiting_selector = selector;
        self.touch();
    }

    pub(super) fn record_bomb(&mut self) {
        self.bombs_played += 1;
        self.touch();
    }

    pub(super) fn record_rocket(&mut self) {
        self.rockets_played += 1;
        self.touch();
    }

    pub(super) fn mark_team_played(&mut self, landlord_team: bool) {
        if landlord_team {
            self.landlord_played = true;
        } else {
            self.farmers_played = true;
        }
        self.touch();
    }

    pub(super) fn add_score(&mut self, player: PlayerId, delta: i64) {
        *self.scores.entry(player).or_insert(0) += delta;
        self.touch();
    }

    pub(super) fn append_action(&mut self, action: GameAction) {
        self.action_log.push(action);
        self.touch();
    }

    /// Wipe everything round-scoped for a fresh deal. Players, seating
    /// order, and cumulative scores carry over.
    pub(super) fn reset_for_new_round(&mut self) {
        for hand in self.hands.values_mut() {
            hand.clear();
        }
        self.phase = Phase::Lobby;
        self.current_player_index = 0;
        self.current_lead = None;
        self.current_lead_player = None;
        self.passes_in_row = 0;
        self.bids.clear();
        self.bottom.clear();
        self.landlords.clear();
        self.awaiting_selector = None;
        self.bombs_played = 0;
        self.rockets_played = 0;
        self.landlord_played = false;
        self.farmers_played = false;
        self.action_log.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
