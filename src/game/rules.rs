//! The phase state machine: validates one action against the current
//! state, mutates it on success, and reports a typed rejection otherwise.
//!
//! Every handler validates completely before touching the state, so a
//! rejection is guaranteed to leave no partial mutation behind.

use log::{debug, info};
use rand::seq::IndexedRandom;
use std::cmp::Ordering;

use super::actions::GameAction;
use super::combos::{ComboType, detect};
use super::compare::compare;
use super::config::GameConfig;
use super::entities::{PlayerId, card_pool, sort_hand};
use super::errors::{ConfigError, GameError};
use super::state::{GameState, Phase};

pub struct RulesEngine {
    config: GameConfig,
}

impl RulesEngine {
    #[must_use]
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Standard preset table for `player_count` players.
    pub fn standard(player_count: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(GameConfig::standard(player_count)?))
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Validate and apply one action. Dispatch is by phase first, then by
    /// action kind; anything that does not fit the current phase is a
    /// rejection, not a crash.
    pub fn apply(&self, state: &mut GameState, action: &GameAction) -> Result<(), GameError> {
        match state.phase() {
            Phase::Lobby => self.on_start(state, action),
            Phase::Bidding => {
                if state.awaiting_selector().is_some() {
                    self.on_select_landlord(state, action)
                } else {
                    self.on_bid(state, action)
                }
            }
            Phase::Play => self.on_play(state, action),
            Phase::Scoring => Err(GameError::GameOver),
            Phase::Terminated => match action {
                GameAction::Start => {
                    info!("game {}: restarting", state.game_id());
                    state.reset_for_new_round();
                    self.on_start(state, action)
                }
                _ => Err(GameError::GameOver),
            },
        }
    }

    #[must_use]
    pub fn is_terminal(&self, state: &GameState) -> bool {
        state.phase() == Phase::Terminated
    }

    /* ===== Lobby: shuffle, deal, enter bidding ===== */

    fn on_start(&self, state: &mut GameState, action: &GameAction) -> Result<(), GameError> {
        if !matches!(action, GameAction::Start) {
            return Err(GameError::WrongPhase(state.phase()));
        }
        let expected = self.config.player_count();
        if state.players().len() != expected {
            return Err(GameError::WrongSeatCount {
                expected,
                actual: state.players().len(),
            });
        }

        let mut pool = card_pool(self.config.deck_count());
        let players: Vec<PlayerId> = state.players().to_vec();
        for _ in 0..self.config.cards_per_player() {
            for player in &players {
                if let Some(card) = pool.pop() {
                    state.hand_of_mut(player).push(card);
                }
            }
        }
        for player in &players {
            sort_hand(state.hand_of_mut(player));
        }
        state.set_bottom(pool);

        state.set_current_player_index(0);
        state.set_phase(Phase::Bidding);
        info!(
            "game {}: dealt {} cards each, {} in the bottom; bidding opens",
            state.game_id(),
            self.config.cards_per_player(),
            state.bottom().len()
        );
        Ok(())
    }

    /* ===== Bidding ===== */

    fn on_bid(&self, state: &mut GameState, action: &GameAction) -> Result<(), GameError> {
        let GameAction::Bid { player, value } = action else {
            return Err(GameError::WrongPhase(Phase::Bidding));
        };
        if state.current_player_id() != Some(*player) {
            return Err(GameError::OutOfTurn);
        }
        if *value > self.config.max_bid() {
            return Err(GameError::BidOutOfRange {
                max: self.config.max_bid(),
            });
        }

        state.record_bid(*player, *value);
        debug!("game {}: {action}", state.game_id());
        state.next_player();

        if state.everyone_bid() {
            self.resolve_landlords(state);
        }
        Ok(())
    }

    fn resolve_landlords(&self, state: &mut GameState) {
        let bidders = state.highest_bidders();
        let primary = match bidders.as_slice() {
            [] => {
                // Universal pass: seat 0 takes the round at base stake 1.
                info!(
                    "game {}: everyone passed, first seat becomes landlord",
                    state.game_id()
                );
                state.players()[0]
            }
            [only] => *only,
            tied => *tied.choose(&mut rand::rng()).unwrap_or(&tied[0]),
        };
        info!(
            "game {}: primary landlord {primary} (highest bid {})",
            state.game_id(),
            state.highest_bid()
        );

        state.push_landlord(primary);
        if self.config.landlord_count() == 1 {
            self.distribute_bottom(state);
        } else {
            state.set_awaiting_selector(Some(primary));
            info!(
                "game {}: awaiting selection of {} more landlords",
                state.game_id(),
                self.config.landlord_count() - 1
            );
        }
    }

    /* ===== Landlord selection sub-mode (snake draft) ===== */

    fn on_select_landlord(
        &self,
        state: &mut GameState,
        action: &GameAction,
    ) -> Result<(), GameError> {
        let GameAction::SelectLandlord { player, target } = action else {
            return Err(GameError::WrongPhase(Phase::Bidding));
        };
        if state.awaiting_selector() != Some(*player) {
            return Err(GameError::NotSelector);
        }
        if state.is_landlord(target) {
            return Err(GameError::AlreadyLandlord);
        }
        if !state.players().contains(target) {
            return Err(GameError::UnknownPlayer);
        }

        state.push_landlord(*target);
        info!("game {}: {action}", state.game_id());

        if state.landlords().len() < self.config.landlord_count() {
            // Snake draft: the newest landlord picks the next one.
            state.set_awaiting_selector(Some(*target));
        } else {
            state.set_awaiting_selector(None);
            self.distribute_bottom(state);
        }
        Ok(())
    }

    /// Split the bottom across the landlord team, remainder front-loaded
    /// in selection order, then hand the first trick to the primary
    /// landlord.
    fn distribute_bottom(&self, state: &mut GameState) {
        let landlords = state.landlords().to_vec();
        let Some(&primary) = landlords.first() else {
            return;
        };
        let mut bottom = state.take_bottom();
        let share = bottom.len() / landlords.len();
        let remainder = bottom.len() % landlords.len();

        for (i, landlord) in landlords.iter().enumerate() {
            let take = share + usize::from(i < remainder);
            let received: Vec<_> = bottom.drain(..take.min(bottom.len())).collect();
            debug!(
                "game {}: landlord {landlord} receives {} bottom cards",
                state.game_id(),
                received.len()
            );
            let hand = state.hand_of_mut(landlord);
            hand.extend(received);
            sort_hand(hand);
        }

        let lead_index = state
            .players()
            .iter()
            .position(|p| *p == primary)
            .unwrap_or(0);
        state.set_current_player_index(lead_index);
        state.set_current_lead(None);
        state.set_passes_in_row(0);
        state.set_phase(Phase::Play);
        info!(
            "game {}: play begins, landlord team {:?} led by {primary}",
            state.game_id(),
            landlords.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }

    /* ===== Play ===== */

    fn on_play(&self, state: &mut GameState, action: &GameAction) -> Result<(), GameError> {
        let GameAction::Play { player, cards } = action else {
            return Err(GameError::WrongPhase(Phase::Play));
        };
        if state.current_player_id() != Some(*player) {
            return Err(GameError::OutOfTurn);
        }
        if cards.is_empty() {
            return self.on_pass(state);
        }

        let hand = detect(cards).ok_or(GameError::InvalidCombo)?;
        if self.config.pair_kickers_required() && hand.combo().has_single_kickers() {
            return Err(GameError::SingleKickersNotAllowed);
        }
        if !state.holds_cards(player, cards) {
            return Err(GameError::CardsNotInHand);
        }
        if let Some(lead) = state.current_lead()
            && compare(&hand, lead)? != Ordering::Greater
        {
            return Err(GameError::DoesNotBeatLead);
        }

        // Validation done; from here on the play is committed atomically.
        state.remove_cards(player, cards);
        match hand.combo() {
            // Only plain bombs and rockets feed the score multiplier;
            // kicker-bearing bomb shapes do not.
            ComboType::Bomb => state.record_bomb(),
            ComboType::Rocket => state.record_rocket(),
            _ => {}
        }
        state.mark_team_played(state.is_landlord(player));
        debug!("game {}: {player} plays {hand}", state.game_id());
        state.set_current_lead(Some((hand, *player)));
        state.set_passes_in_row(0);

        if state.hand_of(player).is_empty() {
            let landlord_won = state.is_landlord(player);
            info!(
                "game {}: {player} is out of cards, {} win",
                state.game_id(),
                if landlord_won { "landlords" } else { "farmers" }
            );
            state.set_phase(Phase::Terminated);
            return Ok(());
        }
        state.next_player();
        Ok(())
    }

    fn on_pass(&self, state: &mut GameState) -> Result<(), GameError> {
        if state.current_lead().is_none() {
            return Err(GameError::LeaderMustPlay);
        }
        state.set_passes_in_row(state.passes_in_row() + 1);
        state.next_player();

        // Everyone but the lead player passed: the trick closes and the
        // player now on turn (the lead player) opens a fresh one.
        if state.passes_in_row() >= state.players().len() - 1 {
            state.set_current_lead(None);
            state.set_passes_in_row(0);
            debug!(
                "game {}: trick closes, {} leads next",
                state.game_id(),
                state
                    .current_player_id()
                    .map_or_else(|| "nobody".to_string(), |p| p.to_string())
            );
        }
        Ok(())
    }

    /* ===== Scoring ===== */

    /// Compute and bank this round's score deltas. Called exactly once
    /// per round by the game loop after the state turns terminal.
    pub fn score(&self, state: &mut GameState) {
        let winner = state
            .players()
            .iter()
            .find(|p| state.hand_of(p).is_empty())
            .copied();
        let Some(winner) = winner else {
            debug!(
                "game {}: terminal without an empty hand, nothing to score",
                state.game_id()
            );
            return;
        };
        state.set_phase(Phase::Scoring);

        let landlord_won = state.is_landlord(&winner);
        let base = state.highest_bid().max(1);

        let mut exponent = state.bombs_played() + state.rockets_played();
        let spring = landlord_won && !state.farmers_played();
        let anti_spring = !landlord_won && !state.landlord_played();
        if spring || anti_spring {
            exponent += 1;
        }
        let unit = i64::from(base) * (1i64 << exponent.min(62));

        let landlords: Vec<PlayerId> = state.landlords().to_vec();
        let farmers: Vec<PlayerId> = state
            .players()
            .iter()
            .filter(|p| !state.is_landlord(p))
            .copied()
            .collect();
        let landlord_delta = unit * farmers.len() as i64;
        let farmer_delta = unit * landlords.len() as i64;

        for landlord in &landlords {
            state.add_score(*landlord, if landlord_won { landlord_delta } else { -landlord_delta });
        }
        for farmer in &farmers {
            state.add_score(*farmer, if landlord_won { -farmer_delta } else { farmer_delta });
        }

        info!(
            "game {}: {} win; base {base}, bombs {}, rockets {}, spring {spring}, \
             anti-spring {anti_spring}, unit {unit}",
            state.game_id(),
            if landlord_won { "landlords" } else { "farmers" },
            state.bombs_played(),
            state.rockets_played(),
        );
        state.set_phase(Phase::Terminated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combos::test_support::cards;

    fn engine(players: usize) -> (RulesEngine, GameState, Vec<PlayerId>) {
        let rules = RulesEngine::standard(players).unwrap();
        let ids: Vec<PlayerId> = (0..players).map(|_| PlayerId::new()).collect();
        let state = GameState::new("test", &ids);
        (rules, state, ids)
    }

    fn bid(rules: &RulesEngine, state: &mut GameState, player: PlayerId, value: u32) {
        rules
            .apply(state, &GameAction::Bid { player, value })
            .unwrap();
    }

    #[test]
    fn test_start_deals_and_enters_bidding() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        assert_eq!(state.phase(), Phase::Bidding);
        for id in &ids {
            assert_eq!(state.hand_of(id).len(), 17);
        }
        assert_eq!(state.bottom().len(), 3);
        assert_eq!(state.current_player_index(), 0);
    }

    #[test]
    fn test_start_requires_full_table() {
        let (rules, mut state, _) = engine(3);
        state.add_player(PlayerId::new()).unwrap();
        assert_eq!(
            rules.apply(&mut state, &GameAction::Start),
            Err(GameError::WrongSeatCount {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn test_lobby_rejects_player_actions() {
        let (rules, mut state, ids) = engine(3);
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Bid {
                    player: ids[0],
                    value: 1
                }
            ),
            Err(GameError::WrongPhase(Phase::Lobby))
        );
    }

    #[test]
    fn test_bidding_rejects_out_of_turn_and_range() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Bid {
                    player: ids[1],
                    value: 1
                }
            ),
            Err(GameError::OutOfTurn)
        );
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Bid {
                    player: ids[0],
                    value: 4
                }
            ),
            Err(GameError::BidOutOfRange { max: 3 })
        );
    }

    #[test]
    fn test_unique_highest_bidder_becomes_landlord_with_bottom() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 3);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);

        assert_eq!(state.phase(), Phase::Play);
        assert_eq!(state.landlords(), &[ids[0]]);
        assert_eq!(state.hand_of(&ids[0]).len(), 17 + 3);
        assert_eq!(state.current_player_id(), Some(ids[0]));
        assert!(state.bottom().is_empty());
    }

    #[test]
    fn test_universal_pass_defaults_to_first_seat() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        for &id in &ids {
            bid(&rules, &mut state, id, 0);
        }
        assert_eq!(state.landlords(), &[ids[0]]);
        assert_eq!(state.phase(), Phase::Play);
    }

    #[test]
    fn test_tied_bids_pick_one_of_the_tied() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 2);
        bid(&rules, &mut state, ids[1], 2);
        bid(&rules, &mut state, ids[2], 0);
        let landlord = state.landlords()[0];
        assert!(landlord == ids[0] || landlord == ids[1]);
    }

    #[test]
    fn test_snake_draft_selection() {
        let (rules, mut state, ids) = engine(5);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 1);
        for &id in &ids[1..] {
            bid(&rules, &mut state, id, 0);
        }
        // Two landlords at this table size: primary drafts a teammate.
        assert_eq!(state.phase(), Phase::Bidding);
        assert_eq!(state.awaiting_selector(), Some(ids[0]));

        // Selection rejections before the legal pick.
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::SelectLandlord {
                    player: ids[1],
                    target: ids[2]
                }
            ),
            Err(GameError::NotSelector)
        );
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::SelectLandlord {
                    player: ids[0],
                    target: ids[0]
                }
            ),
            Err(GameError::AlreadyLandlord)
        );
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::SelectLandlord {
                    player: ids[0],
                    target: PlayerId::new()
                }
            ),
            Err(GameError::UnknownPlayer)
        );
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Bid {
                    player: ids[0],
                    value: 1
                }
            ),
            Err(GameError::WrongPhase(Phase::Bidding))
        );

        rules
            .apply(
                &mut state,
                &GameAction::SelectLandlord {
                    player: ids[0],
                    target: ids[3],
                },
            )
            .unwrap();
        assert_eq!(state.phase(), Phase::Play);
        assert_eq!(state.landlords(), &[ids[0], ids[3]]);
        assert_eq!(state.current_player_id(), Some(ids[0]));
    }

    #[test]
    fn test_bottom_splits_evenly_across_landlord_team() {
        // 54 - 2*2 = 50 cards, 10 per player; 2 bottom cards per landlord.
        let config = GameConfig::custom(5, 1, 2, 2, 3).unwrap();
        let rules = RulesEngine::new(config);
        let ids: Vec<PlayerId> = (0..5).map(|_| PlayerId::new()).collect();
        let mut state = GameState::new("test", &ids);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 0);
        bid(&rules, &mut state, ids[1], 2);
        for &id in &ids[2..] {
            bid(&rules, &mut state, id, 0);
        }
        assert_eq!(state.awaiting_selector(), Some(ids[1]));
        rules
            .apply(
                &mut state,
                &GameAction::SelectLandlord {
                    player: ids[1],
                    target: ids[4],
                },
            )
            .unwrap();
        assert_eq!(state.hand_of(&ids[1]).len(), 12);
        assert_eq!(state.hand_of(&ids[4]).len(), 12);
        assert_eq!(state.hand_of(&ids[0]).len(), 10);
        // Primary landlord leads even though seat 0 opened the bidding.
        assert_eq!(state.current_player_id(), Some(ids[1]));
    }

    #[test]
    fn test_leader_cannot_pass_and_trick_closure() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 3);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);

        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: vec![]
                }
            ),
            Err(GameError::LeaderMustPlay)
        );

        let opener = state.hand_of(&ids[0])[0];
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: vec![opener],
                },
            )
            .unwrap();
        assert!(state.current_lead().is_some());

        for &farmer in &[ids[1], ids[2]] {
            rules
                .apply(
                    &mut state,
                    &GameAction::Play {
                        player: farmer,
                        cards: vec![],
                    },
                )
                .unwrap();
        }
        // Both farmers passed: trick closed, landlord leads again.
        assert!(state.current_lead().is_none());
        assert_eq!(state.passes_in_row(), 0);
        assert_eq!(state.current_player_id(), Some(ids[0]));
    }

    #[test]
    fn test_play_rejects_cards_not_held() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 3);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);

        // One deck holds at most one physical copy of any card, so a
        // "pair" of the same physical card cannot be owned.
        let held = state.hand_of(&ids[0])[0];
        let before = state.hand_of(&ids[0]).len();
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: vec![held, held],
                }
            ),
            Err(GameError::CardsNotInHand)
        );
        // Rejection left the hand untouched.
        assert_eq!(state.hand_of(&ids[0]).len(), before);
    }

    #[test]
    fn test_single_kicker_shapes_rejected_at_large_tables() {
        let (rules, mut state, ids) = engine(5);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 1);
        for &id in &ids[1..] {
            bid(&rules, &mut state, id, 0);
        }
        rules
            .apply(
                &mut state,
                &GameAction::SelectLandlord {
                    player: ids[0],
                    target: ids[1],
                },
            )
            .unwrap();

        // Force a known hand to make the combo deterministic.
        *state.hand_of_mut(&ids[0]) = cards(&["5H", "5D", "5S", "9C", "9D", "9H"]);
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["5H", "5D", "5S", "9C"]),
                }
            ),
            Err(GameError::SingleKickersNotAllowed)
        );
        // The pair-kicker variant is fine.
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["5H", "5D", "5S", "9C", "9D"]),
                },
            )
            .unwrap();
    }

    #[test]
    fn test_only_plain_bombs_and_rockets_feed_the_counters() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 3);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);

        *state.hand_of_mut(&ids[0]) = cards(&["7H", "7D", "7S", "7C", "3C", "5C", "LJ", "BJ", "4D"]);
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["7H", "7D", "7S", "7C", "3C", "5C"]),
                },
            )
            .unwrap();
        assert_eq!(state.bombs_played(), 0);

        // Rocket on top of the bomb-with-singles lead.
        rules
            .apply(&mut state, &GameAction::Play { player: ids[1], cards: vec![] })
            .unwrap();
        rules
            .apply(&mut state, &GameAction::Play { player: ids[2], cards: vec![] })
            .unwrap();
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["LJ", "BJ"]),
                },
            )
            .unwrap();
        assert_eq!(state.rockets_played(), 1);
        assert_eq!(state.bombs_played(), 0);
    }

    #[test]
    fn test_win_terminates_immediately() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 2);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);

        *state.hand_of_mut(&ids[0]) = cards(&["3H", "3D"]);
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["3H", "3D"]),
                },
            )
            .unwrap();
        assert_eq!(state.phase(), Phase::Terminated);
        assert_eq!(
            rules.apply(
                &mut state,
                &GameAction::Play {
                    player: ids[1],
                    cards: vec![]
                }
            ),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_scoring_spring_doubles_once_more() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 3);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);

        // Landlord wins without the farmers ever playing a card.
        *state.hand_of_mut(&ids[0]) = cards(&["3H", "3D"]);
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["3H", "3D"]),
                },
            )
            .unwrap();
        rules.score(&mut state);

        // base 3, spring doubles once: unit 6; one landlord vs two farmers.
        assert_eq!(state.scores().get(&ids[0]), Some(&12));
        assert_eq!(state.scores().get(&ids[1]), Some(&-6));
        assert_eq!(state.scores().get(&ids[2]), Some(&-6));
    }

    #[test]
    fn test_scoring_farmer_win_inverts_signs() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 0);
        bid(&rules, &mut state, ids[1], 2);
        bid(&rules, &mut state, ids[2], 0);
        assert_eq!(state.landlords(), &[ids[1]]);
        assert_eq!(state.current_player_id(), Some(ids[1]));

        // Landlord opens, then the next farmer in turn order beats the
        // single and empties their hand.
        *state.hand_of_mut(&ids[1]) = cards(&["3H", "4D", "6S"]);
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[1],
                    cards: cards(&["3H"]),
                },
            )
            .unwrap();
        *state.hand_of_mut(&ids[2]) = cards(&["KH"]);
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[2],
                    cards: cards(&["KH"]),
                },
            )
            .unwrap();
        assert_eq!(state.phase(), Phase::Terminated);
        rules.score(&mut state);

        // Farmer won but the landlord did play: no anti-spring, unit 2.
        assert_eq!(state.scores().get(&ids[1]), Some(&-4));
        assert_eq!(state.scores().get(&ids[0]), Some(&2));
        assert_eq!(state.scores().get(&ids[2]), Some(&2));
    }

    #[test]
    fn test_restart_preserves_scores_and_redeals() {
        let (rules, mut state, ids) = engine(3);
        rules.apply(&mut state, &GameAction::Start).unwrap();
        bid(&rules, &mut state, ids[0], 3);
        bid(&rules, &mut state, ids[1], 0);
        bid(&rules, &mut state, ids[2], 0);
        *state.hand_of_mut(&ids[0]) = cards(&["3H"]);
        rules
            .apply(
                &mut state,
                &GameAction::Play {
                    player: ids[0],
                    cards: cards(&["3H"]),
                },
            )
            .unwrap();
        rules.score(&mut state);
        let banked = *state.scores().get(&ids[0]).unwrap();
        assert!(banked > 0);

        rules.apply(&mut state, &GameAction::Start).unwrap();
        assert_eq!(state.phase(), Phase::Bidding);
        assert_eq!(state.scores().get(&ids[0]), Some(&banked));
        assert!(state.landlords().is_empty());
        for id in &ids {
            assert_eq!(state.hand_of(id).len(), 17);
        }
    }
}
