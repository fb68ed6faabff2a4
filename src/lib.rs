//! # Doudizhu
//!
//! A rules engine for Dou Dizhu, the landlord-versus-peasants climbing
//! card game, played with one or more 54-card decks by 3 to 12 players.
//!
//! Starting from a shuffled pool the engine deterministically resolves
//! bidding, landlord selection (snake draft for multi-landlord tables),
//! turn-based card play, combination validation, play comparison, and
//! end-of-round scoring with compounding multipliers.
//!
//! ## Architecture
//!
//! All mutation flows through a single entry point per game instance:
//!
//! - [`GameLoop`] serializes externally submitted [`GameAction`]s and
//!   applies them one at a time, atomically, against the state.
//! - [`RulesEngine`] validates each action for the current [`Phase`]
//!   (`Lobby -> Bidding -> Play -> Terminated`, with a restart edge back
//!   through a fresh deal) and mutates [`GameState`] on success.
//! - [`game::combos::detect`] classifies raw card piles into canonical
//!   shapes; [`game::compare::compare`] ranks two classified plays under
//!   the trump rules (rockets over bombs over everything else).
//!
//! Networking, persistence, accounts, and matchmaking are the host's
//! business: the engine assumes an already-resolved, ordered player list
//! and a fixed [`GameConfig`], and exposes redacted per-player
//! [`game::views::GameView`]s for transmission.
//!
//! ## Example
//!
//! ```
//! use doudizhu::{GameAction, GameLoop, GameState, PlayerId, RulesEngine};
//!
//! let rules = RulesEngine::standard(3).unwrap();
//! let players: Vec<PlayerId> = (0..3).map(|_| PlayerId::new()).collect();
//! let state = GameState::new("table-1", &players);
//! let mut game = GameLoop::new(rules, state);
//!
//! // Deal and open bidding.
//! game.submit_and_tick(GameAction::Start).unwrap();
//! ```

pub mod game;
pub use game::{
    actions::GameAction,
    combos::{ComboType, PlayedHand},
    config::GameConfig,
    entities::{Card, PlayerId, Rank, Suit},
    errors::{ConfigError, GameError},
    game_loop::GameLoop,
    rules::RulesEngine,
    state::{GameState, Phase},
    views::{GameView, GameViews},
};
