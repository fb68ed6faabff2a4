//! Core rules engine: cards, combination detection, play comparison, the
//! phase state machine, and the serialized action loop.
//!
//! - [`entities`]: cards, decks, the rank-strength table, player ids
//! - [`config`]: validated table setup and standard presets
//! - [`combos`]: combination detection (first-match-wins matcher chain)
//! - [`compare`]: trump-aware play comparison
//! - [`actions`] / [`errors`]: the external action envelope and rejections
//! - [`state`]: the mutable aggregate for one game instance
//! - [`rules`]: action validation and phase transitions
//! - [`game_loop`]: one-at-a-time action serialization and scoring
//! - [`views`]: per-player redacted projections

pub mod actions;
pub mod combos;
pub mod compare;
pub mod config;
pub mod entities;
pub mod errors;
pub mod game_loop;
pub mod rules;
pub mod state;
pub mod views;
