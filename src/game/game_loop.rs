//! Single-threaded action serialization for one game instance.
//!
//! The loop owns the state; external callers only enqueue actions and
//! read. Each tick drains the queue one action at a time to completion,
//! so every apply is atomic: an action either fully mutates the state and
//! lands in the action log, or is rejected with no trace. Terminal
//! scoring runs exactly once per round, directly after the state turns
//! terminal.

use std::collections::VecDeque;

use log::warn;

use super::actions::GameAction;
use super::errors::GameError;
use super::rules::RulesEngine;
use super::state::GameState;

pub struct GameLoop {
    rules: RulesEngine,
    state: GameState,
    inbox: VecDeque<GameAction>,
    scored: bool,
}

impl GameLoop {
    #[must_use]
    pub fn new(rules: RulesEngine, state: GameState) -> Self {
        Self {
            rules,
            state,
            inbox: VecDeque::new(),
            scored: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Enqueue without processing. Call [`Self::tick`] to drain.
    pub fn submit(&mut self, action: GameAction) {
        self.inbox.push_back(action);
    }

    /// Process all queued actions in order. Stops at the first rejection
    /// and returns it to the caller; the rejected action is dropped, the
    /// rest of the queue stays put, and the state carries no trace of the
    /// rejected action.
    pub fn tick(&mut self) -> Result<(), GameError> {
        while let Some(action) = self.inbox.pop_front() {
            if let Err(err) = self.rules.apply(&mut self.state, &action) {
                warn!("game {}: rejected {action}: {err}", self.state.game_id());
                return Err(err);
            }
            self.state.append_action(action);
            if self.rules.is_terminal(&self.state) {
                self.settle();
            } else {
                // A live round is underway (covers the restart path).
                self.scored = false;
            }
        }
        Ok(())
    }

    /// Convenience for hosts that map one inbound message to one action.
    pub fn submit_and_tick(&mut self, action: GameAction) -> Result<(), GameError> {
        self.submit(action);
        self.tick()
    }

    fn settle(&mut self) {
        if !self.scored {
            self.rules.score(&mut self.state);
            self.scored = true;
        }
    }
}
