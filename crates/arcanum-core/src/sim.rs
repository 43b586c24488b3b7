//! Simulation driver
//!
//! Owns the authoritative [`GameState`] and is its only writer. Everything
//! else reads snapshots and produces diffs; the driver applies them.

use crate::command::{self, Command};
use crate::defs::Content;
use crate::error::Result;
use crate::state::GameState;
use crate::tick;

/// The authoritative simulation: content tables plus one live state
#[derive(Debug, Clone)]
pub struct Simulation {
    content: Content,
    state: GameState,
}

impl Simulation {
    /// Start a fresh playthrough
    pub fn new(content: Content, seed: u64) -> Self {
        let state = GameState::new_game(&content, seed);
        Self { content, state }
    }

    /// Resume from a loaded state
    pub fn with_state(content: Content, state: GameState) -> Self {
        Self { content, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Advance the simulation by `delta` seconds (clamped per tick rules)
    pub fn tick(&mut self, delta: f64) {
        tick::run_tick(&mut self.state, &self.content, delta);
    }

    /// Apply a player command between ticks
    pub fn handle(&mut self, command: &Command) -> Result<()> {
        let diff = command::dispatch(&self.state, &self.content, command)?;
        diff.apply(&mut self.state);
        Ok(())
    }

    /// Take the state out of the driver (for saving)
    pub fn into_state(self) -> GameState {
        self.state
    }
}
