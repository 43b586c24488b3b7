//! Arcanum Save - Save files and persistence
//!
//! A save is one RON document: a version tag, a wall-clock timestamp, and
//! the complete [`GameState`]. Loading merges the saved state over a fresh
//! one so that content added after the save (new actions, new skills)
//! appears with default progression instead of being missing.

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{FileStore, MemoryStore, SaveStore};

use arcanum_core::{Content, GameState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// One serialized save slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: GameState,
}

/// Merge a saved state over a fresh playthrough
///
/// Saved progression wins everywhere it exists; entries the save has never
/// seen (content shipped after it was written) keep their new-game values.
pub fn default_fill(fresh: GameState, saved: GameState) -> GameState {
    let mut state = saved;

    for (id, entry) in fresh.actions {
        state.actions.entry(id).or_insert(entry);
    }
    for (id, entry) in fresh.skills {
        state.skills.entry(id).or_insert(entry);
    }
    for (id, amount) in fresh.resources {
        state.resources.entry(id).or_insert(amount);
    }
    for id in fresh.dungeons.unlocked {
        if !state.dungeons.unlocked.contains(&id) {
            state.dungeons.unlocked.push(id);
        }
    }
    for id in fresh.housing.owned_houses {
        if !state.housing.owned_houses.contains(&id) {
            state.housing.equipped_items.entry(id.clone()).or_default();
            state.housing.owned_houses.push(id);
        }
    }

    state
}

/// Load a playthrough from the store, or start a new one
pub fn load_or_new(
    store: &impl SaveStore,
    content: &Content,
    seed: u64,
) -> Result<GameState> {
    let fresh = GameState::new_game(content, seed);
    match store.load()? {
        Some(file) => Ok(default_fill(fresh, file.state)),
        None => Ok(fresh),
    }
}
