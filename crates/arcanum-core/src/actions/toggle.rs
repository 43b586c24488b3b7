//! Timed-action toggling
//!
//! Only one timed or study action runs at a time. Activating one
//! deactivates whatever else was running; toggling a running action just
//! stops it.

use crate::defs::{ActionCategory, Content};
use crate::diff::StateDiff;
use crate::identity::ActionId;
use crate::state::GameState;

/// Flip a timed or study action's active flag
///
/// Activation stamps `last_execution` with the current clock so the first
/// automatic firing comes one full duration later. Non-toggleable
/// categories yield a no-op diff.
pub fn toggle(state: &GameState, content: &Content, id: &ActionId) -> StateDiff {
    let Some(def) = content.action(id) else {
        return StateDiff::new();
    };
    if !matches!(def.category, ActionCategory::Timed | ActionCategory::Study) {
        return StateDiff::new();
    }
    let Some(entry) = state.actions.get(id) else {
        return StateDiff::new();
    };
    if !entry.unlocked {
        return StateDiff::new();
    }

    let mut diff = StateDiff::new();

    if entry.active {
        let mut entry = entry.clone();
        entry.active = false;
        diff.actions.insert(id.clone(), entry);
        return diff;
    }

    // Exclusivity: stop whatever else is running
    for (other_id, other) in &state.actions {
        if other.active && other_id != id {
            let mut other = other.clone();
            other.active = false;
            diff.actions.insert(other_id.clone(), other);
        }
    }

    let mut entry = entry.clone();
    entry.active = true;
    entry.last_execution = state.clock;
    diff.actions.insert(id.clone(), entry);
    diff
}
