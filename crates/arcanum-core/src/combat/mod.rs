//! Combat
//!
//! An autobattler state machine: while combat is active the player and one
//! enemy trade attacks on independent timers. Defeated enemies pay out
//! rewards and the next one spawns immediately; a defeated player revives
//! at half health with combat ended.

mod attack;
mod defeat;
pub mod log;

pub use attack::player_damage;

use crate::defs::Content;
use crate::diff::StateDiff;
use crate::identity::DungeonId;
use crate::state::GameState;

/// Seconds between player attacks
pub const PLAYER_ATTACK_INTERVAL: f64 = 2.5;
/// Player damage before skill and housing bonuses
pub const PLAYER_BASE_DAMAGE: f64 = 5.0;
/// Fraction of max health restored on player defeat
pub const REVIVE_HEALTH_FRACTION: f64 = 0.5;

/// Advance combat by `delta` seconds
///
/// Resolution order per tick: spawn if the slot is empty, otherwise settle
/// a defeat recorded last tick (by attack or spell), otherwise exchange
/// attacks. All reads are against the tick-start state.
pub fn update(state: &GameState, content: &Content, delta: f64) -> StateDiff {
    if !state.combat.active {
        return StateDiff::new();
    }

    match &state.combat.enemy {
        None => defeat::spawn(state, content),
        Some(enemy) if enemy.is_defeated() => defeat::enemy_defeated(state, content, enemy),
        Some(enemy) => attack::exchange(state, content, enemy, delta),
    }
}

/// Enter combat, spawning the first enemy from the current pool
pub fn start(state: &GameState, content: &Content) -> StateDiff {
    if state.combat.active {
        return StateDiff::new();
    }
    let mut diff = defeat::spawn(state, content);
    if diff.is_empty() {
        // Nothing to fight
        return diff;
    }
    diff.combat.active = Some(true);
    diff
}

/// Leave combat, despawning the current enemy
pub fn stop(state: &GameState) -> StateDiff {
    if !state.combat.active {
        return StateDiff::new();
    }
    let mut diff = StateDiff::new();
    diff.combat.active = Some(false);
    diff.combat.enemy = Some(None);
    diff.combat.player_timer = Some(0.0);
    diff.combat.enemy_timer = Some(0.0);
    diff
}

/// Choose the dungeon whose pool feeds future spawns
///
/// Requires the arcane level the dungeon demands; first selection also
/// records the dungeon as unlocked. No-op diff when the requirement is
/// unmet or the dungeon is unknown.
pub fn select_dungeon(state: &GameState, content: &Content, id: &DungeonId) -> StateDiff {
    let Some(def) = content.dungeon(id) else {
        return StateDiff::new();
    };
    if state.skill_level(&"arcane".into()) < def.level_requirement {
        return StateDiff::new();
    }

    let mut dungeons = state.dungeons.clone();
    if !dungeons.unlocked.contains(id) {
        dungeons.unlocked.push(id.clone());
    }
    dungeons.selected = Some(id.clone());

    let mut diff = StateDiff::new();
    diff.dungeons = Some(dungeons);
    diff
}
