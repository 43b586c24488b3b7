//! Defeat resolution and respawning

use crate::defs::Content;
use crate::diff::StateDiff;
use crate::identity::EnemyId;
use crate::state::{Enemy, GameState};

use super::log::{CombatLog, LogEntry};
use super::{PLAYER_ATTACK_INTERVAL, REVIVE_HEALTH_FRACTION};

/// Grant a fallen enemy's rewards and immediately spawn the next one
///
/// The respawn clears the log; the new fight's log opens with the single
/// defeat entry.
pub(super) fn enemy_defeated(state: &GameState, content: &Content, enemy: &Enemy) -> StateDiff {
    let mut diff = StateDiff::new();

    for (resource, amount) in &enemy.rewards {
        diff.resources
            .insert(resource.clone(), state.resource(resource) + amount);
    }

    diff.merge(spawn(state, content));

    let mut log = CombatLog::new();
    log.push(LogEntry::enemy_defeat(&enemy.name, state.clock));
    diff.combat.log = Some(log);
    diff
}

/// Reset combat and revive the player at half health
pub(super) fn player_defeated(state: &GameState) -> StateDiff {
    let mut diff = StateDiff::new();
    diff.combat.active = Some(false);
    diff.combat.enemy = Some(None);
    diff.combat.player_timer = Some(0.0);
    diff.combat.enemy_timer = Some(0.0);
    diff.combat.log = Some(CombatLog::new());
    diff.special.health.current = Some(state.special.health.max * REVIVE_HEALTH_FRACTION);
    diff
}

/// Draw the next enemy, reset both attack timers and clear the log
///
/// The pool is the selected dungeon's enemy list (duplicates weight the
/// draw), or every known enemy when no dungeon is selected. Advances the
/// shared RNG. No-op diff if the pool is empty.
pub(super) fn spawn(state: &GameState, content: &Content) -> StateDiff {
    let pool: Vec<EnemyId> = match state
        .dungeons
        .selected
        .as_ref()
        .and_then(|id| content.dungeon(id))
    {
        Some(dungeon) => dungeon
            .enemies
            .iter()
            .filter(|id| content.enemy(id).is_some())
            .cloned()
            .collect(),
        None => content.enemies.keys().cloned().collect(),
    };
    if pool.is_empty() {
        return StateDiff::new();
    }

    let mut rng = state.rng.clone();
    let mut diff = StateDiff::new();
    if let Some(def) = rng.pick(&pool).and_then(|id| content.enemy(id)) {
        let enemy = Enemy::from_def(def);
        diff.combat.enemy_timer = Some(enemy.attack_interval);
        diff.combat.enemy = Some(Some(enemy));
        diff.combat.player_timer = Some(PLAYER_ATTACK_INTERVAL);
        diff.combat.log = Some(CombatLog::new());
    }
    diff.rng = Some(rng);
    diff
}
