//! Attack timers and damage exchange

use crate::defs::Content;
use crate::diff::StateDiff;
use crate::state::GameState;

use super::log::LogEntry;
use super::{defeat, PLAYER_ATTACK_INTERVAL};

/// Player damage per hit: base plus arcane level plus housing bonuses
pub fn player_damage(state: &GameState, content: &Content) -> f64 {
    let bonuses = crate::housing::HousingBonuses::aggregate(state, content);
    super::PLAYER_BASE_DAMAGE
        + state.skill_level(&"arcane".into()) as f64
        + bonuses.combat_damage
}

/// Advance both attack timers by `delta`, landing any attacks that come due
///
/// Both sides act against the tick-start state. A killing blow leaves the
/// corpse in place; defeat is resolved at the start of the next combat tick,
/// so a simultaneous enemy attack still lands.
pub(super) fn exchange(
    state: &GameState,
    content: &Content,
    enemy: &crate::state::Enemy,
    delta: f64,
) -> StateDiff {
    let mut diff = StateDiff::new();
    let mut log = state.combat.log.clone();

    let player_timer = state.combat.player_timer - delta;
    if player_timer <= 0.0 {
        let damage = player_damage(state, content);
        let mut enemy = enemy.clone();
        enemy.health -= damage;
        log.push(LogEntry::player_attack(&enemy.name, damage, state.clock));
        diff.combat.enemy = Some(Some(enemy));
        diff.combat.player_timer = Some(PLAYER_ATTACK_INTERVAL);
    } else {
        diff.combat.player_timer = Some(player_timer);
    }

    let enemy_timer = state.combat.enemy_timer - delta;
    if enemy_timer <= 0.0 {
        let health = state.special.health.current - enemy.damage;
        log.push(LogEntry::enemy_attack(&enemy.name, enemy.damage, state.clock));
        diff.combat.enemy_timer = Some(enemy.attack_interval);

        if health <= 0.0 {
            diff.merge(defeat::player_defeated(state));
            return diff;
        }
        diff.special.health.current = Some(health);
    } else {
        diff.combat.enemy_timer = Some(enemy_timer);
    }

    diff.combat.log = Some(log);
    diff
}
