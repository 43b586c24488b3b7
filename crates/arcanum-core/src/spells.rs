//! Spells
//!
//! Equipped spells cool down in real time and fire automatically at the
//! current enemy whenever ready during combat. Slots gate how many spells
//! can be equipped at once.

use crate::combat::log::LogEntry;
use crate::defs::Content;
use crate::diff::StateDiff;
use crate::housing::HousingBonuses;
use crate::identity::SpellId;
use crate::state::GameState;

/// Auto-cast every ready equipped spell and advance cooldowns by `delta`
///
/// Runs only while an enemy is engaged: a cooldown freezes when combat ends
/// and resumes on re-engage. The tick that drains a cooldown to zero does
/// not cast; the spell fires on the next. Casts read the tick-start enemy;
/// multiple spells ready on the same tick stack their damage. Housing
/// cooldown reduction shortens the cooldown set by an auto-cast.
pub fn update(state: &GameState, content: &Content, delta: f64) -> StateDiff {
    let mut diff = StateDiff::new();

    if !state.combat.active {
        return diff;
    }
    let Some(enemy) = &state.combat.enemy else {
        return diff;
    };

    let mut ready = Vec::new();
    for spell in &state.spells.equipped {
        let remaining = state.spells.cooldowns.get(spell).copied().unwrap_or(0.0);
        if remaining > 0.0 {
            diff.spells
                .cooldowns
                .insert(spell.clone(), (remaining - delta).max(0.0));
        } else {
            ready.push(spell.clone());
        }
    }

    if enemy.is_defeated() {
        return diff;
    }

    let bonuses = HousingBonuses::aggregate(state, content);
    let cooldown_scale = 1.0 - bonuses.cooldown_reduction;

    let mut enemy = enemy.clone();
    let mut log = state.combat.log.clone();
    let mut cast_any = false;

    for spell_id in &ready {
        let Some(def) = content.spell(spell_id) else {
            continue;
        };
        enemy.health -= def.damage;
        log.push(LogEntry::spell_cast(&def.name, &enemy.name, def.damage, state.clock));
        diff.spells
            .cooldowns
            .insert(spell_id.clone(), def.cooldown * cooldown_scale);
        cast_any = true;
    }

    if cast_any {
        diff.combat.enemy = Some(Some(enemy));
        diff.combat.log = Some(log);
    }
    diff
}

/// Whether a manual cast of `spell_id` would land right now
///
/// The spell must be equipped and off cooldown, with a live enemy engaged.
/// Hosts use this to gate the cast button.
pub fn can_cast(state: &GameState, spell_id: &SpellId) -> bool {
    if !state.spells.equipped.contains(spell_id) || !state.spells.is_ready(spell_id) {
        return false;
    }
    if !state.combat.active {
        return false;
    }
    matches!(&state.combat.enemy, Some(enemy) if !enemy.is_defeated())
}

/// Manually cast an equipped, ready spell at the current enemy
///
/// No-op diff whenever [`can_cast`] says no.
pub fn cast(state: &GameState, content: &Content, spell_id: &SpellId) -> StateDiff {
    let Some(def) = content.spell(spell_id) else {
        return StateDiff::new();
    };
    if !can_cast(state, spell_id) {
        return StateDiff::new();
    }
    let Some(enemy) = &state.combat.enemy else {
        return StateDiff::new();
    };

    let mut enemy = enemy.clone();
    enemy.health -= def.damage;
    let mut log = state.combat.log.clone();
    log.push(LogEntry::spell_cast(&def.name, &enemy.name, def.damage, state.clock));

    let mut diff = StateDiff::new();
    diff.combat.enemy = Some(Some(enemy));
    diff.combat.log = Some(log);
    diff.spells.cooldowns.insert(spell_id.clone(), def.cooldown);
    diff
}

/// Equip a spell into a free slot
pub fn equip(state: &GameState, content: &Content, spell_id: &SpellId) -> StateDiff {
    if content.spell(spell_id).is_none() {
        return StateDiff::new();
    }
    if state.spells.equipped.contains(spell_id) {
        return StateDiff::new();
    }
    if state.spells.equipped.len() as u32 >= state.spells.slots {
        return StateDiff::new();
    }

    let mut equipped = state.spells.equipped.clone();
    equipped.push(spell_id.clone());
    let mut diff = StateDiff::new();
    diff.spells.equipped = Some(equipped);
    diff
}

/// Remove a spell from its slot; its cooldown state is kept
pub fn unequip(state: &GameState, spell_id: &SpellId) -> StateDiff {
    if !state.spells.equipped.contains(spell_id) {
        return StateDiff::new();
    }
    let mut equipped = state.spells.equipped.clone();
    equipped.retain(|s| s != spell_id);
    let mut diff = StateDiff::new();
    diff.spells.equipped = Some(equipped);
    diff
}
