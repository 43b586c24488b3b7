//! Skill levelling
//!
//! Experience accumulates cumulatively and is never reset. Each tick a skill
//! may gain at most one level; a large experience grant levels up over
//! successive ticks. Crossing a milestone level resolves its bonus.

use crate::defs::{Content, SkillBonusEffect, SkillDef};
use crate::diff::StateDiff;
use crate::housing::HousingBonuses;
use crate::identity::SkillId;
use crate::state::{ActionState, GameState, SkillState};

/// Cumulative experience required to reach level `level + 1`
///
/// Within the table this is a direct lookup. Housing can raise a cap past
/// the table's end; beyond it the last increment repeats linearly.
pub fn xp_threshold(def: &SkillDef, level: u32) -> f64 {
    let table = &def.xp_table;
    if table.is_empty() {
        return f64::INFINITY;
    }
    let level = level as usize;
    if level < table.len() {
        return table[level];
    }
    let last = table[table.len() - 1];
    let increment = if table.len() >= 2 {
        last - table[table.len() - 2]
    } else {
        last.max(1.0)
    };
    last + increment * (level - (table.len() - 1)) as f64
}

/// Effective level cap for a skill: base table length plus housing bonuses
pub fn effective_cap(def: &SkillDef, bonuses: &HousingBonuses) -> u32 {
    def.xp_table.len() as u32 + bonuses.cap_bonus(&def.id)
}

/// Level up any skill whose experience has crossed its next threshold
///
/// At most one level per skill per call. Milestone bonuses fire exactly
/// once, at the moment the level is reached.
pub fn check_level_ups(state: &GameState, content: &Content) -> StateDiff {
    let mut diff = StateDiff::new();
    let bonuses = HousingBonuses::aggregate(state, content);
    // Slot grants from multiple skills levelling the same tick accumulate
    let mut slots = state.spells.slots;
    let mut slots_changed = false;

    for (skill_id, skill) in &state.skills {
        let Some(def) = content.skill(skill_id) else {
            continue;
        };
        let next = skill.level + 1;
        if next > effective_cap(def, &bonuses) {
            continue;
        }
        if skill.experience < xp_threshold(def, skill.level) {
            continue;
        }

        diff.skills.insert(
            skill_id.clone(),
            SkillState {
                level: next,
                experience: skill.experience,
            },
        );

        for bonus in def.bonuses.iter().filter(|b| b.level == next) {
            match &bonus.effect {
                SkillBonusEffect::UnlockAction(action_id) => {
                    unlock_action(state, &mut diff, action_id);
                }
                SkillBonusEffect::UnlockSkill(unlocked_skill) => {
                    // Every action that trains the skill becomes available
                    for (action_id, action_def) in &content.actions {
                        if action_def.skill_xp.contains_key(unlocked_skill) {
                            unlock_action(state, &mut diff, action_id);
                        }
                    }
                }
                SkillBonusEffect::SpellSlot { amount } => {
                    slots += amount;
                    slots_changed = true;
                }
            }
        }
    }

    if slots_changed {
        diff.spells.slots = Some(slots);
    }
    diff
}

/// Flip an action's unlocked flag, preserving its progression
fn unlock_action(state: &GameState, diff: &mut StateDiff, action_id: &crate::identity::ActionId) {
    let mut entry = diff
        .actions
        .get(action_id)
        .or_else(|| state.actions.get(action_id))
        .cloned()
        .unwrap_or_else(ActionState::locked);
    entry.unlocked = true;
    diff.actions.insert(action_id.clone(), entry);
}
