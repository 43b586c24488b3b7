//! Action execution
//!
//! Turns one validated execution into a diff: costs out, bonused outputs
//! in, experience granted, progression bumped. Unlock purchases apply their
//! permanent effect and then remove themselves.

use crate::defs::{ActionCategory, ActionDef, Content, UnlockEffect};
use crate::diff::StateDiff;
use crate::housing::HousingBonuses;
use crate::state::{ActionState, GameState};

/// Execute an action the caller has already validated
///
/// Callers go through [`try_execute`](crate::actions::try_execute) unless
/// they validated themselves (the scheduler does, to deactivate failures).
pub fn execute(state: &GameState, content: &Content, def: &ActionDef) -> StateDiff {
    if def.category == ActionCategory::Unlock {
        return execute_unlock(state, def);
    }

    let mut diff = StateDiff::new();
    let bonuses = HousingBonuses::aggregate(state, content);
    let multiplier = 1.0
        + def.rank_curve.bonus_for(execution_count(state, def))
        + bonuses.action_bonus_for(def.skill_xp.keys());

    for (resource, amount) in &def.inputs {
        diff.resources
            .insert(resource.clone(), state.resource(resource) - amount);
    }

    // Stamina cost and any stamina output fold into one write
    let mut stamina = state.special.stamina.current - def.stamina_cost;
    let mut stamina_touched = def.stamina_cost > 0.0;

    for (resource, amount) in &def.outputs {
        let gained = amount * multiplier;
        if resource.as_str() == "stamina" {
            stamina += gained;
            stamina_touched = true;
        } else {
            let base = diff
                .resources
                .get(resource)
                .copied()
                .unwrap_or_else(|| state.resource(resource));
            diff.resources.insert(resource.clone(), base + gained);
        }
    }

    if stamina_touched {
        diff.special.stamina.current =
            Some(stamina.clamp(0.0, state.special.stamina.max));
    }

    grant_experience(state, def, &mut diff);

    let mut entry = state
        .actions
        .get(&def.id)
        .cloned()
        .unwrap_or_else(ActionState::unlocked);
    entry.execution_count += 1;
    entry.last_execution = state.clock;
    diff.actions.insert(def.id.clone(), entry);

    diff
}

fn execute_unlock(state: &GameState, def: &ActionDef) -> StateDiff {
    let mut diff = StateDiff::new();

    for (resource, amount) in &def.unlock_cost {
        diff.resources
            .insert(resource.clone(), state.resource(resource) - amount);
    }

    match &def.unlock_effect {
        Some(UnlockEffect::SpellSlot { amount }) => {
            diff.spells.slots = Some(state.spells.slots + amount);
        }
        Some(UnlockEffect::Action(action_id)) => {
            let mut entry = state
                .actions
                .get(action_id)
                .cloned()
                .unwrap_or_else(ActionState::locked);
            entry.unlocked = true;
            diff.actions.insert(action_id.clone(), entry);
        }
        Some(UnlockEffect::HousingItem(item_id)) => {
            let mut housing = state.housing.clone();
            if !housing.unlocked_items.contains(item_id) {
                housing.unlocked_items.push(item_id.clone());
            }
            diff.housing = Some(housing);
        }
        None => {}
    }

    grant_experience(state, def, &mut diff);

    // One-shot: the purchase consumes the action itself
    diff.actions_removed.push(def.id.clone());
    diff
}

fn grant_experience(state: &GameState, def: &ActionDef, diff: &mut StateDiff) {
    for (skill_id, xp) in &def.skill_xp {
        let mut skill = state
            .skills
            .get(skill_id)
            .cloned()
            .unwrap_or_default();
        skill.experience += xp;
        diff.skills.insert(skill_id.clone(), skill);
    }
}

fn execution_count(state: &GameState, def: &ActionDef) -> u64 {
    state
        .actions
        .get(&def.id)
        .map_or(0, |entry| entry.execution_count)
}
