//! Action validation
//!
//! One predicate decides whether an action can fire right now, shared by
//! manual execution and the timed-action scheduler.

use crate::defs::{ActionCategory, ActionDef, Content};
use crate::housing::HousingBonuses;
use crate::skills;
use crate::state::GameState;

/// Whether an action can execute against the current state
///
/// Unlock purchases are gated only by presence and affordability. Everything
/// else requires the unlocked flag, enough stamina, covered inputs, any skill
/// requirement, and (for study actions) a target skill still below its cap.
pub fn can_execute(state: &GameState, content: &Content, def: &ActionDef) -> bool {
    let Some(entry) = state.actions.get(&def.id) else {
        return false;
    };

    if def.category == ActionCategory::Unlock {
        return state.can_afford(&def.unlock_cost);
    }

    // Starter actions are always available regardless of the flag
    if !entry.unlocked && !def.starter {
        return false;
    }
    if state.special.stamina.current < def.stamina_cost {
        return false;
    }
    if !state.can_afford(&def.inputs) {
        return false;
    }
    if let Some(req) = &def.required_skill {
        if state.skill_level(&req.skill) < req.level {
            return false;
        }
    }
    if def.category == ActionCategory::Study {
        // Studying past the cap would waste the experience
        if let Some(target) = def.skill_xp.keys().next() {
            if let (Some(skill_def), Some(skill)) =
                (content.skill(target), state.skills.get(target))
            {
                let bonuses = HousingBonuses::aggregate(state, content);
                if skill.level >= skills::effective_cap(skill_def, &bonuses) {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::RankCurve;
    use crate::defs::{SkillDef, SkillRequirement};
    use crate::identity::{ActionId, ResourceId, SkillId};
    use crate::state::{ActionState, SkillState};
    use indexmap::IndexMap;

    fn base_def(id: &str, category: ActionCategory) -> ActionDef {
        ActionDef {
            id: ActionId::new(id),
            name: id.to_string(),
            category,
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            stamina_cost: 0.0,
            duration: 0.0,
            skill_xp: IndexMap::new(),
            required_skill: None,
            unlock_cost: IndexMap::new(),
            unlock_effect: None,
            rank_curve: RankCurve::None,
            starter: false,
        }
    }

    fn state_with(def: &ActionDef) -> GameState {
        let mut state = GameState::default();
        state
            .actions
            .insert(def.id.clone(), ActionState::unlocked());
        state
    }

    #[test]
    fn test_stamina_gate() {
        let mut def = base_def("gain-gold", ActionCategory::Resource);
        def.stamina_cost = 1.0;
        let mut state = state_with(&def);
        assert!(can_execute(&state, &Content::new(), &def));

        state.special.stamina.current = 0.5;
        assert!(!can_execute(&state, &Content::new(), &def));
    }

    #[test]
    fn test_input_gate() {
        let mut def = base_def("write-scrolls", ActionCategory::Resource);
        def.inputs.insert(ResourceId::new("gold"), 2.0);
        let mut state = state_with(&def);
        assert!(!can_execute(&state, &Content::new(), &def));

        state.resources.insert(ResourceId::new("gold"), 2.0);
        assert!(can_execute(&state, &Content::new(), &def));
    }

    #[test]
    fn test_locked_action_rejected() {
        let def = base_def("gain-gold", ActionCategory::Resource);
        let mut state = state_with(&def);
        state.actions.get_mut(&def.id).unwrap().unlocked = false;
        assert!(!can_execute(&state, &Content::new(), &def));
    }

    #[test]
    fn test_starter_action_bypasses_lock() {
        // An old save can carry a starter action with the flag still down
        let mut def = base_def("gain-gold", ActionCategory::Resource);
        def.starter = true;
        let mut state = state_with(&def);
        state.actions.get_mut(&def.id).unwrap().unlocked = false;
        assert!(can_execute(&state, &Content::new(), &def));
    }

    #[test]
    fn test_skill_requirement() {
        let mut def = base_def("enchant-scrolls", ActionCategory::Timed);
        def.required_skill = Some(SkillRequirement {
            skill: SkillId::new("arcane"),
            level: 3,
        });
        let mut state = state_with(&def);
        // Untrained skills read as level 1
        assert!(!can_execute(&state, &Content::new(), &def));

        state.skills.insert(
            SkillId::new("arcane"),
            SkillState {
                level: 3,
                experience: 150.0,
            },
        );
        assert!(can_execute(&state, &Content::new(), &def));
    }

    #[test]
    fn test_unlock_needs_only_cost() {
        let mut def = base_def("learn-spellcasting", ActionCategory::Unlock);
        def.unlock_cost.insert(ResourceId::new("gold"), 10.0);
        let mut state = state_with(&def);
        assert!(!can_execute(&state, &Content::new(), &def));

        state.resources.insert(ResourceId::new("gold"), 10.0);
        assert!(can_execute(&state, &Content::new(), &def));
    }

    #[test]
    fn test_study_blocked_at_cap() {
        let mut def = base_def("study-arcane", ActionCategory::Study);
        def.skill_xp.insert(SkillId::new("arcane"), 5.0);

        let mut content = Content::new();
        content.skills.insert(
            SkillId::new("arcane"),
            SkillDef {
                id: SkillId::new("arcane"),
                name: "Arcane".to_string(),
                xp_table: vec![0.0, 50.0],
                bonuses: Vec::new(),
            },
        );

        let mut state = state_with(&def);
        state.skills.insert(
            SkillId::new("arcane"),
            SkillState {
                level: 2,
                experience: 50.0,
            },
        );
        assert!(!can_execute(&state, &content, &def));

        state.skills.get_mut(&SkillId::new("arcane")).unwrap().level = 1;
        assert!(can_execute(&state, &content, &def));
    }
}
