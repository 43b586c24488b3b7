//! Player actions
//!
//! Validation, execution, toggling and the scheduler that fires running
//! timed actions. Manual clicks go through [`try_execute`]; the tick
//! pipeline calls [`run_due`].

mod execute;
mod toggle;
mod validate;

pub use execute::execute;
pub use toggle::toggle;
pub use validate::can_execute;

use crate::defs::{ActionCategory, Content};
use crate::diff::StateDiff;
use crate::identity::ActionId;
use crate::state::GameState;

/// Validate and execute a manually triggered action
///
/// Unknown or currently invalid actions yield a no-op diff.
pub fn try_execute(state: &GameState, content: &Content, id: &ActionId) -> StateDiff {
    let Some(def) = content.action(id) else {
        return StateDiff::new();
    };
    if !can_execute(state, content, def) {
        return StateDiff::new();
    }
    execute(state, content, def)
}

/// Fire every running timed or study action whose interval has elapsed
///
/// A due action that fails validation (out of stamina, inputs, or at a
/// skill cap) deactivates itself instead of firing. Each due action
/// executes against the tick-start state; timers restart from the current
/// clock with no catch-up for missed intervals.
pub fn run_due(state: &GameState, content: &Content) -> StateDiff {
    let mut diff = StateDiff::new();

    for (id, entry) in &state.actions {
        if !entry.active {
            continue;
        }
        let Some(def) = content.action(id) else {
            continue;
        };
        if !matches!(def.category, ActionCategory::Timed | ActionCategory::Study) {
            continue;
        }

        let duration = if def.duration > 0.0 { def.duration } else { 1.0 };
        if state.clock - entry.last_execution < duration {
            continue;
        }

        if can_execute(state, content, def) {
            diff.merge(execute(state, content, def));
        } else {
            let mut entry = entry.clone();
            entry.active = false;
            diff.actions.insert(id.clone(), entry);
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::RankCurve;
    use crate::defs::ActionDef;
    use crate::identity::{ResourceId, SkillId};
    use indexmap::IndexMap;

    fn timed_def(id: &str, duration: f64) -> ActionDef {
        ActionDef {
            id: ActionId::new(id),
            name: id.to_string(),
            category: ActionCategory::Timed,
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            stamina_cost: 0.0,
            duration,
            skill_xp: IndexMap::new(),
            required_skill: None,
            unlock_cost: IndexMap::new(),
            unlock_effect: None,
            rank_curve: RankCurve::Timed,
            starter: true,
        }
    }

    fn content() -> Content {
        let mut content = Content::new();
        let mut enchant = timed_def("enchant-scrolls", 4.0);
        enchant.inputs.insert(ResourceId::new("scrolls"), 1.0);
        enchant
            .outputs
            .insert(ResourceId::new("enchanted scrolls"), 1.0);
        enchant.skill_xp.insert(SkillId::new("arcane"), 2.0);
        content.actions.insert(enchant.id.clone(), enchant);
        content
    }

    fn running_state(scrolls: f64) -> GameState {
        let mut state = GameState::new_game(&content(), 1);
        state.resources.insert(ResourceId::new("scrolls"), scrolls);
        let diff = toggle(&state, &content(), &ActionId::new("enchant-scrolls"));
        diff.apply(&mut state);
        state
    }

    #[test]
    fn test_not_due_before_interval() {
        let mut state = running_state(5.0);
        state.clock = 3.9;
        assert!(run_due(&state, &content()).is_empty());
    }

    #[test]
    fn test_fires_when_due() {
        let mut state = running_state(5.0);
        state.clock = 4.0;
        let diff = run_due(&state, &content());
        diff.apply(&mut state);

        assert_eq!(state.resource(&ResourceId::new("scrolls")), 4.0);
        assert_eq!(state.resource(&ResourceId::new("enchanted scrolls")), 1.0);
        let entry = &state.actions[&ActionId::new("enchant-scrolls")];
        assert!(entry.active);
        // Timer restarts from the firing tick, not from the due time
        assert_eq!(entry.last_execution, 4.0);
    }

    #[test]
    fn test_no_catch_up_after_long_gap() {
        let mut state = running_state(5.0);
        // Three intervals pass in one gap; only one firing results
        state.clock = 12.5;
        let diff = run_due(&state, &content());
        diff.apply(&mut state);
        assert_eq!(state.resource(&ResourceId::new("scrolls")), 4.0);
        assert_eq!(
            state.actions[&ActionId::new("enchant-scrolls")].last_execution,
            12.5
        );
    }

    #[test]
    fn test_deactivates_when_inputs_run_out() {
        let mut state = running_state(0.0);
        state.clock = 4.0;
        let diff = run_due(&state, &content());
        diff.apply(&mut state);
        assert!(!state.actions[&ActionId::new("enchant-scrolls")].active);
        assert_eq!(state.resource(&ResourceId::new("enchanted scrolls")), 0.0);
    }

    #[test]
    fn test_try_execute_unknown_action() {
        let state = GameState::default();
        let diff = try_execute(&state, &content(), &ActionId::new("no-such-action"));
        assert!(diff.is_empty());
    }
}
