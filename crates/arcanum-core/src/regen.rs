//! Passive regeneration
//!
//! Runs first in the tick pipeline: stamina and health tick toward their
//! maxima and passive generation from housing drips into the ledger.

use crate::defs::Content;
use crate::diff::StateDiff;
use crate::housing::HousingBonuses;
use crate::state::GameState;

/// Regenerate pools and apply housing passive generation over `delta` seconds
///
/// Health is left alone while combat is active so the combat subsystem's
/// damage writes are the only health writes that tick. Housing health regen
/// stacks on the base pool rate.
pub fn update(state: &GameState, content: &Content, delta: f64) -> StateDiff {
    let mut diff = StateDiff::new();
    let bonuses = HousingBonuses::aggregate(state, content);

    let stamina = &state.special.stamina;
    if !stamina.is_full() {
        let next = (stamina.current + stamina.regen_rate * delta).min(stamina.max);
        diff.special.stamina.current = Some(next);
    }

    let health = &state.special.health;
    if !state.combat.active && !health.is_full() {
        let rate = health.regen_rate + bonuses.health_regen;
        let next = (health.current + rate * delta).min(health.max);
        diff.special.health.current = Some(next);
    }

    for (resource, rate) in &bonuses.passive_gen {
        diff.resources
            .insert(resource.clone(), state.resource(resource) + rate * delta);
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{HousingEffect, HousingItemDef};
    use crate::identity::{HouseId, ItemId, ResourceId};
    use indexmap::IndexMap;

    #[test]
    fn test_stamina_regen_clamps_at_max() {
        let mut state = GameState::default();
        state.special.stamina.current = 9.95;
        let diff = update(&state, &Content::new(), 1.0);
        // 9.95 + 0.2 clamps to 10
        assert_eq!(diff.special.stamina.current, Some(10.0));
    }

    #[test]
    fn test_full_pools_not_written() {
        let state = GameState::default();
        let diff = update(&state, &Content::new(), 1.0);
        assert!(diff.special.stamina.current.is_none());
        assert!(diff.special.health.current.is_none());
    }

    #[test]
    fn test_health_regen_paused_in_combat() {
        let mut state = GameState::default();
        state.special.health.current = 50.0;
        state.combat.active = true;
        let diff = update(&state, &Content::new(), 1.0);
        assert!(diff.special.health.current.is_none());

        state.combat.active = false;
        let diff = update(&state, &Content::new(), 1.0);
        assert_eq!(diff.special.health.current, Some(50.1));
    }

    #[test]
    fn test_passive_generation() {
        let mut content = Content::new();
        content.housing_items.insert(
            ItemId::new("gold-reserve"),
            HousingItemDef {
                id: ItemId::new("gold-reserve"),
                name: "Gold Reserve".to_string(),
                description: String::new(),
                space: 1,
                cost: IndexMap::new(),
                effect: HousingEffect::PassiveGen {
                    resource: ResourceId::new("gold"),
                    rate: 0.2,
                },
                requires_unlock: false,
            },
        );

        let mut state = GameState::default();
        state.resources.insert(ResourceId::new("gold"), 10.0);
        state
            .housing
            .equipped_items
            .insert(HouseId::new("shelter"), vec![ItemId::new("gold-reserve")]);

        let diff = update(&state, &content, 0.5);
        assert_eq!(diff.resources[&ResourceId::new("gold")], 10.1);
    }
}
