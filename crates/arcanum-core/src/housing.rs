//! Housing bonuses and operations
//!
//! Equipped housing items grant passive effects. [`HousingBonuses`] folds
//! every equipped item into one flat summary that the other subsystems read;
//! it is recomputed from state each time rather than cached, so equipping or
//! unequipping takes effect on the next read.

use indexmap::IndexMap;

use crate::defs::{Content, HousingEffect};
use crate::diff::StateDiff;
use crate::identity::{HouseId, ItemId, ResourceId, SkillId};
use crate::state::GameState;

/// Flat sum of every equipped housing item's effect
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousingBonuses {
    /// Extra levels on a specific skill's cap
    pub skill_cap: IndexMap<SkillId, u32>,
    /// Extra levels on every skill's cap
    pub skill_cap_all: u32,
    /// Resources generated per second
    pub passive_gen: IndexMap<ResourceId, f64>,
    /// Fractional output bonus for actions training a specific skill
    pub action_bonus: IndexMap<SkillId, f64>,
    /// Fractional output bonus for every action
    pub action_bonus_all: f64,
    /// Flat bonus to player attack damage
    pub combat_damage: f64,
    /// Flat bonus to health regeneration per second
    pub health_regen: f64,
    /// Fractional reduction of spell cooldowns, capped below 1.0
    pub cooldown_reduction: f64,
}

impl HousingBonuses {
    /// Sum the effects of every item equipped in every owned house
    pub fn aggregate(state: &GameState, content: &Content) -> Self {
        let mut bonuses = Self::default();
        for items in state.housing.equipped_items.values() {
            for item_id in items {
                let Some(def) = content.housing_item(item_id) else {
                    continue;
                };
                match &def.effect {
                    HousingEffect::SkillCap { skill, amount } => match skill {
                        Some(skill) => {
                            *bonuses.skill_cap.entry(skill.clone()).or_insert(0) += amount;
                        }
                        None => bonuses.skill_cap_all += amount,
                    },
                    HousingEffect::PassiveGen { resource, rate } => {
                        *bonuses.passive_gen.entry(resource.clone()).or_insert(0.0) += rate;
                    }
                    HousingEffect::ActionBonus { skill, bonus } => match skill {
                        Some(skill) => {
                            *bonuses.action_bonus.entry(skill.clone()).or_insert(0.0) += bonus;
                        }
                        None => bonuses.action_bonus_all += bonus,
                    },
                    HousingEffect::CombatDamage(amount) => {
                        bonuses.combat_damage += amount;
                    }
                    HousingEffect::HealthRegen(rate) => {
                        bonuses.health_regen += rate;
                    }
                    HousingEffect::CooldownReduction(fraction) => {
                        bonuses.cooldown_reduction =
                            (bonuses.cooldown_reduction + fraction).min(0.9);
                    }
                }
            }
        }
        bonuses
    }

    /// Extra cap levels for one skill (specific plus global)
    pub fn cap_bonus(&self, skill: &SkillId) -> u32 {
        self.skill_cap.get(skill).copied().unwrap_or(0) + self.skill_cap_all
    }

    /// Fractional output bonus for an action training the given skills
    pub fn action_bonus_for<'a>(&self, skills: impl Iterator<Item = &'a SkillId>) -> f64 {
        self.action_bonus_all
            + skills
                .filter_map(|s| self.action_bonus.get(s))
                .sum::<f64>()
    }
}

/// Space consumed by the items equipped in a house
pub fn space_used(state: &GameState, content: &Content, house: &HouseId) -> u32 {
    state
        .housing
        .equipped_items
        .get(house)
        .map(|items| {
            items
                .iter()
                .filter_map(|i| content.housing_item(i))
                .map(|def| def.space)
                .sum()
        })
        .unwrap_or(0)
}

/// Buy a house, deducting its cost
///
/// No-op diff if the house is unknown, already owned, or unaffordable.
pub fn purchase_house(state: &GameState, content: &Content, house: &HouseId) -> StateDiff {
    let Some(def) = content.house(house) else {
        return StateDiff::new();
    };
    if state.housing.owned_houses.contains(house) || !can_afford(state, &def.cost) {
        return StateDiff::new();
    }

    let mut diff = deduct_cost(state, &def.cost);
    let mut housing = state.housing.clone();
    housing.owned_houses.push(house.clone());
    housing.equipped_items.entry(house.clone()).or_default();
    diff.housing = Some(housing);
    diff
}

/// Buy and place an item in an owned house
///
/// Rejected (no-op diff) when the house is not owned, the item is unknown,
/// still locked, already placed somewhere, unaffordable, or would exceed the
/// house's space.
pub fn equip_item(
    state: &GameState,
    content: &Content,
    house: &HouseId,
    item: &ItemId,
) -> StateDiff {
    let Some(house_def) = content.house(house) else {
        return StateDiff::new();
    };
    let Some(item_def) = content.housing_item(item) else {
        return StateDiff::new();
    };
    if !state.housing.owned_houses.contains(house) {
        return StateDiff::new();
    }
    if item_def.requires_unlock && !state.housing.unlocked_items.contains(item) {
        return StateDiff::new();
    }
    if state.housing.location_of(item).is_some() {
        return StateDiff::new();
    }
    if space_used(state, content, house) + item_def.space > house_def.space {
        return StateDiff::new();
    }
    if !can_afford(state, &item_def.cost) {
        return StateDiff::new();
    }

    let mut diff = deduct_cost(state, &item_def.cost);
    let mut housing = state.housing.clone();
    housing.place_item(house.clone(), item.clone());
    diff.housing = Some(housing);
    diff
}

/// Remove an item from the house it is equipped in
///
/// The purchase cost is not refunded; the item can be re-equipped for free
/// only in the sense that it stays unlocked.
pub fn unequip_item(state: &GameState, item: &ItemId) -> StateDiff {
    if state.housing.location_of(item).is_none() {
        return StateDiff::new();
    }

    let mut housing = state.housing.clone();
    housing.remove_item(item);
    let mut diff = StateDiff::new();
    diff.housing = Some(housing);
    diff
}

/// Whether the player can pay a cost that may name stamina or health
///
/// Ordinary entries check the ledger; the special keys "stamina" and
/// "health" check the corresponding pool.
pub(crate) fn can_afford(state: &GameState, cost: &IndexMap<ResourceId, f64>) -> bool {
    cost.iter().all(|(id, amount)| match id.as_str() {
        "stamina" => state.special.stamina.current >= *amount,
        "health" => state.special.health.current >= *amount,
        _ => state.resource(id) >= *amount,
    })
}

/// Diff deducting a cost, routing special keys to their pools
fn deduct_cost(state: &GameState, cost: &IndexMap<ResourceId, f64>) -> StateDiff {
    let mut diff = StateDiff::new();
    for (id, amount) in cost {
        match id.as_str() {
            "stamina" => {
                diff.special.stamina.current =
                    Some((state.special.stamina.current - amount).max(0.0));
            }
            "health" => {
                diff.special.health.current =
                    Some((state.special.health.current - amount).max(0.0));
            }
            _ => {
                diff.resources
                    .insert(id.clone(), (state.resource(id) - amount).max(0.0));
            }
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{HouseDef, HousingItemDef};

    fn house(id: &str, space: u32, gold: f64) -> HouseDef {
        let mut cost = IndexMap::new();
        if gold > 0.0 {
            cost.insert(ResourceId::new("gold"), gold);
        }
        HouseDef {
            id: HouseId::new(id),
            name: id.to_string(),
            description: String::new(),
            space,
            cost,
        }
    }

    fn item(id: &str, space: u32, gold: f64, effect: HousingEffect) -> HousingItemDef {
        let mut cost = IndexMap::new();
        cost.insert(ResourceId::new("gold"), gold);
        HousingItemDef {
            id: ItemId::new(id),
            name: id.to_string(),
            description: String::new(),
            space,
            cost,
            effect,
            requires_unlock: false,
        }
    }

    fn content() -> Content {
        let mut content = Content::new();
        for def in [house("shelter", 0, 0.0), house("small-house", 3, 100.0)] {
            content.houses.insert(def.id.clone(), def);
        }
        for def in [
            item(
                "arcane-study",
                2,
                50.0,
                HousingEffect::SkillCap {
                    skill: Some(SkillId::new("arcane")),
                    amount: 10,
                },
            ),
            item(
                "gold-reserve",
                1,
                30.0,
                HousingEffect::PassiveGen {
                    resource: ResourceId::new("gold"),
                    rate: 0.2,
                },
            ),
            item(
                "training-dummy",
                2,
                40.0,
                HousingEffect::CombatDamage(2.0),
            ),
        ] {
            content.housing_items.insert(def.id.clone(), def);
        }
        content
    }

    fn state_with_gold(gold: f64) -> GameState {
        let mut state = GameState::new_game(&content(), 1);
        state.resources.insert(ResourceId::new("gold"), gold);
        state
    }

    fn owned_small_house(state: &mut GameState) {
        let diff = purchase_house(state, &content(), &HouseId::new("small-house"));
        diff.apply(state);
    }

    #[test]
    fn test_purchase_house_deducts_cost() {
        let mut state = state_with_gold(150.0);
        owned_small_house(&mut state);
        assert!(state
            .housing
            .owned_houses
            .contains(&HouseId::new("small-house")));
        assert_eq!(state.resource(&ResourceId::new("gold")), 50.0);
    }

    #[test]
    fn test_purchase_rejected_when_poor() {
        let state = state_with_gold(99.0);
        let diff = purchase_house(&state, &content(), &HouseId::new("small-house"));
        assert!(diff.is_empty());
    }

    #[test]
    fn test_equip_rejected_over_space() {
        let mut state = state_with_gold(500.0);
        owned_small_house(&mut state);
        let content = content();
        let house = HouseId::new("small-house");

        // 2 + 2 > 3 slots
        let diff = equip_item(&state, &content, &house, &ItemId::new("arcane-study"));
        diff.apply(&mut state);
        let diff = equip_item(&state, &content, &house, &ItemId::new("training-dummy"));
        assert!(diff.is_empty());

        // 2 + 1 fits
        let diff = equip_item(&state, &content, &house, &ItemId::new("gold-reserve"));
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_item_cannot_be_placed_twice() {
        let mut state = state_with_gold(500.0);
        owned_small_house(&mut state);
        let content = content();
        let house = HouseId::new("small-house");

        let diff = equip_item(&state, &content, &house, &ItemId::new("gold-reserve"));
        diff.apply(&mut state);
        let diff = equip_item(&state, &content, &house, &ItemId::new("gold-reserve"));
        assert!(diff.is_empty());
    }

    #[test]
    fn test_aggregate_bonuses() {
        let mut state = state_with_gold(500.0);
        owned_small_house(&mut state);
        let content = content();
        let house = HouseId::new("small-house");
        for id in ["arcane-study", "gold-reserve"] {
            let diff = equip_item(&state, &content, &house, &ItemId::new(id));
            diff.apply(&mut state);
        }

        let bonuses = HousingBonuses::aggregate(&state, &content);
        assert_eq!(bonuses.cap_bonus(&SkillId::new("arcane")), 10);
        assert_eq!(bonuses.cap_bonus(&SkillId::new("pyromancy")), 0);
        assert_eq!(bonuses.passive_gen[&ResourceId::new("gold")], 0.2);
        assert_eq!(bonuses.combat_damage, 0.0);
    }

    #[test]
    fn test_unequip_drops_effect() {
        let mut state = state_with_gold(500.0);
        owned_small_house(&mut state);
        let content = content();
        let house = HouseId::new("small-house");
        let diff = equip_item(&state, &content, &house, &ItemId::new("gold-reserve"));
        diff.apply(&mut state);

        let diff = unequip_item(&state, &ItemId::new("gold-reserve"));
        diff.apply(&mut state);
        let bonuses = HousingBonuses::aggregate(&state, &content);
        assert!(bonuses.passive_gen.is_empty());
        assert!(state.housing.location_of(&ItemId::new("gold-reserve")).is_none());
    }
}
