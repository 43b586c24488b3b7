//! Game state model
//!
//! The complete persistent state of one playthrough. Subsystems never mutate
//! this directly during a tick; they read it and emit a
//! [`StateDiff`](crate::diff::StateDiff) which is applied atomically at the
//! end of the tick.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combat::log::CombatLog;
use crate::defs::{ActionCategory, Content, EnemyDef};
use crate::identity::{
    ActionId, DungeonId, EnemyId, HouseId, ItemId, ResourceId, SkillId, SpellId,
};
use crate::rng::GameRng;

/// Starting stamina pool
pub const STARTING_STAMINA: (f64, f64) = (10.0, 0.2);
/// Starting health pool
pub const STARTING_HEALTH: (f64, f64) = (100.0, 0.1);

/// A bounded regenerating pool (stamina, health)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub current: f64,
    pub max: f64,
    /// Points regenerated per second
    pub regen_rate: f64,
}

impl Pool {
    /// Create a full pool
    pub fn new(max: f64, regen_rate: f64) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// The two special resources with their own regeneration rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialResources {
    pub stamina: Pool,
    pub health: Pool,
}

impl Default for SpecialResources {
    fn default() -> Self {
        Self {
            stamina: Pool::new(STARTING_STAMINA.0, STARTING_STAMINA.1),
            health: Pool::new(STARTING_HEALTH.0, STARTING_HEALTH.1),
        }
    }
}

/// Per-action progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionState {
    /// Lifetime execution count, drives rank bonuses
    pub execution_count: u64,
    pub unlocked: bool,
    /// Whether a timed or study action is currently running
    pub active: bool,
    /// Simulation clock of the most recent execution or activation
    pub last_execution: f64,
}

impl ActionState {
    pub fn locked() -> Self {
        Self {
            execution_count: 0,
            unlocked: false,
            active: false,
            last_execution: 0.0,
        }
    }

    pub fn unlocked() -> Self {
        Self {
            unlocked: true,
            ..Self::locked()
        }
    }
}

impl Default for ActionState {
    fn default() -> Self {
        Self::locked()
    }
}

/// Per-skill progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillState {
    pub level: u32,
    /// Cumulative experience; never reset on level up
    pub experience: f64,
}

impl Default for SkillState {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0.0,
        }
    }
}

/// Spell slots, equipped spells and live cooldowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellBook {
    pub slots: u32,
    pub equipped: Vec<SpellId>,
    /// Seconds remaining per spell; absent or <= 0 means ready
    pub cooldowns: IndexMap<SpellId, f64>,
}

impl Default for SpellBook {
    fn default() -> Self {
        Self {
            slots: 1,
            equipped: Vec::new(),
            cooldowns: IndexMap::new(),
        }
    }
}

impl SpellBook {
    pub fn is_ready(&self, spell: &SpellId) -> bool {
        self.cooldowns.get(spell).map_or(true, |cd| *cd <= 0.0)
    }
}

/// A live enemy instance, snapshotted from its definition at spawn time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub health: f64,
    pub max_health: f64,
    pub damage: f64,
    pub attack_interval: f64,
    pub rewards: IndexMap<ResourceId, f64>,
}

impl Enemy {
    pub fn from_def(def: &EnemyDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            health: def.max_health,
            max_health: def.max_health,
            damage: def.damage,
            attack_interval: def.attack_interval,
            rewards: def.rewards.clone(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

/// Live combat encounter state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub active: bool,
    /// `None` while awaiting a spawn
    pub enemy: Option<Enemy>,
    /// Seconds until the player's next attack
    pub player_timer: f64,
    /// Seconds until the enemy's next attack
    pub enemy_timer: f64,
    pub log: CombatLog,
}

/// Dungeon progression and selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DungeonState {
    pub unlocked: Vec<DungeonId>,
    /// Dungeon whose spawn pool feeds combat; `None` draws from all enemies
    pub selected: Option<DungeonId>,
}

/// Owned houses and the items placed in them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingState {
    pub owned_houses: Vec<HouseId>,
    /// Items equipped per owned house
    pub equipped_items: IndexMap<HouseId, Vec<ItemId>>,
    /// Items made purchasable by unlock actions
    pub unlocked_items: Vec<ItemId>,
    /// Reverse index of `equipped_items`; an item sits in at most one house
    pub item_location: IndexMap<ItemId, HouseId>,
}

impl HousingState {
    /// Where an item is currently equipped, if anywhere
    pub fn location_of(&self, item: &ItemId) -> Option<&HouseId> {
        self.item_location.get(item)
    }

    /// Place an item in a house, keeping the reverse index in step
    pub fn place_item(&mut self, house: HouseId, item: ItemId) {
        self.equipped_items
            .entry(house.clone())
            .or_default()
            .push(item.clone());
        self.item_location.insert(item, house);
    }

    /// Remove an item from wherever it is equipped
    pub fn remove_item(&mut self, item: &ItemId) {
        if let Some(house) = self.item_location.shift_remove(item) {
            if let Some(items) = self.equipped_items.get_mut(&house) {
                items.retain(|i| i != item);
            }
        }
    }
}

/// The complete state of one playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    /// Ordinary resource ledger; absent key reads as 0
    pub resources: IndexMap<ResourceId, f64>,
    pub special: SpecialResources,
    pub actions: IndexMap<ActionId, ActionState>,
    pub skills: IndexMap<SkillId, SkillState>,
    pub spells: SpellBook,
    pub combat: CombatState,
    pub dungeons: DungeonState,
    pub housing: HousingState,
    /// Simulation clock in seconds since the start of the playthrough
    pub clock: f64,
    pub rng: GameRng,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            resources: IndexMap::new(),
            special: SpecialResources::default(),
            actions: IndexMap::new(),
            skills: IndexMap::new(),
            spells: SpellBook::default(),
            combat: CombatState::default(),
            dungeons: DungeonState::default(),
            housing: HousingState::default(),
            clock: 0.0,
            rng: GameRng::default(),
        }
    }
}

impl GameState {
    /// Fresh playthrough seeded from the content tables
    ///
    /// Starter actions and unlock purchases begin unlocked; everything else
    /// waits for a skill bonus or unlock action. Free houses (empty cost)
    /// are owned from the start.
    pub fn new_game(content: &Content, seed: u64) -> Self {
        let mut state = Self {
            rng: GameRng::new(seed),
            ..Self::default()
        };

        for (id, def) in &content.actions {
            let unlocked = def.starter || def.category == ActionCategory::Unlock;
            let entry = if unlocked {
                ActionState::unlocked()
            } else {
                ActionState::locked()
            };
            state.actions.insert(id.clone(), entry);
        }

        for id in content.skills.keys() {
            state.skills.insert(id.clone(), SkillState::default());
        }

        for (id, def) in &content.dungeons {
            if def.level_requirement <= 1 {
                state.dungeons.unlocked.push(id.clone());
            }
        }

        for (id, def) in &content.houses {
            if def.cost.is_empty() {
                state.owned_house_insert(id.clone());
            }
        }

        state
    }

    fn owned_house_insert(&mut self, id: HouseId) {
        self.housing.equipped_items.entry(id.clone()).or_default();
        self.housing.owned_houses.push(id);
    }

    /// Amount of an ordinary resource; absent keys read as 0
    pub fn resource(&self, id: &ResourceId) -> f64 {
        self.resources.get(id).copied().unwrap_or(0.0)
    }

    /// Level of a skill; untrained skills are level 1
    pub fn skill_level(&self, id: &SkillId) -> u32 {
        self.skills.get(id).map_or(1, |s| s.level)
    }

    /// Whether the ledger covers a cost map (ordinary resources only)
    pub fn can_afford(&self, cost: &IndexMap<ResourceId, f64>) -> bool {
        cost.iter().all(|(id, amount)| self.resource(id) >= *amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{ActionDef, DungeonDef, HouseDef, SkillDef};
    use crate::bonus::RankCurve;

    fn action(id: &str, category: ActionCategory, starter: bool) -> ActionDef {
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
            starter,
        }
    }

    fn content() -> Content {
        let mut content = Content::new();
        for def in [
            action("gain-gold", ActionCategory::Resource, true),
            action("enchant-scrolls", ActionCategory::Timed, false),
            action("learn-spellcasting", ActionCategory::Unlock, false),
        ] {
            content.actions.insert(def.id.clone(), def);
        }
        content.skills.insert(
            SkillId::new("arcane"),
            SkillDef {
                id: SkillId::new("arcane"),
                name: "Arcane".to_string(),
                xp_table: vec![0.0, 50.0],
                bonuses: Vec::new(),
            },
        );
        content.dungeons.insert(
            DungeonId::new("dark-forest"),
            DungeonDef {
                id: DungeonId::new("dark-forest"),
                name: "Dark Forest".to_string(),
                description: String::new(),
                enemies: vec![EnemyId::new("slime")],
                difficulty: 1,
                level_requirement: 1,
            },
        );
        content.houses.insert(
            HouseId::new("shelter"),
            HouseDef {
                id: HouseId::new("shelter"),
                name: "Shelter".to_string(),
                description: String::new(),
                space: 0,
                cost: IndexMap::new(),
            },
        );
        content
    }

    #[test]
    fn test_new_game_seeds_actions() {
        let state = GameState::new_game(&content(), 7);
        assert!(state.actions[&ActionId::new("gain-gold")].unlocked);
        assert!(!state.actions[&ActionId::new("enchant-scrolls")].unlocked);
        // Unlock purchases are visible from the start; their gate is cost
        assert!(state.actions[&ActionId::new("learn-spellcasting")].unlocked);
    }

    #[test]
    fn test_new_game_pools_and_housing() {
        let state = GameState::new_game(&content(), 7);
        assert_eq!(state.special.stamina.current, 10.0);
        assert_eq!(state.special.health.max, 100.0);
        assert!(state
            .housing
            .owned_houses
            .contains(&HouseId::new("shelter")));
        assert!(state
            .dungeons
            .unlocked
            .contains(&DungeonId::new("dark-forest")));
    }

    #[test]
    fn test_absent_resource_reads_zero() {
        let state = GameState::default();
        assert_eq!(state.resource(&ResourceId::new("gold")), 0.0);
        let mut cost = IndexMap::new();
        cost.insert(ResourceId::new("gold"), 1.0);
        assert!(!state.can_afford(&cost));
    }
}
