//! Content definition types
//!
//! Plain data structs describing actions, skills, spells, enemies, dungeons
//! and housing. These are deserialized from RON data files by the
//! `arcanum-content` crate and handed to the engine as a [`Content`] bundle.
//! The engine never mutates content; all progression lives in
//! [`GameState`](crate::state::GameState).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bonus::RankCurve;
use crate::identity::{
    ActionId, DungeonId, EnemyId, HouseId, ItemId, ResourceId, SkillId, SpellId,
};

/// How an action behaves when executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCategory {
    /// Manually clicked; converts inputs and stamina into outputs
    Resource,
    /// Toggleable; fires automatically every `duration` seconds while active
    Timed,
    /// Toggleable; grants skill experience every `duration` seconds while active
    Study,
    /// One-shot purchase that permanently unlocks something, then removes itself
    Unlock,
}

/// What a one-shot unlock action grants on purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnlockEffect {
    /// Additional spell slots
    SpellSlot { amount: u32 },
    /// Make another action available
    Action(ActionId),
    /// Make a housing item purchasable
    HousingItem(ItemId),
}

/// Minimum skill level gating an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: SkillId,
    pub level: u32,
}

/// Definition of a player action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    pub id: ActionId,
    pub name: String,
    pub category: ActionCategory,
    /// Resources consumed per execution
    #[serde(default)]
    pub inputs: IndexMap<ResourceId, f64>,
    /// Resources produced per execution, before rank and housing bonuses
    #[serde(default)]
    pub outputs: IndexMap<ResourceId, f64>,
    /// Stamina consumed per execution
    #[serde(default)]
    pub stamina_cost: f64,
    /// Seconds between automatic firings (Timed and Study only)
    #[serde(default)]
    pub duration: f64,
    /// Experience granted per execution, keyed by skill
    #[serde(default)]
    pub skill_xp: IndexMap<SkillId, f64>,
    /// Skill level required to execute
    #[serde(default)]
    pub required_skill: Option<SkillRequirement>,
    /// One-time purchase cost (Unlock only)
    #[serde(default)]
    pub unlock_cost: IndexMap<ResourceId, f64>,
    /// What the purchase grants (Unlock only)
    #[serde(default)]
    pub unlock_effect: Option<UnlockEffect>,
    #[serde(default)]
    pub rank_curve: RankCurve,
    /// Available from the first tick of a new game
    #[serde(default)]
    pub starter: bool,
}

/// What reaching a skill level grants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillBonusEffect {
    /// Flip an action's unlocked flag
    UnlockAction(ActionId),
    /// Unlock every action that trains the named skill
    UnlockSkill(SkillId),
    /// Additional spell slots
    SpellSlot { amount: u32 },
}

/// A milestone on a skill's level track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBonus {
    pub level: u32,
    pub effect: SkillBonusEffect,
}

/// Definition of a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    /// Cumulative experience required per level; `xp_table[n]` is the total
    /// experience needed to reach level `n + 1`. The table's length is the
    /// base level cap; housing can extend past it.
    pub xp_table: Vec<f64>,
    #[serde(default)]
    pub bonuses: Vec<SkillBonus>,
}

/// Definition of a combat spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellDef {
    pub id: SpellId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub damage: f64,
    /// Seconds between casts
    pub cooldown: f64,
}

/// Definition of an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: EnemyId,
    pub name: String,
    pub max_health: f64,
    pub damage: f64,
    /// Seconds between attacks
    pub attack_interval: f64,
    /// Resources granted on defeat
    #[serde(default)]
    pub rewards: IndexMap<ResourceId, f64>,
}

/// Definition of a dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonDef {
    pub id: DungeonId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Spawn pool; duplicates weight an enemy more heavily
    pub enemies: Vec<EnemyId>,
    pub difficulty: u32,
    /// Minimum arcane level to enter
    pub level_requirement: u32,
}

/// Definition of a purchasable house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseDef {
    pub id: HouseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Item slots the house provides
    pub space: u32,
    #[serde(default)]
    pub cost: IndexMap<ResourceId, f64>,
}

/// Passive effect granted by an equipped housing item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HousingEffect {
    /// Raise a skill's level cap; `skill: None` raises every cap
    SkillCap { skill: Option<SkillId>, amount: u32 },
    /// Generate a resource per second, even while idle
    PassiveGen { resource: ResourceId, rate: f64 },
    /// Fractional output bonus for actions training a skill; `None` = all actions
    ActionBonus { skill: Option<SkillId>, bonus: f64 },
    /// Flat bonus to player attack damage
    CombatDamage(f64),
    /// Flat bonus to health regeneration per second
    HealthRegen(f64),
    /// Fractional reduction of spell cooldowns (0.1 = 10% faster)
    CooldownReduction(f64),
}

/// Definition of a housing item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingItemDef {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// House slots the item occupies
    pub space: u32,
    #[serde(default)]
    pub cost: IndexMap<ResourceId, f64>,
    pub effect: HousingEffect,
    /// Must be unlocked (via an unlock action) before it can be equipped
    #[serde(default)]
    pub requires_unlock: bool,
}

/// Immutable bundle of every content table the engine consults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub actions: IndexMap<ActionId, ActionDef>,
    pub skills: IndexMap<SkillId, SkillDef>,
    pub spells: IndexMap<SpellId, SpellDef>,
    pub enemies: IndexMap<EnemyId, EnemyDef>,
    pub dungeons: IndexMap<DungeonId, DungeonDef>,
    pub houses: IndexMap<HouseId, HouseDef>,
    pub housing_items: IndexMap<ItemId, HousingItemDef>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self, id: &ActionId) -> Option<&ActionDef> {
        self.actions.get(id)
    }

    pub fn skill(&self, id: &SkillId) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    pub fn spell(&self, id: &SpellId) -> Option<&SpellDef> {
        self.spells.get(id)
    }

    pub fn enemy(&self, id: &EnemyId) -> Option<&EnemyDef> {
        self.enemies.get(id)
    }

    pub fn dungeon(&self, id: &DungeonId) -> Option<&DungeonDef> {
        self.dungeons.get(id)
    }

    pub fn house(&self, id: &HouseId) -> Option<&HouseDef> {
        self.houses.get(id)
    }

    pub fn housing_item(&self, id: &ItemId) -> Option<&HousingItemDef> {
        self.housing_items.get(id)
    }
}
