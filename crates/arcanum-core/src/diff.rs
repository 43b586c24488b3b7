//! Partial state updates
//!
//! Every subsystem reads the tick-start state and emits a [`StateDiff`]
//! naming only the fields it changed. Diffs accumulate with [`StateDiff::merge`]
//! and are applied atomically with [`StateDiff::apply`] once per tick.
//!
//! The merge contract: map entries accumulate key by key, nested records
//! merge field by field, and when two diffs write the same field the later
//! one wins. A subsystem that writes `special.stamina.current` never
//! disturbs a sibling's write to `special.health.current`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combat::log::CombatLog;
use crate::identity::{ActionId, ResourceId, SkillId, SpellId};
use crate::rng::GameRng;
use crate::state::{
    ActionState, DungeonState, Enemy, GameState, HousingState, SkillState,
};

/// Field-level update to a regenerating pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolDiff {
    pub current: Option<f64>,
    pub max: Option<f64>,
    pub regen_rate: Option<f64>,
}

impl PoolDiff {
    fn merge(&mut self, other: PoolDiff) {
        merge_field(&mut self.current, other.current);
        merge_field(&mut self.max, other.max);
        merge_field(&mut self.regen_rate, other.regen_rate);
    }

    fn is_empty(&self) -> bool {
        self.current.is_none() && self.max.is_none() && self.regen_rate.is_none()
    }
}

/// Field-level update to the special resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialDiff {
    pub stamina: PoolDiff,
    pub health: PoolDiff,
}

impl SpecialDiff {
    fn merge(&mut self, other: SpecialDiff) {
        self.stamina.merge(other.stamina);
        self.health.merge(other.health);
    }

    fn is_empty(&self) -> bool {
        self.stamina.is_empty() && self.health.is_empty()
    }
}

/// Field-level update to the spell book
///
/// `cooldowns` accumulates per spell; a subsystem touching fireball's
/// cooldown leaves ice-shard's untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellDiff {
    pub slots: Option<u32>,
    pub equipped: Option<Vec<SpellId>>,
    pub cooldowns: IndexMap<SpellId, f64>,
}

impl SpellDiff {
    fn merge(&mut self, other: SpellDiff) {
        merge_field(&mut self.slots, other.slots);
        merge_field(&mut self.equipped, other.equipped);
        self.cooldowns.extend(other.cooldowns);
    }

    fn is_empty(&self) -> bool {
        self.slots.is_none() && self.equipped.is_none() && self.cooldowns.is_empty()
    }
}

/// Field-level update to the combat record
///
/// `enemy` is doubly optional: the outer `Option` is "did this diff touch
/// the enemy slot", the inner one is the new occupant (despawn = `Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatDiff {
    pub active: Option<bool>,
    pub enemy: Option<Option<Enemy>>,
    pub player_timer: Option<f64>,
    pub enemy_timer: Option<f64>,
    pub log: Option<CombatLog>,
}

impl CombatDiff {
    fn merge(&mut self, other: CombatDiff) {
        merge_field(&mut self.active, other.active);
        merge_field(&mut self.enemy, other.enemy);
        merge_field(&mut self.player_timer, other.player_timer);
        merge_field(&mut self.enemy_timer, other.enemy_timer);
        merge_field(&mut self.log, other.log);
    }

    fn is_empty(&self) -> bool {
        self.active.is_none()
            && self.enemy.is_none()
            && self.player_timer.is_none()
            && self.enemy_timer.is_none()
            && self.log.is_none()
    }
}

/// A partial update to [`GameState`]
///
/// Map fields hold only the entries being written; scalar fields use
/// `Option` with `None` meaning untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDiff {
    pub resources: IndexMap<ResourceId, f64>,
    pub special: SpecialDiff,
    pub actions: IndexMap<ActionId, ActionState>,
    /// Actions removed outright (one-shot unlocks consume themselves)
    pub actions_removed: Vec<ActionId>,
    pub skills: IndexMap<SkillId, SkillState>,
    pub spells: SpellDiff,
    pub combat: CombatDiff,
    pub dungeons: Option<DungeonState>,
    pub housing: Option<HousingState>,
    pub clock: Option<f64>,
    /// Advanced RNG state, written by any subsystem that drew randomness
    pub rng: Option<GameRng>,
}

impl StateDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when applying this diff would change nothing
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
            && self.special.is_empty()
            && self.actions.is_empty()
            && self.actions_removed.is_empty()
            && self.skills.is_empty()
            && self.spells.is_empty()
            && self.combat.is_empty()
            && self.dungeons.is_none()
            && self.housing.is_none()
            && self.clock.is_none()
            && self.rng.is_none()
    }

    /// Fold a later diff into this one
    ///
    /// Disjoint writes are both kept; where both diffs write the same
    /// field or map key, `other` wins.
    pub fn merge(&mut self, other: StateDiff) {
        self.resources.extend(other.resources);
        self.special.merge(other.special);
        self.actions.extend(other.actions);
        self.actions_removed.extend(other.actions_removed);
        self.skills.extend(other.skills);
        self.spells.merge(other.spells);
        self.combat.merge(other.combat);
        merge_field(&mut self.dungeons, other.dungeons);
        merge_field(&mut self.housing, other.housing);
        merge_field(&mut self.clock, other.clock);
        merge_field(&mut self.rng, other.rng);
    }

    /// Apply every write in this diff to the state
    pub fn apply(self, state: &mut GameState) {
        state.resources.extend(self.resources);

        apply_pool(&mut state.special.stamina, self.special.stamina);
        apply_pool(&mut state.special.health, self.special.health);

        state.actions.extend(self.actions);
        for id in &self.actions_removed {
            state.actions.shift_remove(id);
        }

        state.skills.extend(self.skills);

        if let Some(slots) = self.spells.slots {
            state.spells.slots = slots;
        }
        if let Some(equipped) = self.spells.equipped {
            state.spells.equipped = equipped;
        }
        state.spells.cooldowns.extend(self.spells.cooldowns);

        if let Some(active) = self.combat.active {
            state.combat.active = active;
        }
        if let Some(enemy) = self.combat.enemy {
            state.combat.enemy = enemy;
        }
        if let Some(timer) = self.combat.player_timer {
            state.combat.player_timer = timer;
        }
        if let Some(timer) = self.combat.enemy_timer {
            state.combat.enemy_timer = timer;
        }
        if let Some(log) = self.combat.log {
            state.combat.log = log;
        }

        if let Some(dungeons) = self.dungeons {
            state.dungeons = dungeons;
        }
        if let Some(housing) = self.housing {
            state.housing = housing;
        }
        if let Some(clock) = self.clock {
            state.clock = clock;
        }
        if let Some(rng) = self.rng {
            state.rng = rng;
        }
    }
}

fn merge_field<T>(into: &mut Option<T>, from: Option<T>) {
    if from.is_some() {
        *into = from;
    }
}

fn apply_pool(pool: &mut crate::state::Pool, diff: PoolDiff) {
    if let Some(current) = diff.current {
        pool.current = current;
    }
    if let Some(max) = diff.max {
        pool.max = max;
    }
    if let Some(regen_rate) = diff.regen_rate {
        pool.regen_rate = regen_rate;
    }
}
