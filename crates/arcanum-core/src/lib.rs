//! Arcanum Core - Deterministic idle RPG simulation engine
//!
//! This crate provides the simulation for the Arcanum idle RPG:
//! - String-keyed content definitions (`Content` and the `*Def` types)
//! - The complete playthrough state (`GameState`)
//! - Partial updates with lossless accumulation (`StateDiff`)
//! - The per-tick pipeline: regeneration, timed actions, skill level-ups,
//!   combat, spells
//! - Player commands validated against the live state (`Command`)
//!
//! ## Update discipline
//!
//! Subsystems never mutate state. Each reads the tick-start snapshot and
//! returns a `StateDiff` naming only the fields it changed; the driver
//! accumulates the diffs in pipeline order and applies the result
//! atomically. Two subsystems touching sibling fields can never lose each
//! other's writes.

pub mod actions;
pub mod bonus;
pub mod combat;
mod command;
pub mod defs;
pub mod diff;
mod error;
pub mod housing;
mod identity;
pub mod regen;
mod rng;
mod sim;
pub mod skills;
pub mod spells;
mod state;
pub mod tick;

pub use bonus::{RankCurve, RankThreshold};
pub use combat::log::{CombatLog, LogEntry, LogKind, MAX_LOG_ENTRIES};
pub use command::{dispatch, Command};
pub use defs::{
    ActionCategory, ActionDef, Content, DungeonDef, EnemyDef, HouseDef, HousingEffect,
    HousingItemDef, SkillBonus, SkillBonusEffect, SkillDef, SkillRequirement, SpellDef,
    UnlockEffect,
};
pub use diff::{CombatDiff, PoolDiff, SpecialDiff, SpellDiff, StateDiff};
pub use error::{EngineError, Result};
pub use identity::{
    ActionId, DungeonId, EnemyId, HouseId, ItemId, ResourceId, SkillId, SpellId,
};
pub use housing::HousingBonuses;
pub use rng::GameRng;
pub use sim::Simulation;
pub use state::{
    ActionState, CombatState, DungeonState, Enemy, GameState, HousingState, Pool,
    SkillState, SpecialResources, SpellBook,
};
pub use tick::{run_tick, tick, MAX_DELTA};
