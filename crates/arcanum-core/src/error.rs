//! Error types for the engine

use thiserror::Error;

use crate::identity::{ActionId, DungeonId, HouseId, ItemId, SpellId};

/// Why a player command was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unknown action: {0}")]
    UnknownAction(ActionId),

    #[error("action cannot execute right now: {0}")]
    ActionUnavailable(ActionId),

    #[error("action is not toggleable: {0}")]
    NotToggleable(ActionId),

    #[error("unknown spell: {0}")]
    UnknownSpell(SpellId),

    #[error("spell is not equipped: {0}")]
    SpellNotEquipped(SpellId),

    #[error("spell is cooling down: {0}")]
    SpellOnCooldown(SpellId),

    #[error("no spell slot free")]
    NoFreeSpellSlot,

    #[error("not in combat")]
    NotInCombat,

    #[error("already in combat")]
    AlreadyInCombat,

    #[error("unknown dungeon: {0}")]
    UnknownDungeon(DungeonId),

    #[error("dungeon requirement not met: {0}")]
    DungeonRequirementNotMet(DungeonId),

    #[error("unknown house: {0}")]
    UnknownHouse(HouseId),

    #[error("house not owned: {0}")]
    HouseNotOwned(HouseId),

    #[error("unknown housing item: {0}")]
    UnknownItem(ItemId),

    #[error("housing item is locked: {0}")]
    ItemLocked(ItemId),

    #[error("housing item already placed: {0}")]
    ItemAlreadyPlaced(ItemId),

    #[error("housing item is not placed: {0}")]
    ItemNotPlaced(ItemId),

    #[error("not enough space in house: {0}")]
    NotEnoughSpace(HouseId),

    #[error("cannot afford cost")]
    CannotAfford,
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
