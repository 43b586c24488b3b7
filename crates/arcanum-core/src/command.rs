//! Player commands
//!
//! Everything a player can do between ticks, as one dispatchable enum.
//! [`dispatch`] validates the command against the current state and returns
//! either the resulting diff or a typed rejection. The tick pipeline never
//! goes through here; it has its own scheduling rules.

use serde::{Deserialize, Serialize};

use crate::actions;
use crate::combat;
use crate::defs::{ActionCategory, Content};
use crate::diff::StateDiff;
use crate::error::{EngineError, Result};
use crate::housing;
use crate::identity::{ActionId, DungeonId, HouseId, ItemId, SpellId};
use crate::spells;
use crate::state::GameState;

/// A player-initiated state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    ExecuteAction(ActionId),
    ToggleAction(ActionId),
    CastSpell(SpellId),
    EquipSpell(SpellId),
    UnequipSpell(SpellId),
    StartCombat,
    StopCombat,
    SelectDungeon(DungeonId),
    PurchaseHouse(HouseId),
    EquipItem { house: HouseId, item: ItemId },
    UnequipItem(ItemId),
}

/// Validate and resolve a command into a diff
pub fn dispatch(state: &GameState, content: &Content, command: &Command) -> Result<StateDiff> {
    match command {
        Command::ExecuteAction(id) => {
            let def = content
                .action(id)
                .ok_or_else(|| EngineError::UnknownAction(id.clone()))?;
            if !actions::can_execute(state, content, def) {
                return Err(EngineError::ActionUnavailable(id.clone()));
            }
            Ok(actions::execute(state, content, def))
        }

        Command::ToggleAction(id) => {
            let def = content
                .action(id)
                .ok_or_else(|| EngineError::UnknownAction(id.clone()))?;
            if !matches!(def.category, ActionCategory::Timed | ActionCategory::Study) {
                return Err(EngineError::NotToggleable(id.clone()));
            }
            match state.actions.get(id) {
                Some(entry) if entry.unlocked => Ok(actions::toggle(state, content, id)),
                _ => Err(EngineError::ActionUnavailable(id.clone())),
            }
        }

        Command::CastSpell(id) => {
            if content.spell(id).is_none() {
                return Err(EngineError::UnknownSpell(id.clone()));
            }
            if !state.spells.equipped.contains(id) {
                return Err(EngineError::SpellNotEquipped(id.clone()));
            }
            if !state.spells.is_ready(id) {
                return Err(EngineError::SpellOnCooldown(id.clone()));
            }
            if !spells::can_cast(state, id) {
                return Err(EngineError::NotInCombat);
            }
            Ok(spells::cast(state, content, id))
        }

        Command::EquipSpell(id) => {
            if content.spell(id).is_none() {
                return Err(EngineError::UnknownSpell(id.clone()));
            }
            if state.spells.equipped.contains(id) {
                return Ok(StateDiff::new());
            }
            if state.spells.equipped.len() as u32 >= state.spells.slots {
                return Err(EngineError::NoFreeSpellSlot);
            }
            Ok(spells::equip(state, content, id))
        }

        Command::UnequipSpell(id) => {
            if !state.spells.equipped.contains(id) {
                return Err(EngineError::SpellNotEquipped(id.clone()));
            }
            Ok(spells::unequip(state, id))
        }

        Command::StartCombat => {
            if state.combat.active {
                return Err(EngineError::AlreadyInCombat);
            }
            Ok(combat::start(state, content))
        }

        Command::StopCombat => {
            if !state.combat.active {
                return Err(EngineError::NotInCombat);
            }
            Ok(combat::stop(state))
        }

        Command::SelectDungeon(id) => {
            let def = content
                .dungeon(id)
                .ok_or_else(|| EngineError::UnknownDungeon(id.clone()))?;
            if state.skill_level(&"arcane".into()) < def.level_requirement {
                return Err(EngineError::DungeonRequirementNotMet(id.clone()));
            }
            Ok(combat::select_dungeon(state, content, id))
        }

        Command::PurchaseHouse(id) => {
            let def = content
                .house(id)
                .ok_or_else(|| EngineError::UnknownHouse(id.clone()))?;
            if state.housing.owned_houses.contains(id) {
                return Ok(StateDiff::new());
            }
            if !housing::can_afford(state, &def.cost) {
                return Err(EngineError::CannotAfford);
            }
            Ok(housing::purchase_house(state, content, id))
        }

        Command::EquipItem { house, item } => {
            let house_def = content
                .house(house)
                .ok_or_else(|| EngineError::UnknownHouse(house.clone()))?;
            let item_def = content
                .housing_item(item)
                .ok_or_else(|| EngineError::UnknownItem(item.clone()))?;
            if !state.housing.owned_houses.contains(house) {
                return Err(EngineError::HouseNotOwned(house.clone()));
            }
            if item_def.requires_unlock && !state.housing.unlocked_items.contains(item) {
                return Err(EngineError::ItemLocked(item.clone()));
            }
            if state.housing.location_of(item).is_some() {
                return Err(EngineError::ItemAlreadyPlaced(item.clone()));
            }
            if housing::space_used(state, content, house) + item_def.space > house_def.space {
                return Err(EngineError::NotEnoughSpace(house.clone()));
            }
            if !housing::can_afford(state, &item_def.cost) {
                return Err(EngineError::CannotAfford);
            }
            Ok(housing::equip_item(state, content, house, item))
        }

        Command::UnequipItem(item) => {
            if state.housing.location_of(item).is_none() {
                return Err(EngineError::ItemNotPlaced(item.clone()));
            }
            Ok(housing::unequip_item(state, item))
        }
    }
}
