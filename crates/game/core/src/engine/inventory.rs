//! Inventory and equipment transitions.
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquipmentSlot, GameState, ItemId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{item} requires level {required} (you are level {current})")]
    LevelTooLow {
        item: String,
        required: u32,
        current: u32,
    },

    #[error("{item} requires {required} {attribute} (you have {current})")]
    AttributeTooLow {
        item: String,
        attribute: &'static str,
        required: u32,
        current: u32,
    },

    #[error("Inventory full! Cannot unequip {0}")]
    InventoryFull(String),
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelTooLow { .. } => "EQUIP_LEVEL_TOO_LOW",
            Self::AttributeTooLow { .. } => "EQUIP_ATTRIBUTE_TOO_LOW",
            Self::InventoryFull(_) => "EQUIP_INVENTORY_FULL",
        }
    }
}

/// Moves an inventory item into its slot; the previous occupant returns to the inventory.
///
/// Unknown ids are a no-op. Requirements are checked against the current
/// total attributes.
pub fn equip_item(state: &mut GameState, id: ItemId) -> Result<(), EquipError> {
    let Some(index) = state.inventory.iter().position(|item| item.id == id) else {
        return Ok(());
    };
    let item = &state.inventory[index];
    let player = &state.player;
    let req = &item.requirements;

    if player.level < req.level {
        return Err(EquipError::LevelTooLow {
            item: item.name.clone(),
            required: req.level,
            current: player.level,
        });
    }
    let attrs = &player.stats.attributes;
    for (attribute, required, current) in [
        ("strength", req.strength, attrs.strength),
        ("intelligence", req.intelligence, attrs.intelligence),
        ("dexterity", req.dexterity, attrs.dexterity),
    ] {
        if current < required {
            return Err(EquipError::AttributeTooLow {
                item: item.name.clone(),
                attribute,
                required,
                current,
            });
        }
    }

    let item = state.inventory.remove(index);
    state.log.push(format!("Equipped {}", item.name));
    if let Some(previous) = state.player.equipment.equip(item) {
        state.inventory.push(previous);
    }
    Ok(())
}

/// Unequipping an empty slot is a no-op.
pub fn unequip_slot(state: &mut GameState, slot: EquipmentSlot) -> Result<(), EquipError> {
    let Some(item) = state.player.equipment.get(slot) else {
        return Ok(());
    };
    if state.inventory_is_full() {
        return Err(EquipError::InventoryFull(item.name.clone()));
    }
    if let Some(item) = state.player.equipment.unequip(slot) {
        state.log.push(format!("Unequipped {}", item.name));
        state.inventory.push(item);
    }
    Ok(())
}

pub fn discard_item(state: &mut GameState, id: ItemId) {
    if let Some(index) = state.inventory.iter().position(|item| item.id == id) {
        let item = state.inventory.remove(index);
        state.log.push(format!("Discarded {}", item.name));
    }
}

/// Sells the whole inventory. Returns the gold earned.
pub fn sell_all(state: &mut GameState) -> u64 {
    if state.inventory.is_empty() {
        state.log.push("Nothing to sell");
        return 0;
    }
    let count = state.inventory.len();
    let gold: u64 = state.inventory.drain(..).map(|item| item.value).sum();
    state.player.gold = state.player.gold.saturating_add(gold);
    state
        .log
        .push(format!("Sold {count} item(s) for {gold} gold"));
    gold
}
