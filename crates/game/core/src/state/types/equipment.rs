use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::StatBlock;
use super::item::Item;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Helmet,
    Chest,
    Gloves,
    Boots,
    Amulet,
    Ring,
}

/// Items currently worn, one per slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equipment {
    slots: BTreeMap<EquipmentSlot, Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.get(EquipmentSlot::Weapon)
    }

    /// Places `item` into its slot, returning whatever was there before.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        self.slots.insert(item.slot, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slots.remove(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EquipmentSlot, &Item)> {
        self.slots.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sum of all equipped item stats.
    pub fn total_stats(&self) -> StatBlock {
        self.slots.values().map(|item| &item.stats).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::item;

    #[test]
    fn equip_returns_previous_item() {
        let mut equipment = Equipment::default();
        assert!(equipment.equip(item(1, EquipmentSlot::Weapon, 5.0)).is_none());
        let previous = equipment.equip(item(2, EquipmentSlot::Weapon, 9.0));
        assert_eq!(previous.map(|i| i.id.0), Some(1));
        assert_eq!(equipment.total_stats().flat_damage, 9.0);
    }

    #[test]
    fn serializes_as_slot_keyed_map() {
        let mut equipment = Equipment::default();
        equipment.equip(item(3, EquipmentSlot::Boots, 0.0));
        let json = serde_json::to_value(&equipment).unwrap();
        assert!(json.get("boots").is_some());
        let back: Equipment = serde_json::from_value(json).unwrap();
        assert_eq!(back, equipment);
    }
}
