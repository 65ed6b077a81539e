use serde::{Deserialize, Serialize};

use super::common::{ItemId, Rarity, StatBlock};
use super::equipment::EquipmentSlot;

/// Minimum character level and attributes needed to equip an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    pub level: u32,
    pub strength: u32,
    pub intelligence: u32,
    pub dexterity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipmentSlot,
    /// Weapon or armour family shown in hit animations (e.g. `sword`).
    #[serde(default)]
    pub base_type: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub level: u32,
    /// Gold received when sold.
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub requirements: Requirements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_item_json_uses_defaults() {
        let json = r#"{"id":7,"name":"Rusty Sword","slot":"weapon"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, ItemId(7));
        assert_eq!(item.rarity, Rarity::Common);
        assert_eq!(item.value, 0);
        assert!(item.stats.is_empty());
    }
}
