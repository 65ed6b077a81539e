//! Default loot table.
//!
//! Regular enemies drop 0 to 2 items, bosses 2 to 4. Item power and sale
//! value scale with the enemy level and the rolled rarity.
use std::ops::RangeInclusive;

use game_core::{EquipmentSlot, Item, ItemId, Rarity, Requirements, StatBlock};
use rand::Rng;

/// One droppable base item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemBase {
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub base_type: &'static str,
    /// Stats of a common level-1 drop.
    pub stats: StatBlock,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LootTable {
    pub bases: Vec<ItemBase>,
    /// Relative rarity weights, lowest tier first.
    pub rarity_weights: Vec<(Rarity, u32)>,
    pub drops: RangeInclusive<usize>,
    pub boss_drops: RangeInclusive<usize>,
}

impl Default for LootTable {
    fn default() -> Self {
        Self {
            bases: default_bases(),
            rarity_weights: vec![
                (Rarity::Common, 60),
                (Rarity::Magic, 25),
                (Rarity::Rare, 10),
                (Rarity::Epic, 4),
                (Rarity::Legendary, 1),
            ],
            drops: 0..=2,
            boss_drops: 2..=4,
        }
    }
}

impl LootTable {
    /// Rolls the drops for one defeated enemy.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, level: u32, is_boss: bool) -> Vec<Item> {
        if self.bases.is_empty() {
            return Vec::new();
        }
        let range = if is_boss { &self.boss_drops } else { &self.drops };
        let count = rng.gen_range(range.clone());
        (0..count)
            .map(|_| self.roll_item(rng, level.max(1), is_boss))
            .collect()
    }

    fn roll_item<R: Rng + ?Sized>(&self, rng: &mut R, level: u32, is_boss: bool) -> Item {
        let base = &self.bases[rng.gen_range(0..self.bases.len())];
        let mut rarity = self.roll_rarity(rng);
        if is_boss {
            rarity = rarity.max(self.roll_rarity(rng));
        }
        let power = rarity_multiplier(rarity) * (1.0 + 0.15 * f64::from(level - 1));

        Item {
            id: ItemId(rng.gen_range(1..u64::MAX)),
            name: format!("{} {}", rarity_label(rarity), base.name),
            slot: base.slot,
            base_type: base.base_type.to_owned(),
            rarity,
            level,
            value: item_value(level, rarity),
            stats: scale(&base.stats, power),
            requirements: Requirements {
                level: level.saturating_sub(2).max(1),
                ..Requirements::default()
            },
        }
    }

    fn roll_rarity<R: Rng + ?Sized>(&self, rng: &mut R) -> Rarity {
        let total: u32 = self.rarity_weights.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return Rarity::Common;
        }
        let mut pick = rng.gen_range(0..total);
        for (rarity, weight) in &self.rarity_weights {
            if pick < *weight {
                return *rarity;
            }
            pick -= weight;
        }
        Rarity::Common
    }
}

/// Gold paid for an item when sold or converted on a full inventory.
pub fn item_value(level: u32, rarity: Rarity) -> u64 {
    let base = 5 + 3 * u64::from(level);
    (base as f64 * rarity_multiplier(rarity)).round() as u64
}

fn rarity_multiplier(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 1.0,
        Rarity::Magic => 1.5,
        Rarity::Rare => 2.25,
        Rarity::Epic => 3.5,
        Rarity::Legendary => 5.0,
    }
}

fn rarity_label(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "Plain",
        Rarity::Magic => "Enchanted",
        Rarity::Rare => "Rare",
        Rarity::Epic => "Epic",
        Rarity::Legendary => "Legendary",
    }
}

fn scale(stats: &StatBlock, factor: f64) -> StatBlock {
    let round = |v: f64| (v * factor * 10.0).round() / 10.0;
    StatBlock {
        flat_damage: round(stats.flat_damage),
        increased_damage_pct: round(stats.increased_damage_pct),
        max_hp: round(stats.max_hp),
        max_mana: round(stats.max_mana),
        mana_regen: round(stats.mana_regen),
        strength: round(stats.strength),
        intelligence: round(stats.intelligence),
        dexterity: round(stats.dexterity),
        luck: round(stats.luck),
    }
}

fn default_bases() -> Vec<ItemBase> {
    let base = |name, slot, base_type, f: fn(&mut StatBlock)| {
        let mut stats = StatBlock::default();
        f(&mut stats);
        ItemBase {
            name,
            slot,
            base_type,
            stats,
        }
    };
    vec![
        base("Sword", EquipmentSlot::Weapon, "sword", |s| {
            s.flat_damage = 4.0;
            s.strength = 1.0;
        }),
        base("Staff", EquipmentSlot::Weapon, "staff", |s| {
            s.flat_damage = 2.0;
            s.increased_damage_pct = 5.0;
            s.intelligence = 1.0;
        }),
        base("Bow", EquipmentSlot::Weapon, "bow", |s| {
            s.flat_damage = 3.0;
            s.dexterity = 1.0;
        }),
        base("Cap", EquipmentSlot::Helmet, "helmet", |s| s.max_hp = 8.0),
        base("Tunic", EquipmentSlot::Chest, "chest", |s| s.max_hp = 15.0),
        base("Gloves", EquipmentSlot::Gloves, "gloves", |s| {
            s.increased_damage_pct = 3.0;
            s.dexterity = 1.0;
        }),
        base("Boots", EquipmentSlot::Boots, "boots", |s| {
            s.max_hp = 5.0;
            s.dexterity = 1.0;
        }),
        base("Amulet", EquipmentSlot::Amulet, "amulet", |s| {
            s.max_mana = 10.0;
            s.mana_regen = 0.5;
        }),
        base("Ring", EquipmentSlot::Ring, "ring", |s| {
            s.luck = 1.0;
            s.max_mana = 5.0;
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn drop_counts_stay_in_range() {
        let table = LootTable::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(table.roll(&mut rng, 5, false).len() <= 2);
            let boss = table.roll(&mut rng, 5, true).len();
            assert!((2..=4).contains(&boss), "boss dropped {boss}");
        }
    }

    #[test]
    fn value_scales_with_level_and_rarity() {
        assert_eq!(item_value(1, Rarity::Common), 8);
        assert!(item_value(10, Rarity::Common) > item_value(1, Rarity::Common));
        assert!(item_value(10, Rarity::Legendary) > item_value(10, Rarity::Rare));
    }

    #[test]
    fn rolled_items_carry_level_and_requirements() {
        let table = LootTable::default();
        let mut rng = StdRng::seed_from_u64(42);
        let items = table.roll(&mut rng, 12, true);
        assert!(!items.is_empty());
        for item in items {
            assert_eq!(item.level, 12);
            assert_eq!(item.requirements.level, 10);
            assert_eq!(item.value, item_value(12, item.rarity));
            assert!(!item.base_type.is_empty());
        }
    }

    #[test]
    fn empty_table_drops_nothing() {
        let table = LootTable {
            bases: Vec::new(),
            ..LootTable::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(table.roll(&mut rng, 3, true).is_empty());
    }
}
