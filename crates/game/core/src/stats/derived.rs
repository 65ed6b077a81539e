//! Derived player stats.
//!
//! Folds equipment, stones, allocated passive nodes and the equipped bar
//! skills into the values combat reads. Expensive enough that the engine only
//! recomputes it for stat-affecting actions, through the stats cache.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bonus::{Bonus, BonusStack};
use super::skill::{EffectiveSkillStats, resolve_with_stats};
use crate::config::GameConfig;
use crate::state::{Attributes, Player, SkillId, StatBlock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedStats {
    /// Base attributes plus every attribute bonus.
    pub attributes: Attributes,
    pub flat_damage: f64,
    pub increased_damage_pct: f64,
    pub max_hp: f64,
    pub max_mana: f64,
    pub mana_regen: f64,
    /// Effective stats of each skill on the bar.
    pub skills: BTreeMap<SkillId, EffectiveSkillStats>,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            attributes: Attributes::default(),
            flat_damage: 0.0,
            increased_damage_pct: 0.0,
            max_hp: GameConfig::STARTING_HP,
            max_mana: GameConfig::STARTING_MANA,
            mana_regen: GameConfig::STARTING_MANA_REGEN,
            skills: BTreeMap::new(),
        }
    }
}

/// Sum of every additive bonus source the player carries.
pub fn total_bonuses(player: &Player) -> StatBlock {
    let mut total = player.equipment.total_stats();
    for stone in &player.stones {
        total += &stone.stats;
    }
    total += &player
        .passive_tree_state
        .total_stats(&player.passive_tree_data);
    total
}

pub fn compute_derived_stats(player: &Player) -> DerivedStats {
    let bonuses = total_bonuses(player);

    let resource = |base: f64, flat: f64| {
        let mut stack = BonusStack::new();
        stack.add(Bonus::flat(flat));
        stack.apply_non_negative(base)
    };

    let mut stats = DerivedStats {
        attributes: player.attributes.with_bonus(&bonuses),
        flat_damage: bonuses.flat_damage.max(0.0),
        increased_damage_pct: bonuses.increased_damage_pct,
        max_hp: resource(player.base_max_hp, bonuses.max_hp).max(1.0),
        max_mana: resource(player.base_max_mana, bonuses.max_mana),
        mana_regen: resource(player.base_mana_regen, bonuses.mana_regen),
        skills: BTreeMap::new(),
    };

    let skills = player
        .bar_skills()
        .filter(|(_, gem)| gem.is_unlocked)
        .map(|(_, gem)| {
            let supports = player.supports_of(gem);
            (gem.id.clone(), resolve_with_stats(gem, &supports, Some(&stats)))
        })
        .collect();
    stats.skills = skills;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EquipmentSlot, NodeId, PassiveNode, PassiveTreeData, SkillTags, Stone};
    use crate::test_support::{item, skill};

    #[test]
    fn folds_equipment_stones_and_passives() {
        let mut player = Player::default();
        let mut helmet = item(1, EquipmentSlot::Helmet, 0.0);
        helmet.stats.max_hp = 25.0;
        helmet.stats.strength = 5.0;
        player.equipment.equip(helmet);
        player.equipment.equip(item(2, EquipmentSlot::Weapon, 6.0));

        player.stones.push(Stone {
            id: "stone_1".into(),
            name: "Ember".into(),
            rarity: Default::default(),
            stats: StatBlock {
                flat_damage: 2.0,
                mana_regen: 1.0,
                ..StatBlock::default()
            },
            version: 1,
        });

        player.passive_tree_data = PassiveTreeData::from_nodes([PassiveNode {
            id: NodeId::from("vitality"),
            name: "Vitality".into(),
            stats: StatBlock {
                max_hp: 10.0,
                increased_damage_pct: 5.0,
                ..StatBlock::default()
            },
            connections: vec![],
            is_start: true,
        }]);
        player
            .passive_tree_state
            .allocated
            .insert(NodeId::from("vitality"));

        let stats = compute_derived_stats(&player);
        assert_eq!(stats.max_hp, GameConfig::STARTING_HP + 35.0);
        assert_eq!(stats.flat_damage, 8.0);
        assert_eq!(stats.mana_regen, GameConfig::STARTING_MANA_REGEN + 1.0);
        assert_eq!(stats.increased_damage_pct, 5.0);
        assert_eq!(stats.attributes.strength, 15);
    }

    #[test]
    fn summarizes_only_unlocked_bar_skills() {
        let mut player = Player::default();
        let mut fireball = skill("fireball", SkillTags::SPELL);
        fireball.is_unlocked = true;
        let locked = skill("ice_nova", SkillTags::SPELL);
        player.skill_gems.insert(fireball);
        player.skill_gems.insert(locked);
        player.skill_bar.set(0, Some("fireball".into()));
        player.skill_bar.set(1, Some("ice_nova".into()));

        let stats = compute_derived_stats(&player);
        assert!(stats.skills.contains_key(&SkillId::from("fireball")));
        assert!(!stats.skills.contains_key(&SkillId::from("ice_nova")));
    }
}
