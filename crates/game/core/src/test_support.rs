//! Fixtures shared by the unit tests.
use std::collections::BTreeSet;

use crate::env::{AllocationError, CatalogOracle, LootOracle, PassiveTreeOracle, StoneOracle};
use crate::state::{
    Enemy, EnemyId, EquipmentSlot, Item, ItemId, ModifierKind, NodeId, PassiveNode,
    PassiveTreeData, PassiveTreeState, Rarity, Requirements, SkillGem, SkillScaling, SkillTags,
    StatBlock, Stone, StoneId, SupportGem, SupportLinks, SupportModifier,
};

/// Locked level-1 skill with empty scaling.
pub fn skill(id: &str, tags: SkillTags) -> SkillGem {
    SkillGem {
        id: id.into(),
        name: id.to_owned(),
        description: String::new(),
        level: 1,
        max_level: 20,
        rarity: Rarity::Common,
        quality: 0,
        tags,
        scaling: SkillScaling::default(),
        unlock_level: 1,
        unlock_cost: 1,
        supports: SupportLinks::new(),
        is_unlocked: false,
        is_equipped: false,
    }
}

/// Locked level-1 support with a single modifier.
pub fn support(
    id: &str,
    tags: SkillTags,
    kind: ModifierKind,
    value: f64,
    is_percentage: bool,
) -> SupportGem {
    SupportGem {
        id: id.into(),
        name: id.to_owned(),
        description: String::new(),
        level: 1,
        max_level: 20,
        tags,
        modifiers: vec![SupportModifier {
            kind,
            value,
            per_level: 0.0,
            is_percentage,
            description: String::new(),
        }],
        unlock_level: 1,
        unlock_cost: 1,
        is_unlocked: false,
    }
}

pub fn item(id: u64, slot: EquipmentSlot, flat_damage: f64) -> Item {
    Item {
        id: ItemId(id),
        name: format!("Item {id}"),
        slot,
        base_type: String::new(),
        rarity: Rarity::Common,
        level: 1,
        value: 0,
        stats: StatBlock {
            flat_damage,
            ..StatBlock::default()
        },
        requirements: Requirements::default(),
    }
}

/// Level-1 enemy at full `hp`.
pub fn enemy(id: u64, hp: f64) -> Enemy {
    Enemy::new(EnemyId(id), format!("Enemy {id}"), 1, hp)
}

/// Drops the same items for every defeat.
pub struct FixedLoot {
    items: Vec<Item>,
}

impl FixedLoot {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl LootOracle for FixedLoot {
    fn generate_loot(&self, _level: u32, _is_boss: bool) -> Vec<Item> {
        self.items.clone()
    }
}

/// Three skills, one support and a two-node tree.
pub struct TestCatalog {
    pub skills: Vec<SkillGem>,
    pub supports: Vec<SupportGem>,
    pub tree: PassiveTreeData,
}

impl TestCatalog {
    pub const VITALITY_HP: f64 = 20.0;
}

impl Default for TestCatalog {
    fn default() -> Self {
        let mut whirlwind = skill(
            "whirlwind",
            SkillTags::CHANNEL | SkillTags::AOE | SkillTags::PHYSICAL | SkillTags::MELEE,
        );
        whirlwind.scaling = SkillScaling {
            base_damage: 5.0,
            base_area: 2.0,
            base_cooldown_ms: 100.0,
            ..SkillScaling::default()
        };

        let mut fireball = skill(
            "fireball",
            SkillTags::SPELL | SkillTags::PROJECTILE | SkillTags::FIRE,
        );
        fireball.scaling = SkillScaling {
            base_damage: 20.0,
            damage_per_level: 4.0,
            base_mana_cost: 5.0,
            base_cooldown_ms: 1_000.0,
            base_range: 300.0,
            base_projectiles: 1,
            ..SkillScaling::default()
        };

        let mut nova = skill("ice_nova", SkillTags::SPELL | SkillTags::AOE | SkillTags::COLD);
        nova.unlock_level = 3;
        nova.scaling = SkillScaling {
            base_damage: 15.0,
            base_mana_cost: 10.0,
            base_cooldown_ms: 2_000.0,
            base_area: 3.0,
            ..SkillScaling::default()
        };

        let added_fire = support(
            "added_fire",
            SkillTags::FIRE | SkillTags::SPELL,
            ModifierKind::Damage,
            25.0,
            true,
        );

        let tree = PassiveTreeData::from_nodes([
            PassiveNode {
                id: NodeId::from("vitality"),
                name: "Vitality".into(),
                stats: StatBlock {
                    max_hp: Self::VITALITY_HP,
                    ..StatBlock::default()
                },
                connections: vec![NodeId::from("focus")],
                is_start: true,
            },
            PassiveNode {
                id: NodeId::from("focus"),
                name: "Focus".into(),
                stats: StatBlock {
                    max_mana: 10.0,
                    ..StatBlock::default()
                },
                connections: vec![NodeId::from("vitality")],
                is_start: false,
            },
        ]);

        Self {
            skills: vec![whirlwind, fireball, nova],
            supports: vec![added_fire],
            tree,
        }
    }
}

impl CatalogOracle for TestCatalog {
    fn skill_gems(&self) -> Vec<SkillGem> {
        self.skills.clone()
    }

    fn support_gems(&self) -> Vec<SupportGem> {
        self.supports.clone()
    }

    fn passive_tree(&self) -> PassiveTreeData {
        self.tree.clone()
    }
}

/// Allocates any existing node while points remain; ignores adjacency.
pub struct PassThroughPassives;

impl PassiveTreeOracle for PassThroughPassives {
    fn allocate_node(
        &self,
        node: &NodeId,
        data: &PassiveTreeData,
        state: &PassiveTreeState,
    ) -> Result<PassiveTreeState, AllocationError> {
        let found = data
            .node(node)
            .ok_or_else(|| AllocationError::UnknownNode(node.clone()))?;
        if state.is_allocated(node) {
            return Err(AllocationError::AlreadyAllocated(found.name.clone()));
        }
        if state.available_points == 0 {
            return Err(AllocationError::NoPoints);
        }
        let mut next = state.clone();
        next.allocated.insert(node.clone());
        next.available_points -= 1;
        Ok(next)
    }
}

/// Suffixes repeated stone ids and stamps version 1.
pub struct UniqueStones;

impl UniqueStones {
    fn uniquify(stones: &mut [Stone]) {
        let mut seen = BTreeSet::new();
        for (index, stone) in stones.iter_mut().enumerate() {
            if !seen.insert(stone.id.clone()) {
                stone.id = StoneId::new(format!("{}_{index}", stone.id));
                seen.insert(stone.id.clone());
            }
            stone.version = stone.version.max(1);
        }
    }
}

impl StoneOracle for UniqueStones {
    fn migrate_player_stones(&self, mut stones: Vec<Stone>) -> Vec<Stone> {
        Self::uniquify(&mut stones);
        stones
    }

    fn force_migrate_all_stones(&self, stones: &mut Vec<Stone>) {
        Self::uniquify(stones);
    }
}
