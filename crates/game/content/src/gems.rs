//! Built-in skill and support gem templates.
//!
//! Templates are handed out locked and at level 1. Ids are stable: saves,
//! the projectile class list and manual cast recipes refer to them.
use game_core::{
    ModifierKind, Rarity, SkillGem, SkillScaling, SkillTags, SupportGem, SupportModifier,
};

const MAX_GEM_LEVEL: u32 = 20;

struct SkillDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    tags: SkillTags,
    unlock_level: u32,
    unlock_cost: u32,
    scaling: SkillScaling,
}

impl SkillDef {
    fn build(self) -> SkillGem {
        SkillGem {
            id: self.id.into(),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            level: 1,
            max_level: MAX_GEM_LEVEL,
            rarity: self.rarity,
            quality: 0,
            tags: self.tags,
            scaling: self.scaling,
            unlock_level: self.unlock_level,
            unlock_cost: self.unlock_cost,
            supports: Default::default(),
            is_unlocked: false,
            is_equipped: false,
        }
    }
}

pub fn builtin_skill_gems() -> Vec<SkillGem> {
    [
        SkillDef {
            id: "whirlwind",
            name: "Whirlwind",
            description: "Spin continuously, striking every nearby enemy.",
            rarity: Rarity::Common,
            tags: SkillTags::CHANNEL | SkillTags::AOE | SkillTags::PHYSICAL | SkillTags::MELEE,
            unlock_level: 1,
            unlock_cost: 1,
            scaling: SkillScaling {
                base_damage: 6.0,
                damage_per_level: 1.5,
                base_cooldown_ms: 500.0,
                cooldown_per_level: -10.0,
                base_area: 2.0,
                area_per_level: 0.1,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "fireball",
            name: "Fireball",
            description: "Hurl a ball of fire at the nearest enemy.",
            rarity: Rarity::Common,
            tags: SkillTags::SPELL | SkillTags::PROJECTILE | SkillTags::FIRE,
            unlock_level: 1,
            unlock_cost: 1,
            scaling: SkillScaling {
                base_damage: 25.0,
                damage_per_level: 6.0,
                base_mana_cost: 8.0,
                mana_cost_per_level: 0.5,
                base_cooldown_ms: 1_200.0,
                base_range: 400.0,
                range_per_level: 5.0,
                base_projectiles: 1,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "lightning_bolt",
            name: "Lightning Bolt",
            description: "A fast bolt that strikes far away targets.",
            rarity: Rarity::Magic,
            tags: SkillTags::SPELL | SkillTags::PROJECTILE | SkillTags::LIGHTNING,
            unlock_level: 3,
            unlock_cost: 1,
            scaling: SkillScaling {
                base_damage: 18.0,
                damage_per_level: 5.0,
                base_mana_cost: 6.0,
                mana_cost_per_level: 0.4,
                base_cooldown_ms: 800.0,
                base_range: 500.0,
                base_projectiles: 1,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "ice_shard",
            name: "Ice Shard",
            description: "Fire a volley of shards at nearby enemies.",
            rarity: Rarity::Magic,
            tags: SkillTags::SPELL | SkillTags::PROJECTILE | SkillTags::COLD,
            unlock_level: 5,
            unlock_cost: 2,
            scaling: SkillScaling {
                base_damage: 12.0,
                damage_per_level: 3.5,
                base_mana_cost: 5.0,
                mana_cost_per_level: 0.3,
                base_cooldown_ms: 900.0,
                base_range: 350.0,
                base_projectiles: 3,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "split_arrow",
            name: "Split Arrow",
            description: "Loose several arrows at once.",
            rarity: Rarity::Common,
            tags: SkillTags::PHYSICAL | SkillTags::PROJECTILE,
            unlock_level: 4,
            unlock_cost: 1,
            scaling: SkillScaling {
                base_damage: 11.0,
                damage_per_level: 3.0,
                base_mana_cost: 4.0,
                base_cooldown_ms: 1_000.0,
                base_range: 450.0,
                base_projectiles: 3,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "ice_nova",
            name: "Ice Nova",
            description: "A ring of frost that damages every enemy.",
            rarity: Rarity::Rare,
            tags: SkillTags::SPELL | SkillTags::AOE | SkillTags::COLD,
            unlock_level: 6,
            unlock_cost: 2,
            scaling: SkillScaling {
                base_damage: 30.0,
                damage_per_level: 7.0,
                base_mana_cost: 15.0,
                mana_cost_per_level: 1.0,
                base_cooldown_ms: 3_000.0,
                cooldown_per_level: -50.0,
                base_area: 3.0,
                area_per_level: 0.1,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "ground_slam",
            name: "Ground Slam",
            description: "Slam the ground, stunning enemies around you.",
            rarity: Rarity::Rare,
            tags: SkillTags::PHYSICAL | SkillTags::AOE | SkillTags::MELEE | SkillTags::DURATION,
            unlock_level: 8,
            unlock_cost: 2,
            scaling: SkillScaling {
                base_damage: 35.0,
                damage_per_level: 8.0,
                base_mana_cost: 12.0,
                mana_cost_per_level: 0.8,
                base_cooldown_ms: 2_500.0,
                base_area: 2.5,
                area_per_level: 0.05,
                base_duration_ms: 1_000.0,
                duration_per_level: 50.0,
                ..SkillScaling::default()
            },
        },
        SkillDef {
            id: "quick_strike",
            name: "Quick Strike",
            description: "Rapid blows. Each level speeds up the whole rotation.",
            rarity: Rarity::Magic,
            tags: SkillTags::PHYSICAL | SkillTags::MELEE | SkillTags::QUICK,
            unlock_level: 2,
            unlock_cost: 1,
            scaling: SkillScaling {
                base_damage: 9.0,
                damage_per_level: 2.5,
                base_mana_cost: 3.0,
                base_cooldown_ms: 400.0,
                base_range: 120.0,
                ..SkillScaling::default()
            },
        },
    ]
    .into_iter()
    .map(SkillDef::build)
    .collect()
}

fn modifier(kind: ModifierKind, value: f64, per_level: f64, is_percentage: bool) -> SupportModifier {
    SupportModifier {
        kind,
        value,
        per_level,
        is_percentage,
        description: String::new(),
    }
}

fn support(
    id: &str,
    name: &str,
    description: &str,
    tags: SkillTags,
    unlock_level: u32,
    modifiers: Vec<SupportModifier>,
) -> SupportGem {
    SupportGem {
        id: id.into(),
        name: name.to_owned(),
        description: description.to_owned(),
        level: 1,
        max_level: MAX_GEM_LEVEL,
        tags,
        modifiers,
        unlock_level,
        unlock_cost: 1,
        is_unlocked: false,
    }
}

pub fn builtin_support_gems() -> Vec<SupportGem> {
    use ModifierKind::*;

    vec![
        support(
            "added_fire",
            "Added Fire",
            "Supported skills deal more damage as fire.",
            SkillTags::FIRE | SkillTags::SPELL,
            1,
            vec![modifier(Damage, 25.0, 2.0, true)],
        ),
        support(
            "melee_physical",
            "Melee Physical Damage",
            "Supported melee skills hit harder.",
            SkillTags::MELEE | SkillTags::PHYSICAL,
            2,
            vec![modifier(Damage, 30.0, 2.5, true)],
        ),
        support(
            "increased_area",
            "Increased Area of Effect",
            "Supported skills cover a larger area.",
            SkillTags::AOE,
            3,
            vec![modifier(AreaOfEffect, 25.0, 1.5, true)],
        ),
        support(
            "multiple_projectiles",
            "Multiple Projectiles",
            "Supported skills fire extra projectiles at reduced damage.",
            SkillTags::PROJECTILE,
            4,
            vec![
                modifier(ProjectileCount, 2.0, 0.0, false),
                modifier(DamageMultiplier, 0.75, 0.01, false),
            ],
        ),
        support(
            "faster_casting",
            "Faster Casting",
            "Supported spells recover sooner.",
            SkillTags::SPELL,
            4,
            vec![modifier(Cooldown, -20.0, -1.0, true)],
        ),
        support(
            "concentrated_effect",
            "Concentrated Effect",
            "Trades area for damage.",
            SkillTags::AOE,
            6,
            vec![
                modifier(DamageMultiplier, 1.4, 0.01, false),
                modifier(AreaOfEffect, -30.0, 0.0, true),
            ],
        ),
        support(
            "spell_echo",
            "Spell Echo",
            "Supported spells repeat at a higher mana cost.",
            SkillTags::SPELL,
            8,
            vec![
                modifier(DamageMultiplier, 1.5, 0.01, false),
                modifier(ManaCost, 40.0, 0.0, true),
            ],
        ),
        support(
            "efficiency",
            "Efficiency",
            "Supported skills cost less mana.",
            SkillTags::SPELL | SkillTags::PHYSICAL,
            2,
            vec![modifier(ManaCost, -25.0, -1.0, true)],
        ),
    ]
}
