use std::fmt;

use serde::{Deserialize, Serialize};

/// Defines a string-backed identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Catalog identifier of an active skill gem (e.g. `fireball`).
    SkillId
);
string_id!(
    /// Catalog identifier of a support gem (e.g. `added_fire`).
    SupportId
);
string_id!(
    /// Identifier of a socketed stone.
    StoneId
);
string_id!(
    /// Identifier of a passive tree node.
    NodeId
);

/// Unique identifier of a spawned enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(pub u64);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a dropped item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock instant in milliseconds.
///
/// The core never reads a clock; every time-dependent operation receives one
/// of these from the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    #[inline]
    pub const fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renderer-space position. Only used for distance checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Tier shared by gems and items.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Magic,
    Rare,
    Epic,
    Legendary,
}

/// Base character attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub strength: u32,
    pub intelligence: u32,
    pub dexterity: u32,
    pub luck: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        let base = crate::config::GameConfig::STARTING_ATTRIBUTE;
        Self {
            strength: base,
            intelligence: base,
            dexterity: base,
            luck: base,
        }
    }
}

impl Attributes {
    /// Adds signed bonuses, clamping each attribute at zero.
    pub fn with_bonus(self, bonus: &StatBlock) -> Self {
        let add = |base: u32, delta: f64| (base as f64 + delta).max(0.0).round() as u32;
        Self {
            strength: add(self.strength, bonus.strength),
            intelligence: add(self.intelligence, bonus.intelligence),
            dexterity: add(self.dexterity, bonus.dexterity),
            luck: add(self.luck, bonus.luck),
        }
    }
}

/// Additive stat contributions granted by items, stones and passive nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub flat_damage: f64,
    pub increased_damage_pct: f64,
    pub max_hp: f64,
    pub max_mana: f64,
    pub mana_regen: f64,
    pub strength: f64,
    pub intelligence: f64,
    pub dexterity: f64,
    pub luck: f64,
}

impl StatBlock {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::ops::AddAssign<&StatBlock> for StatBlock {
    fn add_assign(&mut self, rhs: &StatBlock) {
        self.flat_damage += rhs.flat_damage;
        self.increased_damage_pct += rhs.increased_damage_pct;
        self.max_hp += rhs.max_hp;
        self.max_mana += rhs.max_mana;
        self.mana_regen += rhs.mana_regen;
        self.strength += rhs.strength;
        self.intelligence += rhs.intelligence;
        self.dexterity += rhs.dexterity;
        self.luck += rhs.luck;
    }
}

impl<'a> std::iter::Sum<&'a StatBlock> for StatBlock {
    fn sum<I: Iterator<Item = &'a StatBlock>>(iter: I) -> Self {
        iter.fold(StatBlock::default(), |mut acc, block| {
            acc += block;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_since_saturates() {
        let early = Timestamp(500);
        let late = Timestamp(1200);
        assert_eq!(late.since(early), 700);
        assert_eq!(early.since(late), 0);
    }

    #[test]
    fn attribute_bonus_never_goes_negative() {
        let bonus = StatBlock {
            strength: -50.0,
            dexterity: 4.0,
            ..StatBlock::default()
        };
        let attrs = Attributes::default().with_bonus(&bonus);
        assert_eq!(attrs.strength, 0);
        assert_eq!(attrs.dexterity, 14);
        assert_eq!(attrs.intelligence, 10);
    }

    #[test]
    fn string_ids_serialize_transparently() {
        let id = SkillId::from("fireball");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"fireball\"");
        assert_eq!(id.to_string(), "fireball");
    }

    #[test]
    fn stat_blocks_sum_field_wise() {
        let blocks = [
            StatBlock {
                flat_damage: 3.0,
                max_hp: 10.0,
                ..StatBlock::default()
            },
            StatBlock {
                flat_damage: 2.0,
                mana_regen: 1.5,
                ..StatBlock::default()
            },
        ];
        let total: StatBlock = blocks.iter().sum();
        assert_eq!(total.flat_damage, 5.0);
        assert_eq!(total.max_hp, 10.0);
        assert_eq!(total.mana_regen, 1.5);
    }
}
