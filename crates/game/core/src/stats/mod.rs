//! Stat system.
//!
//! ```text
//! [ SkillGem template ] → level scaling → support fold → rarity → player bonuses
//!                                                                     ↑
//! [ equipment + stones + passives ] ──────────────→ DerivedStats ─────┘
//! ```
//!
//! Everything here is a pure function of its inputs.

pub mod bonus;
pub mod derived;
pub mod modifiers;
pub mod rarity;
pub mod skill;

pub use bonus::{Bonus, BonusStack};
pub use derived::{DerivedStats, compute_derived_stats, total_bonuses};
pub use modifiers::SkillValues;
pub use rarity::RarityBonus;
pub use skill::{EffectiveSkillStats, resolve_skill, resolve_with_stats, scaled_values};
