//! Static game content and loaders.
//!
//! This crate houses the built-in content of the idle ARPG and loaders for
//! data-driven overrides:
//! - skill and support gem templates
//! - the default passive tree
//! - the default loot table
//! - stone schema migration rules
//! - RON catalogs (`skills.ron`, `supports.ron`, `passive_tree.ron`)
//!
//! Content is consumed by runtime oracles and never mutated at runtime.
pub mod catalog;
pub mod gems;
pub mod loot;
pub mod passive;
pub mod stones;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ContentCatalog;
pub use gems::{builtin_skill_gems, builtin_support_gems};
pub use loot::{ItemBase, LootTable, item_value};
pub use passive::default_passive_tree;
pub use stones::{CURRENT_STONE_VERSION, force_migrate_stones, migrate_stones};

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, PassiveTreeLoader, SkillLoader, SupportLoader};
