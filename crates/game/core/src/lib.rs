//! Deterministic combat and progression rules for the idle ARPG.
//!
//! `game-core` defines the canonical rules (actions, engine, game state) and
//! exposes pure APIs: no clocks, no randomness, no I/O. All state mutation
//! flows through [`engine::GameEngine`]; time arrives as an explicit
//! [`Timestamp`] and everything random is delegated to the oracles in [`env`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod skills;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::{Action, ActionKind};
pub use combat::{CastError, Resolution, auto_interval_ms, is_channel_active};
pub use config::GameConfig;
pub use engine::{
    EquipError, GameEngine, ReduceOutcome, StatsCache, StatsKey, StatsMemo, Uncached,
};
pub use env::{
    AllocationError, CatalogOracle, GameEnv, IdentityMigrator, LootOracle, OracleError,
    PassiveTreeOracle, SnapshotMigrator, StoneOracle,
};
pub use error::{ErrorSeverity, GameError, Rejection};
pub use skills::{SkillError, SkillOutcome};
pub use state::{
    AnimationCommand, Attributes, CharacterModel, Enemy, EnemyId, EnemyState, Equipment,
    EquipmentSlot, GameLog, GameState, Item, ItemId, LogLine, ModifierKind, NodeId, PassiveNode,
    PassiveTreeData, PassiveTreeState, Player, Position, Rarity, Requirements, SaveSnapshot,
    SkillBar, SkillGem, SkillId, SkillScaling, SkillTags, SkillsSnapshot, StatBlock, Stone,
    StoneId, SupportGem, SupportId, SupportModifier, Timestamp,
};
pub use stats::{DerivedStats, EffectiveSkillStats, resolve_skill};
