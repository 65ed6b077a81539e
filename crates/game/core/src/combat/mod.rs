//! Combat ticks.
//!
//! Every damage source (channel pulse, auto rotation, manual cast) applies its
//! hits and then runs the shared post-damage [`resolution`]: dying
//! transitions, loot, experience and level-ups.
//!
//! # Modules
//!
//! - `targeting`: nearest-first ranking over renderer-supplied positions
//! - `resolution`: defeat handling, loot award with gold conversion, purge
//! - `channel`: the dedicated channel-skill timer tick
//! - `auto`: automatic rotation over the skill bar
//! - `manual`: fixed per-skill cast recipes
//! - `regen`: mana regeneration

pub mod auto;
pub mod channel;
pub mod manual;
pub mod regen;
pub mod resolution;
pub mod targeting;

pub use auto::{AutoReport, SkillCast, auto_interval_ms, auto_skills_tick};
pub use channel::{ChannelReport, channel_skill_id, channel_tick, is_channel_active};
pub use manual::{CastError, CastPattern, CastRecipe, ManualCast, use_skill};
pub use regen::mana_regen_tick;
pub use resolution::{Defeat, LootAward, Resolution, award_loot, purge_expired, resolve_defeats};
pub use targeting::{Target, enemies_in_range, nearest_target, ranked_targets};
