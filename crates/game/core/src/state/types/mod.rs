pub mod common;
pub mod enemy;
pub mod equipment;
pub mod item;
pub mod log;
pub mod passive;
pub mod player;
pub mod registry;
pub mod skill;
pub mod stone;
pub mod support;
pub mod tags;

pub use common::{
    Attributes, EnemyId, ItemId, NodeId, Position, Rarity, SkillId, StatBlock, StoneId,
    SupportId, Timestamp,
};
pub use enemy::{Enemy, EnemyState};
pub use equipment::{Equipment, EquipmentSlot};
pub use item::{Item, Requirements};
pub use log::{AnimationCommand, GameLog, LogLine, ParseAnimationError};
pub use passive::{PassiveNode, PassiveTreeData, PassiveTreeState};
pub use player::{CharacterModel, Player, SkillBar};
pub use registry::{Keyed, Registry};
pub use skill::{SkillGem, SkillScaling, SupportLinks};
pub use stone::Stone;
pub use support::{ModifierKind, SupportGem, SupportModifier};
pub use tags::SkillTags;
