//! Dispatchable actions.
//!
//! [`Action`] is the complete input surface of the reducer. Timers, the
//! renderer and the player all speak it; [`ActionKind`] is its payload-free
//! discriminant used for routing, logging and the stats/persistence gates.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::{
    CharacterModel, Enemy, EnemyId, Equipment, EquipmentSlot, ItemId, NodeId, Position,
    SaveSnapshot, SkillId, Stone, StoneId, SupportId,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
#[strum_discriminants(name(ActionKind))]
#[strum_discriminants(derive(
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr
))]
#[strum_discriminants(serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum_discriminants(strum(serialize_all = "SCREAMING_SNAKE_CASE"))]
pub enum Action {
    /// Merge and repair a persisted snapshot.
    Load(Box<SaveSnapshot>),
    /// Adds enemies until the field holds the maximum.
    Spawn(Vec<Enemy>),
    /// Player basic attack.
    Tick { enemy_id: EnemyId, damage: f64 },
    Remove(EnemyId),
    Equip(ItemId),
    Unequip(EquipmentSlot),
    Discard(ItemId),
    SellAll,
    ToggleAuto,
    /// Wipes progress but keeps the equipped items.
    Reset,
    Log(String),
    UnlockSkillGem(SkillId),
    UnlockSupportGem(SupportId),
    LevelUpSkillGem(SkillId),
    LevelUpSupportGem(SupportId),
    EquipSkillToBar { skill_id: SkillId, slot: usize },
    UnequipSkillFromBar { slot: usize },
    AttachSupportGem { skill_id: SkillId, support_id: SupportId },
    DetachSupportGem { skill_id: SkillId, support_id: SupportId },
    UseSkill(SkillId),
    UpdateEnemyPositions(BTreeMap<EnemyId, Position>),
    UpdatePlayerPosition(Position),
    ChannelWhirlwind,
    AutoSkills,
    ManaRegen,
    AllocatePassiveNode(NodeId),
    AddStone(Stone),
    RemoveStone(StoneId),
    ForceMigrateStones,
    UpdateEquipment(Equipment),
    UpdateCharacterModel(CharacterModel),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        ActionKind::from(self)
    }

    pub fn load(snapshot: SaveSnapshot) -> Self {
        Self::Load(Box::new(snapshot))
    }
}

impl ActionKind {
    /// Actions that can change derived stats.
    ///
    /// Every other action must leave `Player::stats` untouched.
    pub const fn recomputes_stats(self) -> bool {
        use ActionKind::*;
        matches!(
            self,
            Load | Equip
                | Unequip
                | SellAll
                | UnlockSkillGem
                | UnlockSupportGem
                | LevelUpSkillGem
                | LevelUpSupportGem
                | EquipSkillToBar
                | UnequipSkillFromBar
                | AttachSupportGem
                | DetachSupportGem
                | AllocatePassiveNode
        )
    }

    /// Whether the runtime saves after applying this action.
    ///
    /// Actions that change nothing a save holds (the log and renderer
    /// positions) are not persisted.
    pub const fn persists(self) -> bool {
        use ActionKind::*;
        !matches!(self, Log | UpdateEnemyPositions | UpdatePlayerPosition)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
