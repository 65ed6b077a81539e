use serde::{Deserialize, Serialize};

use super::common::{Rarity, StatBlock, StoneId};

/// A stone socketed into the character.
///
/// `version` tracks the stone schema; older stones are upgraded by the stone
/// oracle on load and on insertion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub id: StoneId,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub version: u32,
}
