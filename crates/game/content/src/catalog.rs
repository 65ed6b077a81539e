//! Static content bundle consumed by the runtime oracles.
use game_core::{PassiveTreeData, SkillGem, SupportGem};

use crate::gems::{builtin_skill_gems, builtin_support_gems};
use crate::passive::default_passive_tree;

/// Gem templates and passive tree shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentCatalog {
    pub skills: Vec<SkillGem>,
    pub supports: Vec<SupportGem>,
    pub passive_tree: PassiveTreeData,
}

impl ContentCatalog {
    pub fn builtin() -> Self {
        Self {
            skills: builtin_skill_gems(),
            supports: builtin_support_gems(),
            passive_tree: default_passive_tree(),
        }
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
