use crate::state::{PassiveTreeData, SkillGem, SupportGem};

/// Static gem templates and passive tree shape.
///
/// Templates are handed out locked and at level 1; the reducer owns them from
/// then on.
pub trait CatalogOracle: Send + Sync {
    fn skill_gems(&self) -> Vec<SkillGem>;

    fn support_gems(&self) -> Vec<SupportGem>;

    fn passive_tree(&self) -> PassiveTreeData;
}
