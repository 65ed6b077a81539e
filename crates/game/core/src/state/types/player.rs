use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{Attributes, SkillId, Timestamp};
use super::equipment::Equipment;
use super::passive::{PassiveTreeData, PassiveTreeState};
use super::registry::Registry;
use super::skill::SkillGem;
use super::stone::Stone;
use super::support::SupportGem;
use crate::config::GameConfig;
use crate::stats::{DerivedStats, EffectiveSkillStats, compute_derived_stats, resolve_skill};

/// Fixed six-slot skill bar. Slots reference gems in `Player::skill_gems` by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<SkillId>>", into = "Vec<Option<SkillId>>")]
pub struct SkillBar {
    slots: [Option<SkillId>; GameConfig::SKILL_BAR_SLOTS],
}

impl SkillBar {
    pub const SLOTS: usize = GameConfig::SKILL_BAR_SLOTS;

    #[inline]
    pub fn is_valid_slot(slot: usize) -> bool {
        slot < Self::SLOTS
    }

    pub fn get(&self, slot: usize) -> Option<&SkillId> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Writes `skill` into `slot`, returning the previous occupant.
    ///
    /// Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, skill: Option<SkillId>) -> Option<SkillId> {
        match self.slots.get_mut(slot) {
            Some(entry) => std::mem::replace(entry, skill),
            None => None,
        }
    }

    pub fn position_of(&self, skill: &SkillId) -> Option<usize> {
        self.slots.iter().position(|s| s.as_ref() == Some(skill))
    }

    pub fn contains(&self, skill: &SkillId) -> bool {
        self.position_of(skill).is_some()
    }

    /// Occupied slots in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &SkillId)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|id| (idx, id)))
    }

    pub fn slots(&self) -> &[Option<SkillId>] {
        &self.slots
    }

    /// Clears every slot whose skill fails `keep`, and every repeated occurrence
    /// of a skill after its first slot.
    pub fn retain_valid(&mut self, mut keep: impl FnMut(&SkillId) -> bool) {
        let mut seen: Vec<SkillId> = Vec::with_capacity(Self::SLOTS);
        for slot in self.slots.iter_mut() {
            let valid = match slot.as_ref() {
                Some(id) => keep(id) && !seen.contains(id),
                None => continue,
            };
            if valid {
                if let Some(id) = slot.as_ref() {
                    seen.push(id.clone());
                }
            } else {
                *slot = None;
            }
        }
    }
}

/// Reconciles any persisted slot count to exactly [`SkillBar::SLOTS`].
impl From<Vec<Option<SkillId>>> for SkillBar {
    fn from(stored: Vec<Option<SkillId>>) -> Self {
        let mut bar = Self::default();
        for (slot, skill) in stored.into_iter().take(Self::SLOTS).enumerate() {
            bar.slots[slot] = skill;
        }
        bar
    }
}

impl From<SkillBar> for Vec<Option<SkillId>> {
    fn from(bar: SkillBar) -> Self {
        bar.slots.into()
    }
}

/// Opaque cosmetic data owned by the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterModel(pub serde_json::Value);

/// The player character and everything it owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub level: u32,
    pub xp: u64,
    pub next_level_xp: u64,
    pub hp: f64,
    pub max_hp: f64,
    pub base_max_hp: f64,
    pub mana: f64,
    pub max_mana: f64,
    pub base_max_mana: f64,
    /// Mana restored per second.
    pub mana_regen: f64,
    pub base_mana_regen: f64,
    pub gold: u64,
    pub skill_points: u32,
    pub attributes: Attributes,
    pub equipment: Equipment,
    pub skill_gems: Registry<SkillGem>,
    pub support_gems: Registry<SupportGem>,
    pub skill_bar: SkillBar,
    /// Last activation time per skill.
    pub skill_cooldowns: BTreeMap<SkillId, Timestamp>,
    pub passive_tree_state: PassiveTreeState,
    pub passive_tree_data: PassiveTreeData,
    pub stones: Vec<Stone>,
    pub character_model: Option<CharacterModel>,
    /// Last derived-stats fold; refreshed only by stat-affecting actions.
    pub stats: DerivedStats,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            next_level_xp: GameConfig::BASE_LEVEL_XP,
            hp: GameConfig::STARTING_HP,
            max_hp: GameConfig::STARTING_HP,
            base_max_hp: GameConfig::STARTING_HP,
            mana: GameConfig::STARTING_MANA,
            max_mana: GameConfig::STARTING_MANA,
            base_max_mana: GameConfig::STARTING_MANA,
            mana_regen: GameConfig::STARTING_MANA_REGEN,
            base_mana_regen: GameConfig::STARTING_MANA_REGEN,
            gold: 0,
            skill_points: GameConfig::STARTING_SKILL_POINTS,
            attributes: Attributes::default(),
            equipment: Equipment::default(),
            skill_gems: Registry::new(),
            support_gems: Registry::new(),
            skill_bar: SkillBar::default(),
            skill_cooldowns: BTreeMap::new(),
            passive_tree_state: PassiveTreeState::default(),
            passive_tree_data: PassiveTreeData::default(),
            stones: Vec::new(),
            character_model: None,
            stats: DerivedStats::default(),
        }
    }
}

impl Player {
    /// Fresh level-1 character owning the given gem templates.
    pub fn new(
        skill_gems: impl IntoIterator<Item = SkillGem>,
        support_gems: impl IntoIterator<Item = SupportGem>,
        passive_tree_data: PassiveTreeData,
    ) -> Self {
        let mut player = Self {
            skill_gems: skill_gems.into_iter().collect(),
            support_gems: support_gems.into_iter().collect(),
            passive_tree_data,
            ..Self::default()
        };
        player.refresh_stats();
        player
    }

    /// Folds the current loadout into `stats` without caching.
    pub fn refresh_stats(&mut self) {
        let stats = compute_derived_stats(self);
        self.apply_stats(stats);
    }

    /// Installs a derived-stats fold and clamps hp/mana into the new bounds.
    pub fn apply_stats(&mut self, stats: DerivedStats) {
        self.max_hp = stats.max_hp;
        self.max_mana = stats.max_mana;
        self.mana_regen = stats.mana_regen;
        self.hp = self.hp.clamp(0.0, self.max_hp);
        self.mana = self.mana.clamp(0.0, self.max_mana);
        self.stats = stats;
    }

    pub fn skill(&self, id: &SkillId) -> Option<&SkillGem> {
        self.skill_gems.get(id)
    }

    /// Supports linked to `skill`, in attachment order. Unknown ids are skipped.
    pub fn supports_of(&self, skill: &SkillGem) -> Vec<&SupportGem> {
        skill
            .supports
            .iter()
            .filter_map(|id| self.support_gems.get(id))
            .collect()
    }

    /// Effective stats of an owned skill with this player's bonuses applied.
    pub fn skill_stats(&self, id: &SkillId) -> Option<EffectiveSkillStats> {
        let skill = self.skill(id)?;
        Some(resolve_skill(skill, &self.supports_of(skill), Some(self)))
    }

    /// Bar skills in slot order, resolved against the canonical gem collection.
    pub fn bar_skills(&self) -> impl Iterator<Item = (usize, &SkillGem)> {
        self.skill_bar
            .occupied()
            .filter_map(|(slot, id)| self.skill_gems.get(id).map(|gem| (slot, gem)))
    }

    /// A zero cooldown is ready on every call.
    pub fn is_off_cooldown(&self, id: &SkillId, cooldown_ms: u64, now: Timestamp) -> bool {
        match self.skill_cooldowns.get(id) {
            None => true,
            Some(_) if cooldown_ms == 0 => true,
            Some(last) => now.since(*last) >= cooldown_ms,
        }
    }

    /// Records an activation. Stamps never move backwards.
    pub fn stamp_cooldown(&mut self, id: &SkillId, now: Timestamp) {
        let stamp = self.skill_cooldowns.entry(id.clone()).or_insert(now);
        *stamp = (*stamp).max(now);
    }

    /// Adds experience and runs the level-up loop. Returns the levels gained.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.next_level_xp > 0 && self.xp >= self.next_level_xp {
            self.xp -= self.next_level_xp;
            self.level += 1;
            self.skill_points += 1;
            self.passive_tree_state.available_points += 1;
            self.base_max_hp += GameConfig::LEVEL_UP_MAX_HP;
            self.max_hp += GameConfig::LEVEL_UP_MAX_HP;
            self.hp = self.max_hp;
            self.next_level_xp = (self.next_level_xp as f64 * GameConfig::XP_GROWTH).floor() as u64;
            gained += 1;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_deserialization_reconciles_to_six_slots() {
        let short: SkillBar = serde_json::from_str(r#"["fireball", null]"#).unwrap();
        assert_eq!(short.slots().len(), 6);
        assert_eq!(short.get(0).map(SkillId::as_str), Some("fireball"));

        let long: SkillBar =
            serde_json::from_str(r#"["a","b","c","d","e","f","g","h"]"#).unwrap();
        assert_eq!(long.slots().len(), 6);
        assert_eq!(long.get(5).map(SkillId::as_str), Some("f"));
    }

    #[test]
    fn retain_valid_drops_duplicates_after_first_slot() {
        let mut bar = SkillBar::from(vec![
            Some(SkillId::from("fireball")),
            Some(SkillId::from("ghost")),
            Some(SkillId::from("fireball")),
        ]);
        bar.retain_valid(|id| id.as_str() != "ghost");
        assert_eq!(bar.position_of(&SkillId::from("fireball")), Some(0));
        assert!(bar.get(1).is_none());
        assert!(bar.get(2).is_none());
    }

    #[test]
    fn leveling_loop_handles_multiple_levels() {
        let mut player = Player::default();
        let start_level = player.level;
        let threshold = player.next_level_xp;
        let burst = (threshold as f64 * 2.3) as u64;

        let gained = player.gain_experience(burst);

        assert_eq!(gained, 2);
        assert_eq!(player.level, start_level + 2);
        let second = (threshold as f64 * 1.25).floor() as u64;
        assert_eq!(player.xp, burst - threshold - second);
        assert_eq!(
            player.next_level_xp,
            ((second as f64) * 1.25).floor() as u64
        );
        assert_eq!(player.skill_points, GameConfig::STARTING_SKILL_POINTS + 2);
        assert_eq!(player.passive_tree_state.available_points, 2);
        assert_eq!(player.max_hp, GameConfig::STARTING_HP + 16.0);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn cooldown_stamps_are_monotonic() {
        let mut player = Player::default();
        let id = SkillId::from("fireball");
        player.stamp_cooldown(&id, Timestamp(5_000));
        player.stamp_cooldown(&id, Timestamp(4_000));
        assert_eq!(player.skill_cooldowns.get(&id), Some(&Timestamp(5_000)));
        assert!(!player.is_off_cooldown(&id, 1_000, Timestamp(5_500)));
        assert!(player.is_off_cooldown(&id, 1_000, Timestamp(6_000)));
        assert!(player.is_off_cooldown(&id, 0, Timestamp(5_000)));
    }
}
