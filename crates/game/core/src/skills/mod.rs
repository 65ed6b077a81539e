//! Skill management service.
//!
//! Validated operations over a player's gem collections and skill bar. Each
//! operation takes the current player by reference and never mutates it; on
//! success the outcome carries the updated copy, which becomes the only
//! source of truth.
mod error;

pub use error::SkillError;

use crate::config::GameConfig;
use crate::state::{Player, SkillBar, SkillId, SupportId};

/// Result of a skill management operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillOutcome {
    pub success: bool,
    /// Player-facing message for both success and failure.
    pub message: String,
    /// Present only on success.
    pub updated_player: Option<Player>,
    /// Present only on failure.
    pub error: Option<SkillError>,
}

impl SkillOutcome {
    fn from_result(result: Result<(Player, String), SkillError>) -> Self {
        match result {
            Ok((player, message)) => Self {
                success: true,
                message,
                updated_player: Some(player),
                error: None,
            },
            Err(err) => Self {
                success: false,
                message: err.to_string(),
                updated_player: None,
                error: Some(err),
            },
        }
    }
}

fn ensure_points(player: &Player, required: u32) -> Result<(), SkillError> {
    if player.skill_points < required {
        return Err(SkillError::NotEnoughSkillPoints {
            required,
            available: player.skill_points,
        });
    }
    Ok(())
}

pub fn unlock_skill_gem(player: &Player, skill_id: &SkillId) -> SkillOutcome {
    SkillOutcome::from_result(try_unlock_skill(player, skill_id))
}

fn try_unlock_skill(player: &Player, skill_id: &SkillId) -> Result<(Player, String), SkillError> {
    let gem = player
        .skill(skill_id)
        .ok_or_else(|| SkillError::SkillNotFound(skill_id.clone()))?;
    if gem.is_unlocked {
        return Err(SkillError::AlreadyUnlocked {
            name: gem.name.clone(),
        });
    }
    if player.level < gem.unlock_level {
        return Err(SkillError::LevelTooLow {
            name: gem.name.clone(),
            required: gem.unlock_level,
            current: player.level,
        });
    }
    ensure_points(player, gem.unlock_cost)?;

    let message = format!("Unlocked {}!", gem.name);
    let cost = gem.unlock_cost;
    let mut next = player.clone();
    next.skill_points -= cost;
    if let Some(gem) = next.skill_gems.get_mut(skill_id) {
        gem.is_unlocked = true;
    }
    Ok((next, message))
}

pub fn unlock_support_gem(player: &Player, support_id: &SupportId) -> SkillOutcome {
    SkillOutcome::from_result(try_unlock_support(player, support_id))
}

fn try_unlock_support(
    player: &Player,
    support_id: &SupportId,
) -> Result<(Player, String), SkillError> {
    let gem = player
        .support_gems
        .get(support_id)
        .ok_or_else(|| SkillError::SupportNotFound(support_id.clone()))?;
    if gem.is_unlocked {
        return Err(SkillError::AlreadyUnlocked {
            name: gem.name.clone(),
        });
    }
    if player.level < gem.unlock_level {
        return Err(SkillError::LevelTooLow {
            name: gem.name.clone(),
            required: gem.unlock_level,
            current: player.level,
        });
    }
    ensure_points(player, gem.unlock_cost)?;

    let message = format!("Unlocked {}!", gem.name);
    let cost = gem.unlock_cost;
    let mut next = player.clone();
    next.skill_points -= cost;
    if let Some(gem) = next.support_gems.get_mut(support_id) {
        gem.is_unlocked = true;
    }
    Ok((next, message))
}

pub fn level_up_skill_gem(player: &Player, skill_id: &SkillId) -> SkillOutcome {
    SkillOutcome::from_result(try_level_skill(player, skill_id))
}

fn try_level_skill(player: &Player, skill_id: &SkillId) -> Result<(Player, String), SkillError> {
    let gem = player
        .skill(skill_id)
        .ok_or_else(|| SkillError::SkillNotFound(skill_id.clone()))?;
    if !gem.is_unlocked {
        return Err(SkillError::Locked {
            name: gem.name.clone(),
        });
    }
    if gem.is_at_max_level() {
        return Err(SkillError::MaxLevel {
            name: gem.name.clone(),
            max: gem.max_level,
        });
    }
    let cost = gem.level_up_cost();
    ensure_points(player, cost)?;

    let mut next = player.clone();
    next.skill_points -= cost;
    let mut message = String::new();
    if let Some(gem) = next.skill_gems.get_mut(skill_id) {
        gem.level += 1;
        message = format!("{} reached level {}", gem.name, gem.level);
    }
    Ok((next, message))
}

pub fn level_up_support_gem(player: &Player, support_id: &SupportId) -> SkillOutcome {
    SkillOutcome::from_result(try_level_support(player, support_id))
}

fn try_level_support(
    player: &Player,
    support_id: &SupportId,
) -> Result<(Player, String), SkillError> {
    let gem = player
        .support_gems
        .get(support_id)
        .ok_or_else(|| SkillError::SupportNotFound(support_id.clone()))?;
    if !gem.is_unlocked {
        return Err(SkillError::Locked {
            name: gem.name.clone(),
        });
    }
    if gem.is_at_max_level() {
        return Err(SkillError::MaxLevel {
            name: gem.name.clone(),
            max: gem.max_level,
        });
    }
    let cost = gem.level_up_cost();
    ensure_points(player, cost)?;

    let mut next = player.clone();
    next.skill_points -= cost;
    let mut message = String::new();
    if let Some(gem) = next.support_gems.get_mut(support_id) {
        gem.level += 1;
        message = format!("{} reached level {}", gem.name, gem.level);
    }
    Ok((next, message))
}

pub fn equip_skill_to_bar(player: &Player, skill_id: &SkillId, slot: usize) -> SkillOutcome {
    SkillOutcome::from_result(try_equip(player, skill_id, slot))
}

fn try_equip(
    player: &Player,
    skill_id: &SkillId,
    slot: usize,
) -> Result<(Player, String), SkillError> {
    if !SkillBar::is_valid_slot(slot) {
        return Err(SkillError::InvalidSlot(slot));
    }
    let gem = player
        .skill(skill_id)
        .ok_or_else(|| SkillError::SkillNotFound(skill_id.clone()))?;
    if !gem.is_unlocked {
        return Err(SkillError::Locked {
            name: gem.name.clone(),
        });
    }
    let message = format!("Equipped {} to slot {}", gem.name, slot + 1);

    let mut next = player.clone();
    if let Some(previous) = next.skill_bar.position_of(skill_id) {
        if previous != slot {
            next.skill_bar.set(previous, None);
        }
    }
    if let Some(displaced) = next.skill_bar.set(slot, Some(skill_id.clone())) {
        if &displaced != skill_id {
            if let Some(gem) = next.skill_gems.get_mut(&displaced) {
                gem.is_equipped = false;
            }
        }
    }
    if let Some(gem) = next.skill_gems.get_mut(skill_id) {
        gem.is_equipped = true;
    }
    Ok((next, message))
}

pub fn unequip_skill_from_bar(player: &Player, slot: usize) -> SkillOutcome {
    SkillOutcome::from_result(try_unequip(player, slot))
}

fn try_unequip(player: &Player, slot: usize) -> Result<(Player, String), SkillError> {
    if !SkillBar::is_valid_slot(slot) {
        return Err(SkillError::InvalidSlot(slot));
    }
    let skill_id = player
        .skill_bar
        .get(slot)
        .cloned()
        .ok_or(SkillError::EmptySlot(slot))?;

    let mut next = player.clone();
    next.skill_bar.set(slot, None);
    let name = match next.skill_gems.get_mut(&skill_id) {
        Some(gem) => {
            gem.is_equipped = false;
            gem.name.clone()
        }
        None => skill_id.to_string(),
    };
    Ok((next, format!("Unequipped {} from slot {}", name, slot + 1)))
}

pub fn attach_support_gem(
    player: &Player,
    skill_id: &SkillId,
    support_id: &SupportId,
) -> SkillOutcome {
    SkillOutcome::from_result(try_attach(player, skill_id, support_id))
}

fn try_attach(
    player: &Player,
    skill_id: &SkillId,
    support_id: &SupportId,
) -> Result<(Player, String), SkillError> {
    let skill = player
        .skill(skill_id)
        .ok_or_else(|| SkillError::SkillNotFound(skill_id.clone()))?;
    let support = player
        .support_gems
        .get(support_id)
        .ok_or_else(|| SkillError::SupportNotFound(support_id.clone()))?;
    if !skill.is_unlocked {
        return Err(SkillError::Locked {
            name: skill.name.clone(),
        });
    }
    if !support.is_unlocked {
        return Err(SkillError::Locked {
            name: support.name.clone(),
        });
    }
    if skill.supports.is_full() {
        return Err(SkillError::SupportsFull {
            skill: skill.name.clone(),
            max: GameConfig::MAX_SUPPORTS_PER_SKILL,
        });
    }
    if skill.has_support(support_id) {
        return Err(SkillError::AlreadyAttached {
            skill: skill.name.clone(),
            support: support.name.clone(),
        });
    }
    if !skill.tags.accepts(support.tags) {
        return Err(SkillError::IncompatibleTags {
            skill: skill.name.clone(),
            support: support.name.clone(),
        });
    }

    let full = SkillError::SupportsFull {
        skill: skill.name.clone(),
        max: GameConfig::MAX_SUPPORTS_PER_SKILL,
    };
    let message = format!("Attached {} to {}", support.name, skill.name);
    let mut next = player.clone();
    if let Some(gem) = next.skill_gems.get_mut(skill_id) {
        gem.supports
            .try_push(support_id.clone())
            .map_err(|_| full)?;
    }
    Ok((next, message))
}

pub fn detach_support_gem(
    player: &Player,
    skill_id: &SkillId,
    support_id: &SupportId,
) -> SkillOutcome {
    SkillOutcome::from_result(try_detach(player, skill_id, support_id))
}

fn try_detach(
    player: &Player,
    skill_id: &SkillId,
    support_id: &SupportId,
) -> Result<(Player, String), SkillError> {
    let skill = player
        .skill(skill_id)
        .ok_or_else(|| SkillError::SkillNotFound(skill_id.clone()))?;
    let support_name = player
        .support_gems
        .get(support_id)
        .map_or_else(|| support_id.to_string(), |s| s.name.clone());
    if !skill.has_support(support_id) {
        return Err(SkillError::NotAttached {
            skill: skill.name.clone(),
            support: support_name,
        });
    }

    let message = format!("Detached {} from {}", support_name, skill.name);
    let mut next = player.clone();
    if let Some(gem) = next.skill_gems.get_mut(skill_id) {
        gem.supports.retain(|id| id != support_id);
    }
    Ok((next, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ModifierKind, SkillTags};
    use crate::test_support::{skill, support};

    fn player() -> Player {
        let mut fireball = skill("fireball", SkillTags::SPELL | SkillTags::PROJECTILE);
        fireball.unlock_level = 1;
        fireball.unlock_cost = 1;
        let mut nova = skill("ice_nova", SkillTags::SPELL | SkillTags::AOE);
        nova.unlock_level = 5;
        nova.unlock_cost = 1;
        let mut supports = Vec::new();
        for i in 0..7 {
            let mut gem = support(
                &format!("support_{i}"),
                SkillTags::SPELL,
                ModifierKind::Damage,
                10.0,
                true,
            );
            gem.is_unlocked = true;
            supports.push(gem);
        }
        let mut melee = support(
            "melee_physical",
            SkillTags::MELEE | SkillTags::PHYSICAL,
            ModifierKind::Damage,
            20.0,
            true,
        );
        melee.is_unlocked = true;
        supports.push(melee);

        let mut player = Player::new([fireball, nova], supports, Default::default());
        player.skill_points = 10;
        player
    }

    fn unlocked(player: &Player, id: &str) -> Player {
        unlock_skill_gem(player, &SkillId::from(id))
            .updated_player
            .expect("unlock succeeds")
    }

    #[test]
    fn unlock_spends_points_and_flips_flag() {
        let before = player();
        let outcome = unlock_skill_gem(&before, &SkillId::from("fireball"));
        assert!(outcome.success);
        let after = outcome.updated_player.unwrap();
        assert_eq!(after.skill_points, before.skill_points - 1);
        assert!(after.skill(&"fireball".into()).unwrap().is_unlocked);
        assert!(!before.skill(&"fireball".into()).unwrap().is_unlocked);
    }

    #[test]
    fn unlock_below_required_level_fails_regardless_of_points() {
        let mut before = player();
        before.skill_points = 1_000;
        let outcome = unlock_skill_gem(&before, &SkillId::from("ice_nova"));
        assert!(!outcome.success);
        assert!(outcome.updated_player.is_none());
        assert!(outcome.message.contains("requires level 5"));
        assert_eq!(before.skill_points, 1_000);
    }

    #[test]
    fn unlock_twice_fails() {
        let once = unlocked(&player(), "fireball");
        let outcome = unlock_skill_gem(&once, &SkillId::from("fireball"));
        assert!(!outcome.success);
        assert!(outcome.message.contains("already unlocked"));
    }

    #[test]
    fn level_up_increments_by_exactly_one() {
        let p = unlocked(&player(), "fireball");
        let outcome = level_up_skill_gem(&p, &SkillId::from("fireball"));
        let after = outcome.updated_player.unwrap();
        assert_eq!(after.skill(&"fireball".into()).unwrap().level, 2);
        assert_eq!(after.skill_points, p.skill_points - 1);
    }

    #[test]
    fn level_up_locked_or_maxed_fails() {
        let p = player();
        assert!(!level_up_skill_gem(&p, &SkillId::from("fireball")).success);

        let mut p = unlocked(&p, "fireball");
        if let Some(gem) = p.skill_gems.get_mut(&"fireball".into()) {
            gem.level = gem.max_level;
        }
        let outcome = level_up_skill_gem(&p, &SkillId::from("fireball"));
        assert!(!outcome.success);
        assert!(outcome.message.contains("max level"));
    }

    #[test]
    fn equip_is_idempotent() {
        let p = unlocked(&player(), "fireball");
        let once = equip_skill_to_bar(&p, &"fireball".into(), 2)
            .updated_player
            .unwrap();
        let twice = equip_skill_to_bar(&once, &"fireball".into(), 2)
            .updated_player
            .unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.skill_bar.get(2).map(SkillId::as_str), Some("fireball"));
        assert!(twice.skill(&"fireball".into()).unwrap().is_equipped);
    }

    #[test]
    fn equip_moves_skill_and_demotes_occupant() {
        let mut p = unlocked(&player(), "fireball");
        p.level = 5;
        let p = unlocked(&p, "ice_nova");
        let p = equip_skill_to_bar(&p, &"fireball".into(), 0)
            .updated_player
            .unwrap();
        let p = equip_skill_to_bar(&p, &"ice_nova".into(), 1)
            .updated_player
            .unwrap();

        // move fireball onto ice nova's slot
        let p = equip_skill_to_bar(&p, &"fireball".into(), 1)
            .updated_player
            .unwrap();
        assert!(p.skill_bar.get(0).is_none());
        assert_eq!(p.skill_bar.get(1).map(SkillId::as_str), Some("fireball"));
        assert!(!p.skill(&"ice_nova".into()).unwrap().is_equipped);
        assert!(p.skill(&"fireball".into()).unwrap().is_equipped);
    }

    #[test]
    fn equip_rejects_bad_slot_and_locked_skill() {
        let p = player();
        let bad_slot = equip_skill_to_bar(&p, &"fireball".into(), 6);
        assert_eq!(bad_slot.error, Some(SkillError::InvalidSlot(6)));
        assert!(!equip_skill_to_bar(&p, &"fireball".into(), 0).success);
        assert!(!equip_skill_to_bar(&p, &"missing".into(), 0).success);
    }

    #[test]
    fn unequip_clears_slot() {
        let p = unlocked(&player(), "fireball");
        let p = equip_skill_to_bar(&p, &"fireball".into(), 3)
            .updated_player
            .unwrap();
        let outcome = unequip_skill_from_bar(&p, 3);
        let after = outcome.updated_player.unwrap();
        assert!(after.skill_bar.get(3).is_none());
        assert!(!after.skill(&"fireball".into()).unwrap().is_equipped);

        assert!(!unequip_skill_from_bar(&after, 3).success);
        assert!(!unequip_skill_from_bar(&after, 99).success);
    }

    #[test]
    fn seventh_support_is_rejected_without_mutation() {
        let mut p = unlocked(&player(), "fireball");
        for i in 0..6 {
            p = attach_support_gem(&p, &"fireball".into(), &format!("support_{i}").as_str().into())
                .updated_player
                .unwrap();
        }
        let before = p.clone();
        let outcome = attach_support_gem(&p, &"fireball".into(), &"support_6".into());
        assert!(!outcome.success);
        assert!(outcome.updated_player.is_none());
        assert_eq!(p, before);
        assert_eq!(p.skill(&"fireball".into()).unwrap().supports.len(), 6);
    }

    #[test]
    fn attach_requires_shared_tag_and_no_duplicates() {
        let p = unlocked(&player(), "fireball");
        let incompatible = attach_support_gem(&p, &"fireball".into(), &"melee_physical".into());
        assert!(!incompatible.success);
        assert!(incompatible.message.contains("no shared tags"));

        let p = attach_support_gem(&p, &"fireball".into(), &"support_0".into())
            .updated_player
            .unwrap();
        let duplicate = attach_support_gem(&p, &"fireball".into(), &"support_0".into());
        assert!(!duplicate.success);
    }

    #[test]
    fn attached_support_is_visible_through_bar() {
        let p = unlocked(&player(), "fireball");
        let p = equip_skill_to_bar(&p, &"fireball".into(), 0)
            .updated_player
            .unwrap();
        let p = attach_support_gem(&p, &"fireball".into(), &"support_0".into())
            .updated_player
            .unwrap();
        let (_, on_bar) = p.bar_skills().next().unwrap();
        assert!(on_bar.has_support(&"support_0".into()));
    }

    #[test]
    fn detach_requires_attachment() {
        let p = unlocked(&player(), "fireball");
        assert!(!detach_support_gem(&p, &"fireball".into(), &"support_0".into()).success);

        let p = attach_support_gem(&p, &"fireball".into(), &"support_0".into())
            .updated_player
            .unwrap();
        let after = detach_support_gem(&p, &"fireball".into(), &"support_0".into())
            .updated_player
            .unwrap();
        assert!(after.skill(&"fireball".into()).unwrap().supports.is_empty());
    }
}
