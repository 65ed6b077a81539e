//! Manually triggered skill casts.
//!
//! Each castable skill has a fixed recipe (target pattern and animation
//! length). Manual casts ignore mana cost and range; they still respect
//! cooldowns and require the skill to be unlocked.
use super::resolution::{Resolution, resolve_defeats};
use super::targeting::nearest_target;
use crate::env::LootOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{AnimationCommand, EnemyId, GameState, SkillId, Timestamp};

/// Who a manual cast hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastPattern {
    Nearest,
    AllEnemies,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastRecipe {
    pub pattern: CastPattern,
    pub animation_ms: u64,
}

impl CastRecipe {
    /// Recipe for a castable skill id, if any.
    pub fn for_skill(id: &str) -> Option<Self> {
        use CastPattern::*;
        let (pattern, animation_ms) = match id {
            "fireball" => (Nearest, 600),
            "lightning_bolt" => (Nearest, 400),
            "ice_shard" => (Nearest, 500),
            "split_arrow" => (Nearest, 500),
            "quick_strike" => (Nearest, 300),
            "ice_nova" => (AllEnemies, 800),
            "ground_slam" => (AllEnemies, 700),
            "whirlwind" => (AllEnemies, 500),
            _ => return None,
        };
        Some(Self {
            pattern,
            animation_ms,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("Skill {0} not found")]
    UnknownSkill(SkillId),

    #[error("{0} cannot be cast manually")]
    NoRecipe(String),

    #[error("{0} is locked")]
    Locked(String),

    #[error("{name} is on cooldown ({remaining_ms}ms)")]
    OnCooldown { name: String, remaining_ms: u64 },

    #[error("No target for {0}")]
    NoTarget(String),
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } | Self::NoTarget(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill(_) => "CAST_UNKNOWN_SKILL",
            Self::NoRecipe(_) => "CAST_NO_RECIPE",
            Self::Locked(_) => "CAST_LOCKED",
            Self::OnCooldown { .. } => "CAST_ON_COOLDOWN",
            Self::NoTarget(_) => "CAST_NO_TARGET",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ManualCast {
    pub skill_id: SkillId,
    pub targets: Vec<EnemyId>,
    pub damage: f64,
    pub resolution: Resolution,
}

pub fn use_skill(
    state: &mut GameState,
    skill_id: &SkillId,
    loot: Option<&dyn LootOracle>,
    now: Timestamp,
) -> Result<ManualCast, CastError> {
    let gem = state
        .player
        .skill(skill_id)
        .ok_or_else(|| CastError::UnknownSkill(skill_id.clone()))?;
    let name = gem.name.clone();
    let recipe =
        CastRecipe::for_skill(skill_id.as_str()).ok_or_else(|| CastError::NoRecipe(name.clone()))?;
    if !gem.is_unlocked {
        return Err(CastError::Locked(name));
    }
    let stats = state
        .player
        .skill_stats(skill_id)
        .ok_or_else(|| CastError::UnknownSkill(skill_id.clone()))?;
    if !state.player.is_off_cooldown(skill_id, stats.cooldown_ms, now) {
        let elapsed = state
            .player
            .skill_cooldowns
            .get(skill_id)
            .map_or(0, |last| now.since(*last));
        return Err(CastError::OnCooldown {
            name,
            remaining_ms: stats.cooldown_ms.saturating_sub(elapsed),
        });
    }

    let targets: Vec<EnemyId> = match recipe.pattern {
        CastPattern::Nearest => nearest_target(state).map(|t| t.id).into_iter().collect(),
        CastPattern::AllEnemies => state.living_enemies().map(|enemy| enemy.id).collect(),
    };
    if targets.is_empty() {
        return Err(CastError::NoTarget(name));
    }

    state.player.stamp_cooldown(skill_id, now);
    for target in &targets {
        if let Some(enemy) = state.enemies.get_mut(target) {
            enemy.take_damage(stats.damage);
        }
    }

    let anim_target = match recipe.pattern {
        CastPattern::Nearest => targets[0].0,
        CastPattern::AllEnemies => now.as_millis(),
    };
    state.log.push_command(&AnimationCommand::Skill {
        skill_id: skill_id.clone(),
        target: anim_target,
        duration_ms: Some(recipe.animation_ms),
    });
    state.log.push(format!(
        "{name} deals {:.0} damage to {} target(s)",
        stats.damage,
        targets.len()
    ));

    Ok(ManualCast {
        skill_id: skill_id.clone(),
        targets,
        damage: stats.damage,
        resolution: resolve_defeats(state, loot, now),
    })
}
