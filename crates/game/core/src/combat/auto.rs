//! Automatic skill rotation.
use super::resolution::{Resolution, resolve_defeats};
use super::targeting::ranked_targets;
use crate::config::GameConfig;
use crate::env::LootOracle;
use crate::state::{AnimationCommand, EnemyId, GameState, Player, SkillId, SkillTags, Timestamp};

/// One automatic activation.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillCast {
    pub skill_id: SkillId,
    pub targets: Vec<EnemyId>,
    pub damage: f64,
    pub mana_spent: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutoReport {
    pub casts: Vec<SkillCast>,
    pub resolution: Resolution,
}

/// Rotation cadence: shortened by the best unlocked QUICK skill on the bar.
pub fn auto_interval_ms(player: &Player) -> u64 {
    let quick_level = player
        .bar_skills()
        .filter(|(_, gem)| gem.is_unlocked && gem.tags.contains(SkillTags::QUICK))
        .map(|(_, gem)| u64::from(gem.level))
        .max()
        .unwrap_or(0);
    GameConfig::AUTO_INTERVAL_BASE_MS
        .saturating_sub(quick_level * GameConfig::QUICK_INTERVAL_REDUCTION_MS)
        .max(GameConfig::AUTO_INTERVAL_MIN_MS)
}

/// Fires every ready non-channel bar skill in slot order.
///
/// A skill is ready when its cooldown elapsed and the player has the mana.
/// Projectile skills need a target within `range × 1.2`; other skills hit
/// every living enemy.
pub fn auto_skills_tick(
    state: &mut GameState,
    loot: Option<&dyn LootOracle>,
    now: Timestamp,
) -> AutoReport {
    let mut report = AutoReport::default();
    if !state.auto_combat || state.enemies.is_empty() {
        return report;
    }

    let rotation: Vec<(SkillId, String)> = state
        .player
        .bar_skills()
        .filter(|(_, gem)| {
            gem.is_unlocked && !gem.is_channel() && gem.id.as_str() != GameConfig::CHANNEL_SKILL_ID
        })
        .map(|(_, gem)| (gem.id.clone(), gem.name.clone()))
        .collect();

    for (id, name) in rotation {
        let Some(stats) = state.player.skill_stats(&id) else {
            continue;
        };
        if !state.player.is_off_cooldown(&id, stats.cooldown_ms, now)
            || state.player.mana < stats.mana_cost
        {
            continue;
        }

        let projectile = GameConfig::is_projectile_skill(id.as_str());
        let targets: Vec<EnemyId> = if projectile {
            let range = stats.range * GameConfig::PROJECTILE_RANGE_SLACK;
            let ranked = ranked_targets(state);
            match ranked.first() {
                Some(nearest) if nearest.within(range) => ranked
                    .iter()
                    .filter(|t| t.within(range))
                    .take(stats.projectiles.max(1) as usize)
                    .map(|t| t.id)
                    .collect(),
                _ => continue,
            }
        } else {
            state.living_enemies().map(|enemy| enemy.id).collect()
        };
        if targets.is_empty() {
            continue;
        }

        state.player.stamp_cooldown(&id, now);
        state.player.mana -= stats.mana_cost;
        for target in &targets {
            if let Some(enemy) = state.enemies.get_mut(target) {
                enemy.take_damage(stats.damage);
            }
        }

        let anim_target = if projectile {
            targets[0].0
        } else {
            now.as_millis()
        };
        state.log.push_command(&AnimationCommand::Skill {
            skill_id: id.clone(),
            target: anim_target,
            duration_ms: (stats.duration_ms > 0).then_some(stats.duration_ms),
        });
        let line = match (projectile, targets.as_slice()) {
            (true, [single]) => {
                let target_name = state
                    .enemies
                    .get(single)
                    .map_or_else(|| single.to_string(), |e| e.name.clone());
                format!("{name} hits {target_name} for {:.0} damage", stats.damage)
            }
            _ => format!(
                "{name} hits {} enemies for {:.0} damage",
                targets.len(),
                stats.damage
            ),
        };
        state.log.push(line);

        report.casts.push(SkillCast {
            skill_id: id,
            targets,
            damage: stats.damage,
            mana_spent: stats.mana_cost,
        });
    }

    report.resolution = resolve_defeats(state, loot, now);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, SkillGem};
    use crate::test_support::{enemy, skill};

    fn ready(id: &str, tags: SkillTags) -> SkillGem {
        let mut gem = skill(id, tags);
        gem.is_unlocked = true;
        gem.scaling.base_damage = 10.0;
        gem.scaling.base_mana_cost = 5.0;
        gem.scaling.base_cooldown_ms = 1000.0;
        gem.scaling.base_range = 100.0;
        gem
    }

    fn with_bar(gems: Vec<SkillGem>) -> GameState {
        let mut state = GameState::default();
        for (slot, gem) in gems.into_iter().enumerate() {
            state.player.skill_bar.set(slot, Some(gem.id.clone()));
            state.player.skill_gems.insert(gem);
        }
        state.player.mana = 50.0;
        state
    }

    #[test]
    fn projectile_without_living_target_never_fires() {
        let mut state = with_bar(vec![ready(
            "fireball",
            SkillTags::SPELL | SkillTags::PROJECTILE,
        )]);
        state.enemies.insert(enemy(1, 0.0));

        let report = auto_skills_tick(&mut state, None, Timestamp(5_000));

        assert!(report.casts.is_empty());
        assert_eq!(state.player.mana, 50.0);
        assert!(state.player.skill_cooldowns.is_empty());
    }

    #[test]
    fn projectile_hits_nearest_within_slack_range() {
        let mut state = with_bar(vec![ready(
            "fireball",
            SkillTags::SPELL | SkillTags::PROJECTILE,
        )]);
        state.player_position = Some(Position::ORIGIN);
        state
            .enemies
            .insert(enemy(1, 50.0).at(Position::new(115.0, 0.0)));
        state
            .enemies
            .insert(enemy(2, 50.0).at(Position::new(200.0, 0.0)));

        let report = auto_skills_tick(&mut state, None, Timestamp(5_000));

        assert_eq!(report.casts.len(), 1);
        assert_eq!(report.casts[0].targets, vec![EnemyId(1)]);
        assert_eq!(state.player.mana, 45.0);
        assert_eq!(
            state.player.skill_cooldowns.get(&SkillId::from("fireball")),
            Some(&Timestamp(5_000))
        );
        assert!(state.log.iter().any(|l| l == "ANIM_SKILL|fireball|1"));
    }

    #[test]
    fn projectile_out_of_range_is_skipped() {
        let mut state = with_bar(vec![ready(
            "fireball",
            SkillTags::SPELL | SkillTags::PROJECTILE,
        )]);
        state.player_position = Some(Position::ORIGIN);
        state
            .enemies
            .insert(enemy(1, 50.0).at(Position::new(500.0, 0.0)));
        let report = auto_skills_tick(&mut state, None, Timestamp(0));
        assert!(report.casts.is_empty());
    }

    #[test]
    fn aoe_skill_hits_every_living_enemy() {
        let mut state = with_bar(vec![ready("ice_nova", SkillTags::SPELL | SkillTags::AOE)]);
        state.enemies.insert(enemy(1, 50.0));
        state.enemies.insert(enemy(2, 50.0));
        let report = auto_skills_tick(&mut state, None, Timestamp(7_000));
        assert_eq!(report.casts[0].targets.len(), 2);
        assert!(state.log.iter().any(|l| l == "ANIM_SKILL|ice_nova|7000"));
    }

    #[test]
    fn mana_is_checked_skill_by_skill() {
        let mut state = with_bar(vec![
            ready("ice_nova", SkillTags::SPELL | SkillTags::AOE),
            ready("ground_slam", SkillTags::PHYSICAL | SkillTags::AOE),
        ]);
        state.player.mana = 7.0;
        state.enemies.insert(enemy(1, 500.0));
        let report = auto_skills_tick(&mut state, None, Timestamp(0));
        assert_eq!(report.casts.len(), 1);
        assert_eq!(report.casts[0].skill_id, SkillId::from("ice_nova"));
        assert_eq!(state.player.mana, 2.0);
    }

    #[test]
    fn disabled_auto_combat_skips_everything() {
        let mut state = with_bar(vec![ready("ice_nova", SkillTags::SPELL | SkillTags::AOE)]);
        state.auto_combat = false;
        state.enemies.insert(enemy(1, 50.0));
        assert!(auto_skills_tick(&mut state, None, Timestamp(0)).casts.is_empty());
    }

    #[test]
    fn quick_skills_shorten_the_cadence() {
        let mut quick = ready("quick_strike", SkillTags::PHYSICAL | SkillTags::QUICK);
        quick.level = 4;
        let state = with_bar(vec![quick]);
        assert_eq!(auto_interval_ms(&state.player), 1000 - 4 * 70);

        let mut fast = ready("quick_strike", SkillTags::PHYSICAL | SkillTags::QUICK);
        fast.level = 20;
        let state = with_bar(vec![fast]);
        assert_eq!(auto_interval_ms(&state.player), GameConfig::AUTO_INTERVAL_MIN_MS);

        assert_eq!(
            auto_interval_ms(&Player::default()),
            GameConfig::AUTO_INTERVAL_BASE_MS
        );
    }
}
