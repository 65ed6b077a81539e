use super::resolution::{Resolution, resolve_defeats};
use super::targeting::enemies_in_range;
use crate::config::GameConfig;
use crate::env::LootOracle;
use crate::state::{GameState, Player, SkillId, Timestamp};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelReport {
    pub hits: usize,
    pub damage: f64,
    pub resolution: Resolution,
}

pub fn channel_skill_id() -> SkillId {
    SkillId::from(GameConfig::CHANNEL_SKILL_ID)
}

/// The channel skill runs while unlocked; it does not need a bar slot.
pub fn is_channel_active(player: &Player) -> bool {
    player
        .skill(&channel_skill_id())
        .is_some_and(|gem| gem.is_unlocked)
}

/// One channel pulse: damages every living enemy within `area × 30`.
///
/// Returns `None` without touching state when the skill is locked or cooling down.
pub fn channel_tick(
    state: &mut GameState,
    loot: Option<&dyn LootOracle>,
    now: Timestamp,
) -> Option<ChannelReport> {
    let id = channel_skill_id();
    if !is_channel_active(&state.player) {
        return None;
    }
    let stats = state.player.skill_stats(&id)?;
    if !state.player.is_off_cooldown(&id, stats.cooldown_ms, now) {
        return None;
    }
    state.player.stamp_cooldown(&id, now);

    let range = stats.area * GameConfig::CHANNEL_RANGE_PER_AREA;
    let targets = enemies_in_range(state, range);
    for target in &targets {
        if let Some(enemy) = state.enemies.get_mut(target) {
            enemy.take_damage(stats.damage);
        }
    }

    Some(ChannelReport {
        hits: targets.len(),
        damage: stats.damage,
        resolution: resolve_defeats(state, loot, now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EnemyId, Position, SkillTags};
    use crate::test_support::{enemy, skill};

    fn state_with_whirlwind(cooldown_ms: f64) -> GameState {
        let mut whirlwind = skill("whirlwind", SkillTags::CHANNEL | SkillTags::AOE);
        whirlwind.is_unlocked = true;
        whirlwind.scaling.base_damage = 1.0;
        whirlwind.scaling.base_area = 2.0;
        whirlwind.scaling.base_cooldown_ms = cooldown_ms;
        let mut state = GameState::default();
        state.player.skill_gems.insert(whirlwind);
        state.player_position = Some(Position::ORIGIN);
        state
    }

    #[test]
    fn zero_cooldown_fires_every_tick() {
        let mut state = state_with_whirlwind(0.0);
        state
            .enemies
            .insert(enemy(1, 100.0).at(Position::new(30.0, 0.0)));

        for tick in 0..10u64 {
            let report = channel_tick(&mut state, None, Timestamp(tick * 100));
            assert_eq!(report.map(|r| r.hits), Some(1), "tick {tick}");
        }
        assert_eq!(state.enemies.get(&EnemyId(1)).unwrap().hp, 90.0);
    }

    #[test]
    fn cooldown_gates_pulses() {
        let mut state = state_with_whirlwind(250.0);
        state.enemies.insert(enemy(1, 100.0));
        assert!(channel_tick(&mut state, None, Timestamp(0)).is_some());
        assert!(channel_tick(&mut state, None, Timestamp(100)).is_none());
        assert!(channel_tick(&mut state, None, Timestamp(200)).is_none());
        assert!(channel_tick(&mut state, None, Timestamp(300)).is_some());
    }

    #[test]
    fn only_enemies_within_area_range_are_hit() {
        let mut state = state_with_whirlwind(0.0);
        // range = 2 × 30 = 60
        state
            .enemies
            .insert(enemy(1, 100.0).at(Position::new(59.0, 0.0)));
        state
            .enemies
            .insert(enemy(2, 100.0).at(Position::new(61.0, 0.0)));
        let report = channel_tick(&mut state, None, Timestamp(0)).unwrap();
        assert_eq!(report.hits, 1);
        assert_eq!(state.enemies.get(&EnemyId(2)).unwrap().hp, 100.0);
    }

    #[test]
    fn locked_channel_skill_does_nothing() {
        let mut state = state_with_whirlwind(0.0);
        if let Some(gem) = state.player.skill_gems.get_mut(&channel_skill_id()) {
            gem.is_unlocked = false;
        }
        state.enemies.insert(enemy(1, 100.0));
        assert!(channel_tick(&mut state, None, Timestamp(0)).is_none());
        assert!(state.player.skill_cooldowns.is_empty());
    }
}
