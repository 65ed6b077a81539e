//! Enemy wave generation for the spawn timer.
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game_core::{Enemy, EnemyId, GameConfig, GameState, Position};

/// Produces the enemies for one spawn tick.
pub trait EnemySpawner: Send {
    /// Enemies to add given the current state. May be empty.
    fn wave(&mut self, state: &GameState) -> Vec<Enemy>;
}

const NAMES: [&str; 8] = [
    "Goblin", "Skeleton", "Zombie", "Cultist", "Wraith", "Ghoul", "Bandit", "Harpy",
];
const BOSS_NAMES: [&str; 3] = ["Warlord", "Lich", "Broodmother"];

/// Random waves of one to three enemies around the player.
pub struct RandomSpawner {
    rng: StdRng,
    next_id: u64,
    pub boss_chance: f64,
    pub max_wave: usize,
    /// Spawn ring as `(inner, outer)` distance from the player.
    pub ring: (f64, f64),
}

impl RandomSpawner {
    pub const BOSS_CHANCE: f64 = 0.05;
    pub const BOSS_HP_MULTIPLIER: f64 = 5.0;
    const BASE_HP: f64 = 30.0;
    const HP_PER_LEVEL: f64 = 12.0;

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            next_id: 1,
            boss_chance: Self::BOSS_CHANCE,
            max_wave: 3,
            ring: (150.0, 400.0),
        }
    }

    fn enemy(&mut self, id: EnemyId, player_level: u32, origin: Position) -> Enemy {
        let low = player_level.saturating_sub(1).max(1);
        let level = self.rng.gen_range(low..=player_level + 1);
        let is_boss = self.rng.gen_bool(self.boss_chance.clamp(0.0, 1.0));

        let mut hp = Self::BASE_HP + Self::HP_PER_LEVEL * f64::from(level - 1);
        let name = if is_boss {
            hp *= Self::BOSS_HP_MULTIPLIER;
            BOSS_NAMES[self.rng.gen_range(0..BOSS_NAMES.len())]
        } else {
            NAMES[self.rng.gen_range(0..NAMES.len())]
        };

        let angle = self.rng.gen_range(0.0..TAU);
        let (inner, outer) = self.ring;
        let distance = if outer > inner {
            self.rng.gen_range(inner..outer)
        } else {
            inner
        };
        let position = Position::new(
            origin.x + angle.cos() * distance,
            origin.y + angle.sin() * distance,
        );

        let enemy = Enemy::new(id, name, level, hp.round()).at(position);
        if is_boss { enemy.boss() } else { enemy }
    }
}

impl EnemySpawner for RandomSpawner {
    fn wave(&mut self, state: &GameState) -> Vec<Enemy> {
        let living = state.living_enemies().count();
        let room = GameConfig::MAX_ENEMIES.saturating_sub(state.enemies.len());
        if living >= GameConfig::MAX_ENEMIES || room == 0 {
            return Vec::new();
        }

        let highest = state.enemies.keys().map(|id| id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest + 1);

        let size = self.rng.gen_range(1..=self.max_wave.max(1)).min(room);
        let origin = state.player_position.unwrap_or(Position::ORIGIN);
        (0..size)
            .map(|_| {
                let id = EnemyId(self.next_id);
                self.next_id += 1;
                self.enemy(id, state.player.level.max(1), origin)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waves_get_fresh_ids_near_player_level() {
        let mut spawner = RandomSpawner::seeded(3);
        let mut state = GameState::default();
        state.player.level = 5;
        state
            .enemies
            .insert(Enemy::new(EnemyId(40), "Old", 1, 10.0));

        for _ in 0..20 {
            let wave = spawner.wave(&state);
            assert!((1..=3).contains(&wave.len()));
            for enemy in wave {
                assert!(enemy.id.0 > 40);
                assert!((4..=6).contains(&enemy.level));
                assert!(enemy.position.is_some());
            }
        }
    }

    #[test]
    fn bosses_have_five_times_the_hp() {
        let mut spawner = RandomSpawner::seeded(11);
        spawner.boss_chance = 1.0;
        let wave = spawner.wave(&GameState::default());
        assert!(wave.iter().all(|enemy| enemy.is_boss));
        assert!(wave.iter().all(|enemy| enemy.max_hp >= 150.0));
    }

    #[test]
    fn full_field_spawns_nothing() {
        let mut spawner = RandomSpawner::seeded(1);
        let mut state = GameState::default();
        for id in 0..GameConfig::MAX_ENEMIES as u64 {
            state.enemies.insert(Enemy::new(EnemyId(id), "Imp", 1, 5.0));
        }
        assert!(spawner.wave(&state).is_empty());
    }
}
