/// Game configuration constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    // ===== collection bounds =====
    /// Maximum number of enemy entries (alive or dying) tracked at once.
    pub const MAX_ENEMIES: usize = 25;
    /// Inventory capacity; loot beyond this converts to gold.
    pub const INVENTORY_CAPACITY: usize = 40;
    /// Maximum number of retained log lines (most recent first).
    pub const LOG_CAPACITY: usize = 200;
    pub const SKILL_BAR_SLOTS: usize = 6;
    pub const MAX_SUPPORTS_PER_SKILL: usize = 6;

    // ===== combat timing =====
    /// Grace period a dying enemy stays listed so the death animation can finish.
    pub const DEATH_GRACE_MS: u64 = 2000;
    /// Channel skill range is `area × CHANNEL_RANGE_PER_AREA`.
    pub const CHANNEL_RANGE_PER_AREA: f64 = 30.0;
    /// Projectile skills may hit targets up to `range × PROJECTILE_RANGE_SLACK`.
    pub const PROJECTILE_RANGE_SLACK: f64 = 1.2;
    /// Mana regen ticks arrive every 100ms, so each tick grants a tenth of the per-second rate.
    pub const MANA_REGEN_TICKS_PER_SECOND: f64 = 10.0;

    // ===== auto-skill cadence =====
    pub const AUTO_INTERVAL_BASE_MS: u64 = 1000;
    pub const AUTO_INTERVAL_MIN_MS: u64 = 300;
    /// Cadence reduction per level of the best unlocked QUICK skill on the bar.
    pub const QUICK_INTERVAL_REDUCTION_MS: u64 = 70;

    // ===== skills =====
    /// Skill driven by the dedicated channel timer.
    pub const CHANNEL_SKILL_ID: &'static str = "whirlwind";
    /// Skills that need a resolvable target within range before they fire.
    pub const PROJECTILE_SKILLS: [&'static str; 4] =
        ["fireball", "lightning_bolt", "ice_shard", "split_arrow"];
    /// Percentage damage bonus per attribute point above the threshold.
    pub const ATTRIBUTE_BONUS_PER_POINT: f64 = 2.0;
    pub const ATTRIBUTE_BONUS_THRESHOLD: u32 = 10;

    // ===== progression =====
    /// Experience required for the first level-up.
    pub const BASE_LEVEL_XP: u64 = 100;
    pub const XP_GROWTH: f64 = 1.25;
    pub const LEVEL_UP_MAX_HP: f64 = 8.0;
    pub const BOSS_XP_PER_LEVEL: u64 = 12;
    pub const ENEMY_XP_PER_LEVEL: u64 = 4;

    // ===== starting player =====
    pub const STARTING_HP: f64 = 100.0;
    pub const STARTING_MANA: f64 = 50.0;
    /// Mana restored per second.
    pub const STARTING_MANA_REGEN: f64 = 5.0;
    pub const STARTING_SKILL_POINTS: u32 = 1;
    pub const STARTING_ATTRIBUTE: u32 = 10;

    // ===== derived-stats cache =====
    pub const STATS_CACHE_CAPACITY: usize = 10;
    pub const STATS_CACHE_TTL_MS: u64 = 1000;

    /// Returns true if `skill_id` belongs to the projectile class.
    pub fn is_projectile_skill(skill_id: &str) -> bool {
        Self::PROJECTILE_SKILLS.contains(&skill_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectile_class_is_fixed() {
        assert!(GameConfig::is_projectile_skill("fireball"));
        assert!(GameConfig::is_projectile_skill("split_arrow"));
        assert!(!GameConfig::is_projectile_skill("ice_nova"));
        assert!(!GameConfig::is_projectile_skill(GameConfig::CHANNEL_SKILL_ID));
    }
}
