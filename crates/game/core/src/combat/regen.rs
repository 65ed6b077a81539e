use crate::config::GameConfig;
use crate::state::Player;

/// Restores a tenth of the per-second regen rate, clamped to max mana.
///
/// Returns the mana actually restored.
pub fn mana_regen_tick(player: &mut Player) -> f64 {
    let before = player.mana;
    let gain = player.mana_regen.max(0.0) / GameConfig::MANA_REGEN_TICKS_PER_SECOND;
    player.mana = (player.mana + gain).min(player.max_mana);
    player.mana - before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_ticks_restore_one_second_of_regen() {
        let mut player = Player::default();
        player.mana = 10.0;
        player.mana_regen = 5.0;
        for _ in 0..10 {
            mana_regen_tick(&mut player);
        }
        assert!((player.mana - 15.0).abs() < 1e-9);
    }

    #[test]
    fn regen_clamps_at_max_mana() {
        let mut player = Player::default();
        player.mana = player.max_mana - 0.1;
        player.mana_regen = 50.0;
        mana_regen_tick(&mut player);
        assert_eq!(player.mana, player.max_mana);
    }
}
