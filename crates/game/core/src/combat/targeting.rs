//! Target selection.
//!
//! Distances come from renderer-supplied positions. Enemies whose distance is
//! unknown are never rejected for range: they pass through leniently.
use crate::state::{EnemyId, GameState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub id: EnemyId,
    /// `None` when either position is unknown.
    pub distance: Option<f64>,
}

impl Target {
    /// Unknown distances count as in range.
    pub fn within(&self, range: f64) -> bool {
        self.distance.is_none_or(|d| d <= range)
    }
}

/// Living enemies ordered nearest first.
///
/// Measured enemies come first, sorted by distance with ties kept in
/// iteration order; unmeasured enemies follow in iteration order.
pub fn ranked_targets(state: &GameState) -> Vec<Target> {
    let (mut measured, unmeasured): (Vec<Target>, Vec<Target>) = state
        .living_enemies()
        .map(|enemy| Target {
            id: enemy.id,
            distance: state.distance_to(enemy),
        })
        .partition(|target| target.distance.is_some());

    measured.sort_by(|a, b| {
        let a = a.distance.unwrap_or(f64::INFINITY);
        let b = b.distance.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
    measured.extend(unmeasured);
    measured
}

pub fn nearest_target(state: &GameState) -> Option<Target> {
    ranked_targets(state).into_iter().next()
}

/// Living enemies within `range` of the player, in iteration order.
pub fn enemies_in_range(state: &GameState, range: f64) -> Vec<EnemyId> {
    state
        .living_enemies()
        .filter(|enemy| state.distance_to(enemy).is_none_or(|d| d <= range))
        .map(|enemy| enemy.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Position;
    use crate::test_support::enemy;

    fn field() -> GameState {
        let mut state = GameState::default();
        state.player_position = Some(Position::ORIGIN);
        state
            .enemies
            .insert(enemy(1, 10.0).at(Position::new(50.0, 0.0)));
        state
            .enemies
            .insert(enemy(2, 10.0).at(Position::new(0.0, 20.0)));
        state
            .enemies
            .insert(enemy(3, 10.0).at(Position::new(-20.0, 0.0)));
        state
    }

    #[test]
    fn nearest_wins_and_ties_keep_iteration_order() {
        let state = field();
        let ranked: Vec<u64> = ranked_targets(&state).iter().map(|t| t.id.0).collect();
        assert_eq!(ranked, vec![2, 3, 1]);
    }

    #[test]
    fn dead_enemies_are_not_targets() {
        let mut state = field();
        if let Some(e) = state.enemies.get_mut(&EnemyId(2)) {
            e.hp = 0.0;
        }
        assert_eq!(nearest_target(&state).map(|t| t.id), Some(EnemyId(3)));
    }

    #[test]
    fn missing_positions_are_lenient() {
        let mut state = GameState::default();
        state.enemies.insert(enemy(9, 10.0));
        let target = nearest_target(&state).unwrap();
        assert_eq!(target.distance, None);
        assert!(target.within(0.0));
        assert_eq!(enemies_in_range(&state, 0.0), vec![EnemyId(9)]);
    }

    #[test]
    fn range_filter_uses_distance() {
        let state = field();
        assert_eq!(enemies_in_range(&state, 25.0), vec![EnemyId(2), EnemyId(3)]);
    }
}
