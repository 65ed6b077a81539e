//! Bonus application stack.
//!
//! Player-level bonuses are applied in a fixed order:
//! Flat → %Inc → More → Less → Clamp
//!
//! Support gem modifiers do not use this stack; they fold sequentially in
//! attachment order (see [`crate::stats::modifiers`]).

/// A single bonus that can be applied to a stat value.
///
/// - **Flat**: additive, applied first
/// - **Increased**: percentages, summed then multiplied once
/// - **More**: sequential multipliers (`50.0` = ×1.5)
/// - **Less**: sequential reductions (`10.0` = ×0.9)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bonus {
    Flat(f64),
    Increased(f64),
    More(f64),
    Less(f64),
}

impl Bonus {
    pub fn flat(value: f64) -> Self {
        Bonus::Flat(value)
    }

    pub fn increased(percent: f64) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: f64) -> Self {
        Bonus::More(percent)
    }

    pub fn less(percent: f64) -> Self {
        Bonus::Less(percent)
    }
}

/// A collection of bonuses applied in the stack order.
///
/// ```
/// # use game_core::stats::bonus::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5.0));
/// stack.add(Bonus::increased(20.0));
/// stack.add(Bonus::increased(15.0));
/// stack.add(Bonus::more(50.0));
///
/// // (10 + 5) × 1.35 × 1.5
/// let result = stack.apply(10.0, 0.0, f64::MAX);
/// assert!((result - 30.375).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// `clamp((base + flat) × (1 + inc/100) × Π more × Π less, min, max)`
    pub fn apply(&self, base: f64, min: f64, max: f64) -> f64 {
        let mut flat = 0.0;
        let mut increased = 0.0;
        for bonus in &self.bonuses {
            match bonus {
                Bonus::Flat(v) => flat += v,
                Bonus::Increased(p) => increased += p,
                _ => {}
            }
        }

        let mut value = (base + flat) * (1.0 + increased / 100.0);
        for bonus in &self.bonuses {
            match bonus {
                Bonus::More(p) => value *= 1.0 + p / 100.0,
                Bonus::Less(p) => value *= 1.0 - p / 100.0,
                _ => {}
            }
        }

        value.clamp(min, max)
    }

    /// Applies the stack with a lower bound of zero and no upper bound.
    pub fn apply_non_negative(&self, base: f64) -> f64 {
        self.apply(base, 0.0, f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increased_bonuses_sum_before_multiplying() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::increased(50.0));
        stack.add(Bonus::increased(50.0));
        assert_eq!(stack.apply_non_negative(10.0), 20.0);
    }

    #[test]
    fn more_and_less_compound() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::more(100.0));
        stack.add(Bonus::less(50.0));
        assert_eq!(stack.apply_non_negative(10.0), 10.0);
    }

    #[test]
    fn result_is_clamped() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::flat(-50.0));
        assert_eq!(stack.apply_non_negative(10.0), 0.0);
        assert_eq!(BonusStack::new().apply(500.0, 0.0, 100.0), 100.0);
    }
}
