//! Fighter health pool

use crate::core::types::percentage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    max: f32,
    current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { max, current: max }
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn percentage(&self) -> f32 {
        percentage(self.current, self.max)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract damage, returning the amount actually removed
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let amount = if amount.is_nan() { 0.0 } else { amount.max(0.0) };
        let dealt = amount.min(self.current);
        self.current -= dealt;
        dealt
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
