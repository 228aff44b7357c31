//! Hit points

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, flooring at zero
    ///
    /// # Panics
    /// If `amount` is not strictly positive.
    pub fn take_damage(&mut self, amount: i32) {
        assert!(amount > 0, "damage must be positive, got {amount}");
        self.current = (self.current - amount).max(0);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Remaining fraction in 0..=1 (for health bars)
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}
