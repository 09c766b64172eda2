//! Health component

/// Hit points of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthComponent {
    /// Remaining hit points
    pub current: u32,

    /// Upper bound for `current`
    pub max: u32,
}

impl HealthComponent {
    /// Create a health component; `current` is clamped to `max`
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Remove hit points, stopping at zero
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Restore hit points, stopping at `max`
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// True while any hit points remain
    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }
}
