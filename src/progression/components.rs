//! Player progression state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enemies::ProgressionSource;

/// Exp needed per level: level `n` needs `EXP_PER_LEVEL * n` to advance.
pub const EXP_PER_LEVEL: u64 = 10;

/// Exp required to go from `level` to `level + 1`.
pub fn exp_to_next(level: u32) -> u64 {
    EXP_PER_LEVEL * u64::from(level.max(1))
}

/// The player's level and exp toward the next one.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub level: u32,
    pub exp: u64,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self { level: 1, exp: 0 }
    }
}

impl PlayerProgress {
    /// Add exp and return every level reached, in order.
    pub fn add_exp(&mut self, amount: u64) -> Vec<u32> {
        self.exp = self.exp.saturating_add(amount);

        let mut gained = Vec::new();
        while self.exp >= exp_to_next(self.level) {
            self.exp -= exp_to_next(self.level);
            self.level += 1;
            gained.push(self.level);
        }
        gained
    }
}

impl ProgressionSource for PlayerProgress {
    fn current_level(&self) -> u32 {
        self.level
    }
}
