//! Session state an external save layer persists and restores verbatim.

use serde::{Deserialize, Serialize};

use super::components::PlayerProgress;
use crate::clicker::Wallet;
use crate::enemies::{DefeatedBossLevels, EnemyPools};

/// Everything needed to resume a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level: u32,
    pub exp: u64,
    pub points: u64,
    #[serde(default)]
    pub defeated_boss_levels: DefeatedBossLevels,
}

impl SessionSnapshot {
    pub fn capture(progress: &PlayerProgress, wallet: &Wallet, pools: &EnemyPools) -> Self {
        Self {
            level: progress.level,
            exp: progress.exp,
            points: wallet.points,
            defeated_boss_levels: pools.defeated_boss_levels().clone(),
        }
    }

    /// Restore into live state. The current unit is left alone; callers that
    /// restore mid-session should spawn for the restored level afterwards.
    pub fn apply(self, progress: &mut PlayerProgress, wallet: &mut Wallet, pools: &mut EnemyPools) {
        progress.level = self.level.max(1);
        progress.exp = self.exp;
        wallet.points = self.points;
        pools.set_defeated_boss_levels(self.defeated_boss_levels);
    }
}
