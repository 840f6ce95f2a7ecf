//! Enemies module - enemy data, pooling, and spawn selection.

mod components;
pub mod data;
pub mod engine;
mod error;
mod plugin;
mod pool;
mod spawning;

#[cfg(test)]
mod tests_lifecycle;

pub use components::*;
pub use data::{BossPoolGroup, DataPaths, EnemyDefinition, EnemyRegistry, PoolConfig, PoolGroup, SelectionPolicy};
pub use engine::{
    DefeatReport, DefeatedBossLevels, EnemyPoolEngine, EngineState, ProgressionSource, UnitChange,
    BOSS_INTERVAL,
};
pub use error::{ConfigError, DataLoadError, PoolError};
pub use plugin::EnemyPlugin;
pub use pool::{InstancePool, PoolGrowth};
pub use spawning::{forward_unit_changes, initialize_enemy_pools, respawn_on_defeat, spawn_first_enemy};

/// The engine as used by the game, holding [`EnemyUnit`]s.
pub type EnemyPools = EnemyPoolEngine<EnemyUnit>;
