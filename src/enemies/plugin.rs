//! Enemy plugin - registers pool setup and spawn systems.

use bevy::prelude::*;

use super::data::{load_enemy_definitions, DataPaths, EnemyRegistry};
use super::spawning::{forward_unit_changes, initialize_enemy_pools, respawn_on_defeat, spawn_first_enemy};
use super::EnemyPools;
use crate::core::{GameSet, GameState};

/// Enemy plugin - handles enemy data, pooling and spawning.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .init_resource::<DataPaths>()
            .init_resource::<EnemyPools>()
            // Load definitions, then build the pools from them
            .add_systems(
                OnEnter(GameState::Loading),
                (load_enemy_definitions, initialize_enemy_pools).chain(),
            )
            .add_systems(OnEnter(GameState::InGame), spawn_first_enemy)
            .add_systems(Update, respawn_on_defeat.in_set(GameSet::Spawn))
            .add_systems(Update, forward_unit_changes.in_set(GameSet::Notify));
    }
}
