//! Enemy spawning systems - pool setup, first spawn, respawn after defeat.

use bevy::prelude::*;

use super::data::{load_pool_config, DataPaths, EnemyRegistry};
use super::engine::{ProgressionSource, UnitChange};
use super::error::PoolError;
use super::EnemyPools;
use crate::core::{CurrentUnitChanged, GameState, UnitDefeated};
use crate::progression::PlayerProgress;

/// Read the pool configuration and build the pools, then enter the game.
///
/// Configuration problems are fatal: the error is logged and the app exits.
pub fn initialize_enemy_pools(
    mut pools: ResMut<EnemyPools>,
    registry: Res<EnemyRegistry>,
    paths: Res<DataPaths>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let config = match load_pool_config(&paths.pool_config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load pool configuration: {}", e);
            exit.send(AppExit::error());
            return;
        }
    };

    if let Err(e) = pools.initialize_pools(&config, &*registry) {
        error!("Failed to initialize enemy pools: {}", e);
        exit.send(AppExit::error());
        return;
    }

    next_state.set(GameState::InGame);
}

/// Spawn the opening enemy for the player's current level.
pub fn spawn_first_enemy(mut pools: ResMut<EnemyPools>, progress: Res<PlayerProgress>) {
    let level = progress.current_level();

    match pools.spawn_next_enemy(level) {
        Ok(unit) => info!("First enemy: {:?} '{}' at level {}", unit.kind, unit.template, level),
        Err(e) => error!("Failed to spawn enemy for level {}: {}", level, e),
    }
}

/// Report each defeat to the pools and bring in the next unit.
pub fn respawn_on_defeat(
    mut defeated_events: EventReader<UnitDefeated>,
    mut pools: ResMut<EnemyPools>,
    progress: Res<PlayerProgress>,
) {
    for event in defeated_events.read() {
        match pools.report_defeated_and_respawn(&event.unit, &*progress) {
            Ok((report, next)) => {
                if report.boss_cleared {
                    info!("Boss level {} cleared", report.unit.level);
                }
                debug!("Next enemy: {:?} '{}' at level {}", next.kind, next.template, next.level);
            }
            Err(PoolError::StaleUnit { template }) => {
                debug!("Ignoring defeat of '{}', it was already replaced", template);
            }
            Err(e) => {
                error!(
                    "Failed to replace defeated '{}' (level {}): {}",
                    event.unit.template, event.unit.level, e
                );
            }
        }
    }
}

/// Forward queued pool changes as `CurrentUnitChanged` events.
pub fn forward_unit_changes(
    mut pools: ResMut<EnemyPools>,
    mut changed_events: EventWriter<CurrentUnitChanged>,
) {
    for UnitChange { previous, current } in pools.take_changes() {
        changed_events.send(CurrentUnitChanged { previous, current });
    }
}
