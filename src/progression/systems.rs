//! Progression systems - rewards, level ups and save-wipes.

use bevy::prelude::*;

use super::components::PlayerProgress;
use crate::clicker::{PassiveIncome, Wallet};
use crate::core::{GameSet, LevelUpEvent, SessionReset, UnitDefeated};
use crate::enemies::{EnemyPools, ProgressionSource};

/// Configure progression systems.
pub fn setup_progression_systems(app: &mut App) {
    app.init_resource::<PlayerProgress>().add_systems(
        Update,
        (award_defeat_rewards, handle_session_reset)
            .chain()
            .in_set(GameSet::Progression),
    );
}

/// Pay out points and exp for every defeated unit.
pub fn award_defeat_rewards(
    mut defeated_events: EventReader<UnitDefeated>,
    mut progress: ResMut<PlayerProgress>,
    mut wallet: ResMut<Wallet>,
    mut level_ups: EventWriter<LevelUpEvent>,
) {
    for event in defeated_events.read() {
        wallet.deposit(event.rewards.points);

        for new_level in progress.add_exp(event.rewards.exp) {
            info!("Level up! Now level {}", new_level);
            level_ups.send(LevelUpEvent { new_level });
        }
    }
}

/// Wipe progress, points and boss history, then spawn a fresh first enemy.
pub fn handle_session_reset(
    mut resets: EventReader<SessionReset>,
    mut progress: ResMut<PlayerProgress>,
    mut wallet: ResMut<Wallet>,
    mut income: ResMut<PassiveIncome>,
    mut pools: ResMut<EnemyPools>,
) {
    if resets.read().count() == 0 {
        return;
    }

    *progress = PlayerProgress::default();
    *wallet = Wallet::default();
    *income = PassiveIncome::new(income.points_per_second);
    pools.reset_session();

    let level = progress.current_level();
    if let Err(e) = pools.spawn_next_enemy(level) {
        error!("Failed to spawn enemy after reset (level {}): {}", level, e);
    }
    info!("Session reset");
}
