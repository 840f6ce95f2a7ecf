//! Combat systems - damage application and defeat detection.

use bevy::prelude::*;

use super::components::*;
use crate::core::GameSet;
use crate::enemies::EnemyPools;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(Update, apply_damage.in_set(GameSet::Damage));
}

/// Apply damage to the targeted pooled unit and report the killing blow.
pub fn apply_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut pools: ResMut<EnemyPools>,
    mut defeated_events: EventWriter<UnitDefeated>,
) {
    for event in damage_events.read() {
        let Some(unit) = pools.unit_mut(event.target) else {
            debug!("Dropping damage for a released unit: {:?}", event.target);
            continue;
        };

        // Already dead this frame, waiting for the spawn step
        if unit.health.is_dead() {
            continue;
        }

        unit.health.take_damage(event.amount);
        if !unit.health.is_dead() {
            continue;
        }
        let rewards = unit.rewards;

        let Some(active) = pools
            .current_enemy()
            .filter(|current| current.handle == event.target)
            .cloned()
        else {
            continue;
        };

        info!("Defeated {:?} '{}' at level {}", active.kind, active.template, active.level);
        defeated_events.send(UnitDefeated {
            unit: active,
            rewards,
        });
    }
}
