//! Clicker systems - turn clicks and idle time into points and damage.

use bevy::prelude::*;

use super::components::*;
use crate::core::{ClickEvent, DamageEvent, GameSet};
use crate::enemies::EnemyPools;

/// Configure clicker systems.
pub fn setup_clicker_systems(app: &mut App) {
    app.init_resource::<Wallet>()
        .init_resource::<ClickPower>()
        .init_resource::<PassiveIncome>()
        .init_resource::<IdleDamage>()
        .add_systems(
            Update,
            (handle_clicks, accrue_passive_income, apply_idle_damage).in_set(GameSet::Input),
        );
}

/// Each click pays out points and hits the current unit, if there is one.
pub fn handle_clicks(
    mut clicks: EventReader<ClickEvent>,
    power: Res<ClickPower>,
    pools: Res<EnemyPools>,
    mut wallet: ResMut<Wallet>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for _ in clicks.read() {
        wallet.deposit(power.points_per_click);

        if let Some(current) = pools.current_enemy() {
            damage_events.send(DamageEvent {
                target: current.handle,
                amount: power.damage,
            });
        }
    }
}

/// Pay out passive income for the elapsed frame time.
pub fn accrue_passive_income(time: Res<Time>, mut income: ResMut<PassiveIncome>, mut wallet: ResMut<Wallet>) {
    let earned = income.accrue(time.delta_secs_f64());
    if earned > 0 {
        wallet.deposit(earned);
    }
}

/// Chip away at the current unit while the player is idle.
pub fn apply_idle_damage(
    time: Res<Time>,
    idle: Res<IdleDamage>,
    pools: Res<EnemyPools>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    if idle.per_second <= 0.0 {
        return;
    }

    let amount = idle.per_second * time.delta_secs();
    if amount <= 0.0 {
        return;
    }

    if let Some(current) = pools.current_enemy() {
        damage_events.send(DamageEvent {
            target: current.handle,
            amount,
        });
    }
}
