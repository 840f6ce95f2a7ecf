//! Core plugin that sets up game states, events, and system ordering.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame)
/// - Global events (ClickEvent, DamageEvent, UnitDefeated, etc.)
/// - The `GameSet` chain every gameplay system runs in
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>();

        add_core_events(app);

        app.configure_sets(
            Update,
            (
                GameSet::Input,
                GameSet::Damage,
                GameSet::Progression,
                GameSet::Spawn,
                GameSet::Notify,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}

/// Register global events. Split out so tests can skip the state machine.
pub fn add_core_events(app: &mut App) {
    app.add_event::<ClickEvent>()
        .add_event::<DamageEvent>()
        .add_event::<UnitDefeated>()
        .add_event::<CurrentUnitChanged>()
        .add_event::<LevelUpEvent>()
        .add_event::<SessionReset>();
}
