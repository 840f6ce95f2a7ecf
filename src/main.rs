//! Idle Clicker - Entry Point
//!
//! Runs a headless session at 60 ticks per second. Without a presentation
//! layer attached there are no clicks, so the session is driven by idle damage
//! and passive income alone.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use idle_clicker::clicker::{IdleDamage, PassiveIncome};

fn main() {
    App::new()
        // Headless loop
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f64(1.0 / 60.0),
        )))
        .add_plugins((StatesPlugin, LogPlugin::default()))

        // Our game plugin
        .add_plugins(idle_clicker::ClickerPlugin)

        // Something to watch while nobody is clicking
        .insert_resource(IdleDamage { per_second: 8.0 })
        .insert_resource(PassiveIncome::new(1.0))

        .run();
}
