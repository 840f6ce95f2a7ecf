//! Idle Clicker - a point-and-click idle game core in Bevy.
//!
//! Click the enemy on screen for points and damage, earn passive income, level
//! up, and work through a stream of pooled enemies with a boss every few levels.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, system ordering
//! - **Enemies**: Enemy data, object pools, spawn selection, boss tracking
//! - **Combat**: Health and damage application
//! - **Clicker**: Clicks, points, passive income, idle damage
//! - **Progression**: Exp, levels, session snapshots
//!
//! Rendering and UI are left to a presentation layer that listens to
//! `CurrentUnitChanged`, `UnitDefeated` and `LevelUpEvent`.

pub mod clicker;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod progression;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ClickerPlugin;

impl Plugin for ClickerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Enemy pools and spawning
            .add_plugins(enemies::EnemyPlugin)

            // Damage
            .add_plugins(combat::CombatPlugin)

            // Clicks and idle income
            .add_plugins(clicker::ClickerInputPlugin)

            // Exp and levels
            .add_plugins(progression::ProgressionPlugin);
    }
}
