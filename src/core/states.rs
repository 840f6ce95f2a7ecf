//! Game state definitions that control the overall flow of the game.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` to read enemy data and build the pools
/// - Move to `InGame` once the pools are ready
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files and building enemy pools
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}

/// Per-frame ordering of gameplay systems while `InGame`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Clicks and idle ticks
    Input,
    /// Damage application and defeat detection
    Damage,
    /// Rewards, exp and level ups
    Progression,
    /// Defeat reports and respawns
    Spawn,
    /// Forwarding pool changes to listeners
    Notify,
}
