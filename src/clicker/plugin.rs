//! Clicker plugin - input-driven and idle income.

use bevy::prelude::*;

use super::systems;

/// Clicker plugin - handles clicks, passive income and idle damage.
pub struct ClickerInputPlugin;

impl Plugin for ClickerInputPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_clicker_systems(app);
    }
}
