//! Progression plugin - exp, levels and resets.

use bevy::prelude::*;

use super::systems;

/// Progression plugin - handles rewards and level ups.
pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_progression_systems(app);
    }
}
