//! Progression module - experience, levels and session snapshots.

mod components;
mod plugin;
mod snapshot;
mod systems;

pub use components::*;
pub use plugin::ProgressionPlugin;
pub use snapshot::SessionSnapshot;
pub use systems::{award_defeat_rewards, handle_session_reset};
