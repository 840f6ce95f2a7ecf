//! Clicker module - clicks, points, passive income and idle damage.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::ClickerInputPlugin;
pub use systems::{accrue_passive_income, apply_idle_damage, handle_clicks};
