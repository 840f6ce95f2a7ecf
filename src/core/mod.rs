//! Core game module - states, events, and system ordering.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod states;

pub use events::*;
pub use plugin::{add_core_events, CorePlugin};
pub use states::*;
