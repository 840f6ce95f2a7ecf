//! Global events used for cross-system communication.
//!
//! Input sends ClickEvents, the clicker turns them into DamageEvents, and the
//! combat systems report UnitDefeated once a pooled unit runs out of health.
//! The presentation layer only ever listens; it never touches the pools.

use bevy::prelude::*;

use crate::enemies::{ActiveUnit, Rewards, UnitHandle};

/// Sent by the input layer for every click on the current enemy.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClickEvent;

/// Sent when a pooled unit takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Unit receiving damage
    pub target: UnitHandle,
    /// Damage amount
    pub amount: f32,
}

/// Sent once when a unit's health reaches 0.
///
/// The progression systems pay out the rewards and the spawn system reports
/// the defeat to the pools and brings in the next unit.
#[derive(Event, Debug, Clone)]
pub struct UnitDefeated {
    pub unit: ActiveUnit,
    pub rewards: Rewards,
}

/// Sent whenever the engine's current unit changes.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CurrentUnitChanged {
    pub previous: Option<ActiveUnit>,
    pub current: Option<ActiveUnit>,
}

/// Sent when the player levels up.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpEvent {
    /// New level
    pub new_level: u32,
}

/// Request a full save-wipe: progress, points and boss history start over.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SessionReset;
