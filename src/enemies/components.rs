//! Enemy unit types shared by the pool engine and the gameplay systems.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::combat::Health;

/// Stable template identifier (matches the enemy RON file name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Whether a unit was spawned from a regular or a boss pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Regular,
    Boss,
}

/// Non-owning handle to a pooled instance.
///
/// The generation changes every time the slot is handed out again, so a handle
/// kept from an earlier activation no longer resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnitHandle {
    pub(crate) pool: usize,
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

/// The unit currently on screen and what it was spawned for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveUnit {
    pub handle: UnitHandle,
    pub template: TemplateId,
    pub level: u32,
    pub kind: UnitKind,
}

impl ActiveUnit {
    pub fn is_boss(&self) -> bool {
        self.kind == UnitKind::Boss
    }
}

/// A poolable enemy or boss instance.
pub trait UnitInstance: Clone {
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn is_active(&self) -> bool;
    /// Restore transient state (HP and the like) from the template prototype.
    fn reset_from(&mut self, prototype: &Self);
}

/// Resolves template ids to freshly built, deactivated units.
pub trait UnitFactory<U: UnitInstance> {
    fn build(&self, template: &TemplateId) -> Result<U, ConfigError>;
}

/// What the player earns for defeating a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rewards {
    pub points: u64,
    pub exp: u64,
}

/// Pooled enemy instance built from an [`EnemyDefinition`](super::data::EnemyDefinition).
#[derive(Clone, Debug)]
pub struct EnemyUnit {
    pub name: String,
    pub health: Health,
    pub rewards: Rewards,
    active: bool,
}

impl EnemyUnit {
    pub fn new(name: impl Into<String>, max_health: f32, rewards: Rewards) -> Self {
        Self {
            name: name.into(),
            health: Health::new(max_health),
            rewards,
            active: false,
        }
    }
}

impl UnitInstance for EnemyUnit {
    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn reset_from(&mut self, prototype: &Self) {
        self.health = prototype.health.clone();
        self.rewards = prototype.rewards;
    }
}
