//! Clicker resources.

use bevy::prelude::*;

/// Points banked by the player.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wallet {
    pub points: u64,
}

impl Wallet {
    pub fn deposit(&mut self, amount: u64) {
        self.points = self.points.saturating_add(amount);
    }
}

/// What a single click is worth.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ClickPower {
    pub damage: f32,
    pub points_per_click: u64,
}

impl Default for ClickPower {
    fn default() -> Self {
        Self {
            damage: 1.0,
            points_per_click: 1,
        }
    }
}

/// Points earned per second without clicking.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PassiveIncome {
    pub points_per_second: f64,
    /// Fractional points not yet paid out
    banked: f64,
}

impl PassiveIncome {
    pub fn new(points_per_second: f64) -> Self {
        Self {
            points_per_second,
            banked: 0.0,
        }
    }

    /// Accrue `delta` seconds of income and return the whole points earned.
    pub fn accrue(&mut self, delta: f64) -> u64 {
        if self.points_per_second <= 0.0 || delta <= 0.0 {
            return 0;
        }
        self.banked += self.points_per_second * delta;
        let whole = self.banked.floor();
        self.banked -= whole;
        whole as u64
    }
}

/// Damage dealt to the current unit every second without clicking.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct IdleDamage {
    pub per_second: f32,
}
