//! AttackProfile - Immutable attack tuning consumed by the engine

use crate::time::{to_micros, Micros};
use serde::{Deserialize, Serialize};

/// Smallest attack period the engine will run
pub const MIN_PERIOD: f64 = 0.01;

/// Per-side attack tuning supplied by a presentation or config layer
///
/// - `period`: seconds between attack starts
/// - `windup`: delay from attack start to impact
/// - `reach`: maximum lane distance for starting an attack
/// - `projectile_speed`: lane units per second; `0` means melee/hitscan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub period: f64,
    #[serde(default)]
    pub windup: f64,
    pub reach: f64,
    #[serde(default)]
    pub projectile_speed: f64,
}

impl AttackProfile {
    /// Melee or hitscan profile
    pub fn melee(period: f64, windup: f64, reach: f64) -> Self {
        AttackProfile {
            period,
            windup,
            reach,
            projectile_speed: 0.0,
        }
    }

    /// Ranged profile whose impacts travel at `speed`
    pub fn projectile(period: f64, windup: f64, reach: f64, speed: f64) -> Self {
        AttackProfile {
            period,
            windup,
            reach,
            projectile_speed: speed,
        }
    }

    pub fn is_projectile(&self) -> bool {
        self.projectile_speed > 0.0
    }

    /// Clamp malformed tuning to the nearest valid value
    ///
    /// Period is floored at [`MIN_PERIOD`], windup and reach at zero, and
    /// any non-finite value falls back to its floor. Infinite reach is kept.
    pub fn normalized(self) -> Self {
        let period = if self.period.is_finite() {
            self.period.max(MIN_PERIOD)
        } else {
            MIN_PERIOD
        };
        let windup = if self.windup.is_finite() {
            self.windup.max(0.0)
        } else {
            0.0
        };
        let reach = if self.reach.is_nan() {
            0.0
        } else {
            self.reach.max(0.0)
        };
        let projectile_speed = if self.projectile_speed.is_finite() {
            self.projectile_speed.max(0.0)
        } else {
            0.0
        };
        AttackProfile {
            period,
            windup,
            reach,
            projectile_speed,
        }
    }

    /// Seconds an attack may sit in AwaitingImpact before the engine gives up on it
    pub fn stuck_await_limit(&self, floor: f64) -> f64 {
        floor.max(4.0 * (self.windup + 0.5))
    }

    /// Flight time for a projectile covering `distance`
    pub fn flight_time(&self, distance: f64) -> f64 {
        if !self.is_projectile() {
            return 0.0;
        }
        (distance.abs() / self.projectile_speed).max(0.0)
    }

    // === Engine clock ===

    /// Period on the engine clock, never zero
    pub fn period_micros(&self) -> Micros {
        to_micros(self.period).max(1)
    }

    pub fn windup_micros(&self) -> Micros {
        to_micros(self.windup)
    }

    pub fn stuck_await_limit_micros(&self, floor: f64) -> Micros {
        to_micros(self.stuck_await_limit(floor))
    }

    pub fn flight_micros(&self, distance: f64) -> Micros {
        to_micros(self.flight_time(distance))
    }
}
