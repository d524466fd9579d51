//! DoT (Damage over Time) applications
//!
//! The engine has no DoT primitive of its own: an application is expanded
//! into a series of scheduled override impacts, one per tick.

use crate::time::{to_micros, Micros};
use serde::{Deserialize, Serialize};

/// A damage-over-time effect ready to be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotApplication {
    /// Damage dealt by each tick (fixed when applied)
    pub damage_per_tick: i64,
    /// Seconds between ticks; the first tick lands one interval after application
    pub tick_interval: f64,
    pub tick_count: u32,
}

impl DotApplication {
    pub fn new(damage_per_tick: i64, tick_interval: f64, tick_count: u32) -> Self {
        DotApplication {
            damage_per_tick,
            tick_interval,
            tick_count,
        }
    }

    /// Build from a damage-per-second rate over a duration
    ///
    /// Tick count is `ceil(duration / interval)`, per-tick damage is
    /// `round(dps × interval)`.
    pub fn from_duration(dps: f64, duration: f64, tick_interval: f64) -> Self {
        if tick_interval.is_nan() || tick_interval <= 0.0 || !duration.is_finite() || !dps.is_finite() {
            return DotApplication::new(0, tick_interval, 0);
        }
        let tick_count = (duration.max(0.0) / tick_interval).ceil() as u32;
        let damage_per_tick = (dps * tick_interval).round() as i64;
        DotApplication::new(damage_per_tick, tick_interval, tick_count)
    }

    /// Whether scheduling this would do anything
    pub fn is_effective(&self) -> bool {
        self.damage_per_tick > 0 && self.tick_count > 0 && self.tick_interval.is_finite() && self.interval() > 0
    }

    /// Total damage over all ticks
    pub fn total_damage(&self) -> i64 {
        self.damage_per_tick.saturating_mul(self.tick_count as i64)
    }

    /// Duration from application to last tick
    pub fn duration(&self) -> f64 {
        self.tick_interval * self.tick_count as f64
    }

    /// Tick spacing on the engine clock
    pub fn interval(&self) -> Micros {
        to_micros(self.tick_interval)
    }

    /// Absolute tick instants when applied at `now`
    pub fn tick_times(&self, now: Micros) -> impl Iterator<Item = Micros> {
        let interval = self.interval();
        (1..=self.tick_count as Micros).map(move |k| now.saturating_add(interval.saturating_mul(k)))
    }
}
