//! Per-side attack cadence state machine
//!
//! Idle (accumulating) -> AwaitingImpact (impact scheduled) -> Idle.
//! Stun and death gate the Idle -> AwaitingImpact transition from the
//! outside; this type only tracks the timer and the in-flight attack.

use crate::schedule::ImpactId;
use crate::time::Micros;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Where a side is in its attack cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackPhase {
    Idle,
    AwaitingImpact,
}

/// An attack that has started but not yet resolved its windup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingAttack {
    pub target: Side,
    /// Engine instant the attack started
    pub since: Micros,
    pub impact: ImpactId,
}

/// Cadence timer plus attack state for one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    /// Time accumulated toward the next attack, never above the period
    pub accumulator: Micros,
    pub awaiting: Option<AwaitingAttack>,
}

impl Cadence {
    pub fn phase(&self) -> AttackPhase {
        if self.awaiting.is_some() {
            AttackPhase::AwaitingImpact
        } else {
            AttackPhase::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.awaiting.is_none()
    }

    /// Accumulate while idle, clamped at one period (no banking)
    pub fn advance(&mut self, elapsed: Micros, period: Micros) {
        if !self.is_idle() {
            return;
        }
        self.accumulator = self.accumulator.saturating_add(elapsed).min(period);
    }

    /// Whether the accumulator holds a full period
    pub fn is_ready(&self, period: Micros) -> bool {
        self.is_idle() && self.accumulator >= period
    }

    /// Time until the accumulator fills, if idle and not yet full
    pub fn time_to_ready(&self, period: Micros) -> Option<Micros> {
        if !self.is_idle() || self.is_ready(period) {
            return None;
        }
        Some(period - self.accumulator)
    }

    /// Consume the period and start waiting on an impact
    pub fn commit(&mut self, target: Side, now: Micros, impact: ImpactId) {
        self.accumulator = 0;
        self.awaiting = Some(AwaitingAttack {
            target,
            since: now,
            impact,
        });
    }

    /// Return to Idle, handing back the attack that was in flight
    pub fn release(&mut self) -> Option<AwaitingAttack> {
        self.awaiting.take()
    }

    /// Full reset: Idle with an empty accumulator
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.awaiting = None;
    }
}
