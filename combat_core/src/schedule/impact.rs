//! PendingImpact - A scheduled future combat event

use crate::time::Micros;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Handle returned when an impact is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImpactId(pub u64);

/// What resolving an impact means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactKind {
    /// Melee/hitscan windup completes; projectiles launch here
    Windup,
    /// A launched projectile reaches its target
    ProjectileArrival,
    /// Ability hit with damage fixed at schedule time
    Ability,
    /// One tick of a damage-over-time application
    DamageOverTime,
}

impl ImpactKind {
    /// Impacts produced by the attack cadence (as opposed to abilities)
    pub fn is_attack(&self) -> bool {
        matches!(self, ImpactKind::Windup | ImpactKind::ProjectileArrival)
    }
}

/// A future event waiting for engine time to reach it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingImpact {
    /// Side that caused the impact
    pub instigator: Side,
    /// Side the impact lands on
    pub target: Side,
    /// Absolute engine instant of resolution
    pub time: Micros,
    pub kind: ImpactKind,
    /// Damage fixed at schedule time; resolved verbatim instead of recomputed
    pub damage_override: Option<i64>,
}

impl PendingImpact {
    pub fn windup(instigator: Side, target: Side, time: Micros) -> Self {
        PendingImpact {
            instigator,
            target,
            time,
            kind: ImpactKind::Windup,
            damage_override: None,
        }
    }

    pub fn projectile_arrival(instigator: Side, target: Side, time: Micros) -> Self {
        PendingImpact {
            instigator,
            target,
            time,
            kind: ImpactKind::ProjectileArrival,
            damage_override: None,
        }
    }

    pub fn ability(instigator: Side, target: Side, time: Micros, damage: i64) -> Self {
        PendingImpact {
            instigator,
            target,
            time,
            kind: ImpactKind::Ability,
            damage_override: Some(damage),
        }
    }

    pub fn damage_over_time(instigator: Side, target: Side, time: Micros, damage: i64) -> Self {
        PendingImpact {
            instigator,
            target,
            time,
            kind: ImpactKind::DamageOverTime,
            damage_override: Some(damage),
        }
    }

    /// Whether this impact involves `side` as instigator or target
    pub fn involves(&self, side: Side) -> bool {
        self.instigator == side || self.target == side
    }
}
