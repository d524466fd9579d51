//! Combat events - the engine's one-way output channel
//!
//! The engine calls its [`EventSink`] synchronously, once per event, in
//! resolution order. Events are produced and handed off; the engine keeps
//! no copy.

mod sink;

pub use sink::{EventLog, EventSink, NullSink};

use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Something the engine did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Engine time the event happened at
    pub time: f64,
    /// The side the event is about: the attacker for attack events,
    /// otherwise the fighter whose state changed
    pub side: Side,
    pub kind: CombatEventKind,
}

/// Event payloads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEventKind {
    AttackStarted {
        target: Side,
    },
    /// Windup completed. `eta` is the projectile flight time, `None` for melee.
    AttackImpact {
        target: Side,
        eta: Option<f64>,
    },
    DamageApplied {
        source: Option<Side>,
        amount: i64,
        absorbed: i64,
        hp_lost: i64,
    },
    UnitDied,
    XpGained {
        amount: u64,
    },
    LeveledUp {
        level: u32,
    },
    Respawned,
    Healed {
        amount: i64,
    },
    ShieldAdded {
        amount: i64,
    },
    Stunned {
        seconds: f64,
    },
    /// Diagnostic: pending impacts of `side` were dropped
    ImpactCancelled {
        count: usize,
    },
}

impl CombatEvent {
    pub fn new(time: f64, side: Side, kind: CombatEventKind) -> Self {
        CombatEvent { time, side, kind }
    }

    /// Numeric payload (damage, heal, shield or xp amount)
    pub fn amount(&self) -> Option<i64> {
        match self.kind {
            CombatEventKind::DamageApplied { amount, .. }
            | CombatEventKind::Healed { amount }
            | CombatEventKind::ShieldAdded { amount } => Some(amount),
            CombatEventKind::XpGained { amount } => Some(amount as i64),
            _ => None,
        }
    }

    /// Projectile travel time for impact-spawning events
    pub fn eta(&self) -> Option<f64> {
        match self.kind {
            CombatEventKind::AttackImpact { eta, .. } => eta,
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            CombatEventKind::AttackStarted { .. } => "AttackStarted",
            CombatEventKind::AttackImpact { .. } => "AttackImpact",
            CombatEventKind::DamageApplied { .. } => "DamageApplied",
            CombatEventKind::UnitDied => "UnitDied",
            CombatEventKind::XpGained { .. } => "XpGained",
            CombatEventKind::LeveledUp { .. } => "LeveledUp",
            CombatEventKind::Respawned => "Respawned",
            CombatEventKind::Healed { .. } => "Healed",
            CombatEventKind::ShieldAdded { .. } => "ShieldAdded",
            CombatEventKind::Stunned { .. } => "Stunned",
            CombatEventKind::ImpactCancelled { .. } => "ImpactCancelled",
        }
    }

    /// One-line human readable description
    pub fn describe(&self) -> String {
        let detail = match self.kind {
            CombatEventKind::AttackStarted { target } => format!("-> {}", target),
            CombatEventKind::AttackImpact { target, eta: Some(eta) } => {
                format!("-> {} (eta {:.2}s)", target, eta)
            }
            CombatEventKind::AttackImpact { target, eta: None } => format!("-> {}", target),
            CombatEventKind::DamageApplied {
                source,
                amount,
                absorbed,
                hp_lost,
            } => {
                let from = source.map(|s| format!(" from {}", s)).unwrap_or_default();
                format!("{} ({} shield, {} hp){}", amount, absorbed, hp_lost, from)
            }
            CombatEventKind::XpGained { amount } => format!("+{} xp", amount),
            CombatEventKind::LeveledUp { level } => format!("level {}", level),
            CombatEventKind::Healed { amount } | CombatEventKind::ShieldAdded { amount } => {
                format!("+{}", amount)
            }
            CombatEventKind::Stunned { seconds } => format!("{:.2}s", seconds),
            CombatEventKind::ImpactCancelled { count } => format!("{} dropped", count),
            CombatEventKind::UnitDied | CombatEventKind::Respawned => String::new(),
        };
        format!("[{:>8.3}] {:<8} {} {}", self.time, self.side.to_string(), self.name(), detail)
            .trim_end()
            .to_string()
    }
}
