//! combat_core - Tick-driven combat simulation for a 1D lane brawler
//!
//! This library provides:
//! - CombatEngine: Authoritative fighter state, attack cadence and impact resolution
//! - ImpactScheduler: Ordered queue of future hits, abilities and DoT ticks
//! - Damage Resolution: Attack vs defense with shield-then-health mitigation
//! - CombatEvent: Ordered notifications delivered through an EventSink
//! - Config: Engine tuning and encounter files in TOML
//! - Time: Integer microsecond engine clock

pub mod combat;
pub mod config;
pub mod damage;
pub mod dot;
pub mod engine;
pub mod event;
pub mod fighter;
pub mod prelude;
pub mod profile;
pub mod schedule;
pub mod time;
pub mod types;

// Re-export core types for convenience
pub use combat::{absorb_damage, Mitigation};
pub use config::{
    default_encounter, load_encounter, parse_encounter, ConfigError, EncounterConfig, EngineConfig, FighterSpec,
    LevelingConfig,
};
pub use damage::{compute_damage, effective_attack, scaled_damage, MIN_DAMAGE};
pub use dot::DotApplication;
pub use engine::{AttackPhase, Cadence, CombatEngine};
pub use event::{CombatEvent, CombatEventKind, EventLog, EventSink, NullSink};
pub use fighter::{FighterPatch, FighterState};
pub use profile::AttackProfile;
pub use schedule::{ImpactId, ImpactKind, ImpactScheduler, PendingImpact};
pub use time::{to_micros, to_secs, Micros};
pub use types::{FighterId, Side, Team};
