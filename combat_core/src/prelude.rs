//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::fighter::{FighterPatch, FighterState};
pub use crate::profile::AttackProfile;
pub use crate::types::{FighterId, Side, Team};

// Engine
pub use crate::engine::{AttackPhase, CombatEngine};

// Events
pub use crate::event::{CombatEvent, CombatEventKind, EventLog, EventSink, NullSink};

// Damage and effects
pub use crate::combat::Mitigation;
pub use crate::damage::compute_damage;
pub use crate::dot::DotApplication;

// Config
pub use crate::config::{default_encounter, EncounterConfig, EngineConfig, FighterSpec};
