//! Damage system - base damage from attack and defense stats

mod calculation;

pub use calculation::{compute_damage, effective_attack, scaled_damage, MIN_DAMAGE};
