//! Combat resolution - Apply incoming damage to a fighter

mod mitigation;
mod result;

pub use mitigation::absorb_damage;
pub use result::Mitigation;
