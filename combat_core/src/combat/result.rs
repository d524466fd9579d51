//! Mitigation - Outcome of applying damage to a fighter

use serde::{Deserialize, Serialize};

/// Result of running incoming damage through shield then hp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mitigation {
    /// Damage before shield
    pub incoming: i64,
    /// Damage soaked by the shield
    pub absorbed: i64,
    /// Damage that actually reduced hp
    pub hp_lost: i64,

    // === State Changes ===
    pub shield_before: i64,
    pub shield_after: i64,
    pub hp_before: i64,
    pub hp_after: i64,

    /// Whether this hit took hp from positive to zero
    pub is_killing_blow: bool,
}

impl Mitigation {
    /// Whether any of the damage reached hp
    pub fn landed_on_health(&self) -> bool {
        self.hp_lost > 0
    }

    /// Damage that was wasted past zero hp
    pub fn overkill(&self) -> i64 {
        (self.incoming - self.absorbed - self.hp_lost).max(0)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.hp_lost > 0 {
            parts.push(format!("{} damage taken", self.hp_lost));
        }

        if self.absorbed > 0 {
            parts.push(format!("{} absorbed by shield", self.absorbed));
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}
