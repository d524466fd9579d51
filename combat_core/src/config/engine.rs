//! Per-encounter engine tuning

use super::ConfigError;
use crate::profile::AttackProfile;
use serde::{Deserialize, Serialize};

/// Immutable tuning supplied when an encounter starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default player attack period when no profile is set
    #[serde(default = "default_player_attack_rate")]
    pub player_attack_rate_sec: f64,
    /// Default enemy attack period when no profile is set
    #[serde(default = "default_enemy_attack_rate")]
    pub enemy_attack_rate_sec: f64,
    #[serde(default = "default_reach")]
    pub default_reach: f64,
    #[serde(default)]
    pub default_windup: f64,
    /// XP the player earns per enemy killed
    #[serde(default = "default_xp_reward")]
    pub xp_reward_on_kill: u64,
    /// Lower bound of the stuck-await limit: `max(floor, 4 × (windup + 0.5))`
    #[serde(default = "default_stuck_await_floor")]
    pub stuck_await_floor_sec: f64,
    #[serde(default)]
    pub leveling: LevelingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            player_attack_rate_sec: default_player_attack_rate(),
            enemy_attack_rate_sec: default_enemy_attack_rate(),
            default_reach: default_reach(),
            default_windup: 0.0,
            xp_reward_on_kill: default_xp_reward(),
            stuck_await_floor_sec: default_stuck_await_floor(),
            leveling: LevelingConfig::default(),
        }
    }
}

fn default_player_attack_rate() -> f64 {
    1.0
}
fn default_enemy_attack_rate() -> f64 {
    1.2
}
fn default_reach() -> f64 {
    1.5
}
fn default_xp_reward() -> u64 {
    10
}
fn default_stuck_await_floor() -> f64 {
    10.0
}

impl EngineConfig {
    /// Profile used for the player until one is set
    pub fn default_player_profile(&self) -> AttackProfile {
        AttackProfile::melee(self.player_attack_rate_sec, self.default_windup, self.default_reach).normalized()
    }

    /// Profile used for enemies until one is set
    pub fn default_enemy_profile(&self) -> AttackProfile {
        AttackProfile::melee(self.enemy_attack_rate_sec, self.default_windup, self.default_reach).normalized()
    }

    /// Reject tuning the engine would have to clamp
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_attack_rate_sec", self.player_attack_rate_sec),
            ("enemy_attack_rate_sec", self.enemy_attack_rate_sec),
            ("stuck_await_floor_sec", self.stuck_await_floor_sec),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.default_reach.is_nan() || self.default_reach < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "default_reach must not be negative, got {}",
                self.default_reach
            )));
        }
        if !self.default_windup.is_finite() || self.default_windup < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "default_windup must not be negative, got {}",
                self.default_windup
            )));
        }
        self.leveling.validate()
    }
}

/// Player progression on kills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelingConfig {
    /// XP to go from level `n` to `n + 1` is `xp_per_level × n`
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u64,
    #[serde(default = "default_hp_per_level")]
    pub hp_per_level: i64,
    #[serde(default = "default_atk_per_level")]
    pub atk_per_level: i64,
    #[serde(default = "default_def_per_level")]
    pub def_per_level: i64,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        LevelingConfig {
            xp_per_level: default_xp_per_level(),
            hp_per_level: default_hp_per_level(),
            atk_per_level: default_atk_per_level(),
            def_per_level: default_def_per_level(),
        }
    }
}

fn default_xp_per_level() -> u64 {
    100
}
fn default_hp_per_level() -> i64 {
    10
}
fn default_atk_per_level() -> i64 {
    2
}
fn default_def_per_level() -> i64 {
    1
}

impl LevelingConfig {
    /// XP needed to advance from `level`
    pub fn xp_to_next(&self, level: u32) -> u64 {
        self.xp_per_level.saturating_mul(level.max(1) as u64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.xp_per_level == 0 {
            return Err(ConfigError::ValidationError(
                "leveling.xp_per_level must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
