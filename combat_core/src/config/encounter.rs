//! Encounter configuration loading

use super::{ConfigError, EngineConfig};
use crate::fighter::FighterState;
use crate::profile::AttackProfile;
use crate::types::{FighterId, Team};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete encounter: engine tuning, the player and the opening enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub engine: EngineConfig,
    pub player: FighterSpec,
    #[serde(default)]
    pub enemies: Vec<FighterSpec>,
}

/// Starting stats for one fighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSpec {
    #[serde(default)]
    pub name: String,
    pub max_hp: i64,
    /// Starting hp; defaults to `max_hp`
    #[serde(default)]
    pub hp: Option<i64>,
    #[serde(default)]
    pub shield: i64,
    pub atk: i64,
    #[serde(default)]
    pub def: i64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub pos_x: f64,
    /// Attack tuning; the engine defaults apply when absent
    #[serde(default)]
    pub profile: Option<AttackProfile>,
}

fn default_level() -> u32 {
    1
}

impl FighterSpec {
    pub fn new(max_hp: i64, atk: i64, def: i64) -> Self {
        FighterSpec {
            name: String::new(),
            max_hp,
            hp: None,
            shield: 0,
            atk,
            def,
            level: 1,
            pos_x: 0.0,
            profile: None,
        }
    }

    pub fn at(mut self, pos_x: f64) -> Self {
        self.pos_x = pos_x;
        self
    }

    pub fn with_profile(mut self, profile: AttackProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_shield(mut self, shield: i64) -> Self {
        self.shield = shield;
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Build the live state for this fighter
    pub fn to_state(&self, id: FighterId, team: Team) -> FighterState {
        let mut state = FighterState::new(id, team, self.max_hp, self.atk, self.def)
            .with_position(self.pos_x)
            .with_shield(self.shield)
            .with_level(self.level);
        if let Some(hp) = self.hp {
            state.hp = hp.clamp(0, state.max_hp);
        }
        state
    }

    fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if self.max_hp <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: max_hp must be positive, got {}",
                label, self.max_hp
            )));
        }
        if self.atk < 0 || self.def < 0 || self.shield < 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: atk, def and shield must not be negative",
                label
            )));
        }
        if !self.pos_x.is_finite() {
            return Err(ConfigError::ValidationError(format!("{}: pos_x must be finite", label)));
        }
        if let Some(profile) = &self.profile {
            if !profile.period.is_finite() || profile.period <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{}: profile.period must be positive, got {}",
                    label, profile.period
                )));
            }
            if !profile.windup.is_finite() || profile.windup < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{}: profile.windup must not be negative, got {}",
                    label, profile.windup
                )));
            }
        }
        Ok(())
    }
}

impl EncounterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.player.validate("player")?;
        for (i, enemy) in self.enemies.iter().enumerate() {
            let label = if enemy.name.is_empty() {
                format!("enemies[{}]", i)
            } else {
                enemy.name.clone()
            };
            enemy.validate(&label)?;
        }
        Ok(())
    }
}

/// Load and validate an encounter from a TOML file
pub fn load_encounter(path: &Path) -> Result<EncounterConfig, ConfigError> {
    let config: EncounterConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate an encounter from a TOML string
pub fn parse_encounter(content: &str) -> Result<EncounterConfig, ConfigError> {
    let config: EncounterConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// The bundled training encounter
pub fn default_encounter() -> EncounterConfig {
    let toml = include_str!("../../config/encounter.toml");
    parse_encounter(toml).unwrap_or_else(|_| EncounterConfig {
        name: "fallback".to_string(),
        engine: EngineConfig::default(),
        player: FighterSpec::new(100, 10, 0),
        enemies: vec![FighterSpec::new(30, 6, 2).at(1.0)],
    })
}
