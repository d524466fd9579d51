//! FighterState - One combatant's live battle state

mod status;

use crate::time::Micros;
use crate::types::{FighterId, Side, Team};
use serde::{Deserialize, Serialize};

/// Live state for a single combatant (player or enemy)
///
/// Owned exclusively by the engine. Collaborators only ever see copies and
/// write back through engine calls so every change emits its event.
///
/// Invariants kept by every mutator:
/// - `0 <= hp <= max_hp`
/// - `shield >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterState {
    // === Identity ===
    pub id: FighterId,
    pub team: Team,

    // === Vitals ===
    pub hp: i64,
    pub max_hp: i64,
    /// Absorbs damage before hp
    pub shield: i64,

    // === Combat Stats ===
    pub atk: i64,
    pub def: i64,
    pub level: u32,
    /// Experience toward the next level
    pub xp: u64,

    // === Position ===
    /// Scalar position on the 1D lane
    pub pos_x: f64,

    // === Timers ===
    /// Stun remaining in microseconds; blocks new attack starts while > 0
    pub stun_timer: Micros,
    pub atk_buff_timer: Micros,
    pub atk_buff_multiplier: f64,
}

impl FighterState {
    /// Create a fighter at full health
    pub fn new(id: FighterId, team: Team, max_hp: i64, atk: i64, def: i64) -> Self {
        let max_hp = max_hp.max(1);
        FighterState {
            id,
            team,
            hp: max_hp,
            max_hp,
            shield: 0,
            atk: atk.max(0),
            def: def.max(0),
            level: 1,
            xp: 0,
            pos_x: 0.0,
            stun_timer: 0,
            atk_buff_timer: 0,
            atk_buff_multiplier: 1.0,
        }
    }

    /// Create the player fighter
    pub fn player(max_hp: i64, atk: i64, def: i64) -> Self {
        Self::new(FighterId::PLAYER, Team::Player, max_hp, atk, def)
    }

    /// Create an enemy fighter
    pub fn enemy(id: FighterId, max_hp: i64, atk: i64, def: i64) -> Self {
        Self::new(id, Team::Enemy, max_hp, atk, def)
    }

    pub fn with_position(mut self, pos_x: f64) -> Self {
        self.pos_x = if pos_x.is_finite() { pos_x } else { 0.0 };
        self
    }

    pub fn with_shield(mut self, shield: i64) -> Self {
        self.shield = shield.max(0);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    /// Side this fighter plays on
    pub fn side(&self) -> Side {
        match self.team {
            Team::Player => Side::Player,
            Team::Enemy => Side::Enemy(self.id),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Distance to another fighter on the lane
    pub fn distance_to(&self, other: &FighterState) -> f64 {
        (self.pos_x - other.pos_x).abs()
    }

    /// Heal hp by amount, capped at max. Returns hp actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        if amount <= 0 || self.is_dead() {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Add shield points. No ceiling is enforced here.
    pub fn add_shield(&mut self, amount: i64) -> i64 {
        if amount <= 0 || self.is_dead() {
            return 0;
        }
        self.shield = self.shield.saturating_add(amount);
        amount
    }

    /// Restore to full health after death
    pub fn revive(&mut self) {
        self.hp = self.max_hp;
        self.stun_timer = 0;
    }

    /// Apply a partial stat update from a collaborator
    pub fn apply_patch(&mut self, patch: &FighterPatch) {
        if let Some(max_hp) = patch.max_hp {
            self.max_hp = max_hp.max(1);
            self.hp = self.hp.min(self.max_hp);
        }
        if let Some(atk) = patch.atk {
            self.atk = atk.max(0);
        }
        if let Some(def) = patch.def {
            self.def = def.max(0);
        }
        if let Some(level) = patch.level {
            self.level = level.max(1);
        }
        if let Some(pos_x) = patch.pos_x.filter(|x| x.is_finite()) {
            self.pos_x = pos_x;
        }
    }
}

/// Partial update for a fighter's stats
///
/// Fields left as `None` are untouched. Hit points are never raised by a
/// patch; lowering `max_hp` clamps current hp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterPatch {
    pub max_hp: Option<i64>,
    pub atk: Option<i64>,
    pub def: Option<i64>,
    pub level: Option<u32>,
    pub pos_x: Option<f64>,
}

impl FighterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_hp(mut self, value: i64) -> Self {
        self.max_hp = Some(value);
        self
    }

    pub fn atk(mut self, value: i64) -> Self {
        self.atk = Some(value);
        self
    }

    pub fn def(mut self, value: i64) -> Self {
        self.def = Some(value);
        self
    }

    pub fn level(mut self, value: u32) -> Self {
        self.level = Some(value);
        self
    }

    pub fn pos_x(mut self, value: f64) -> Self {
        self.pos_x = Some(value);
        self
    }
}
