//! Core identity types shared across the combat engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable integer identifier for a fighter
///
/// The player is always [`FighterId::PLAYER`]. Enemy ids are handed out
/// monotonically by the engine roster and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FighterId(pub u32);

impl FighterId {
    pub const PLAYER: FighterId = FighterId(0);
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for FighterId {
    fn from(id: u32) -> Self {
        FighterId(id)
    }
}

/// Team tag carried by every fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Player,
    Enemy,
}

/// A combatant tracked by the engine: the player, or one enemy
///
/// The derived ordering is the fixed tie-break used when impacts share a
/// timestamp: the player first, then enemies by ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy(FighterId),
}

impl Side {
    /// Build an enemy side from a raw id
    pub fn enemy(id: u32) -> Self {
        Side::Enemy(FighterId(id))
    }

    pub fn team(&self) -> Team {
        match self {
            Side::Player => Team::Player,
            Side::Enemy(_) => Team::Enemy,
        }
    }

    pub fn id(&self) -> FighterId {
        match self {
            Side::Player => FighterId::PLAYER,
            Side::Enemy(id) => *id,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Side::Player)
    }

    /// Whether two sides fight on opposing teams
    pub fn opposes(&self, other: Side) -> bool {
        self.team() != other.team()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy(id) => write!(f, "enemy{}", id),
        }
    }
}
