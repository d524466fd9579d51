//! CombatEngine - authoritative, tick-driven combat state
//!
//! The engine owns every fighter, the attack cadences and the impact queue.
//! Collaborators drive it with `tick(dt)` and the mutation calls; it reports
//! back only through its `EventSink`. Reads hand out copies.

mod actions;
mod cadence;
mod roster;
mod step;

#[cfg(test)]
mod tests;

pub use cadence::{AttackPhase, AwaitingAttack, Cadence};

use crate::config::{EncounterConfig, EngineConfig};
use crate::event::{CombatEvent, CombatEventKind, EventSink};
use crate::fighter::FighterState;
use crate::profile::AttackProfile;
use crate::schedule::{ImpactScheduler, PendingImpact};
use crate::time::{to_secs, Micros};
use crate::types::{FighterId, Side, Team};
use roster::{Combatant, Roster};

/// Deterministic combat simulation for one player against a roster of enemies
#[derive(Debug)]
pub struct CombatEngine<S: EventSink> {
    config: EngineConfig,
    /// Engine instant, microseconds since the encounter began
    clock: Micros,
    /// Sum of every accepted `dt`; the clock follows it rounded to the microsecond
    requested: f64,
    player: Combatant,
    enemies: Roster,
    scheduler: ImpactScheduler,
    sink: S,
    /// Times the stuck-await valve had to recover a side
    anomalies: u32,
}

impl<S: EventSink> CombatEngine<S> {
    /// Start an encounter with the given player and no enemies
    pub fn new(config: EngineConfig, player: FighterState, sink: S) -> Self {
        let mut player = player;
        player.id = FighterId::PLAYER;
        player.team = Team::Player;
        CombatEngine {
            config,
            clock: 0,
            requested: 0.0,
            player: Combatant::new(player, None),
            enemies: Roster::new(),
            scheduler: ImpactScheduler::new(),
            sink,
            anomalies: 0,
        }
    }

    /// Build an engine from an encounter description, spawning its enemies in order
    pub fn from_encounter(encounter: &EncounterConfig, sink: S) -> Self {
        let player = encounter.player.to_state(FighterId::PLAYER, Team::Player);
        let mut engine = CombatEngine::new(encounter.engine.clone(), player, sink);
        if let Some(profile) = encounter.player.profile {
            engine.player.profile = Some(profile.normalized());
        }
        for spec in &encounter.enemies {
            engine.spawn_enemy(spec);
        }
        engine
    }

    // === Queries ===

    /// Current engine time in seconds
    pub fn now(&self) -> f64 {
        to_secs(self.clock)
    }

    pub fn now_micros(&self) -> Micros {
        self.clock
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copy of the player's state
    pub fn player(&self) -> FighterState {
        self.player.state
    }

    /// Copy of any fighter's state, `None` for an unknown or despawned enemy
    pub fn fighter(&self, side: Side) -> Option<FighterState> {
        self.combatant(side).map(|c| c.state)
    }

    /// Copies of every enemy still in the roster, by ascending id
    pub fn enemies(&self) -> Vec<FighterState> {
        self.enemies.iter().map(|(_, c)| c.state).collect()
    }

    pub fn enemy_ids(&self) -> Vec<FighterId> {
        self.enemies.ids()
    }

    pub fn attack_phase(&self, side: Side) -> Option<AttackPhase> {
        self.combatant(side).map(|c| c.cadence.phase())
    }

    pub fn cadence(&self, side: Side) -> Option<Cadence> {
        self.combatant(side).map(|c| c.cadence)
    }

    /// Effective attack tuning for a side (explicit profile or engine default)
    pub fn profile(&self, side: Side) -> Option<AttackProfile> {
        self.combatant(side).map(|c| self.resolve_profile(side, c))
    }

    /// Impacts still waiting to resolve, in resolution order
    pub fn pending_impacts(&self) -> Vec<PendingImpact> {
        self.scheduler.snapshot()
    }

    pub fn anomaly_count(&self) -> u32 {
        self.anomalies
    }

    /// Player alive and at least one live enemy
    pub fn both_sides_alive(&self) -> bool {
        self.player.state.is_alive() && self.enemies.any_alive()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // === Internal helpers ===

    fn combatant(&self, side: Side) -> Option<&Combatant> {
        match side {
            Side::Player => Some(&self.player),
            Side::Enemy(id) => self.enemies.get(id),
        }
    }

    fn combatant_mut(&mut self, side: Side) -> Option<&mut Combatant> {
        match side {
            Side::Player => Some(&mut self.player),
            Side::Enemy(id) => self.enemies.get_mut(id),
        }
    }

    /// Live combatant for a side; dead or missing fighters yield `None`
    fn living_mut(&mut self, side: Side) -> Option<&mut Combatant> {
        self.combatant_mut(side).filter(|c| c.state.is_alive())
    }

    fn is_alive(&self, side: Side) -> bool {
        self.combatant(side).is_some_and(|c| c.state.is_alive())
    }

    fn resolve_profile(&self, side: Side, combatant: &Combatant) -> AttackProfile {
        combatant.profile.unwrap_or_else(|| match side {
            Side::Player => self.config.default_player_profile(),
            Side::Enemy(_) => self.config.default_enemy_profile(),
        })
    }

    fn profile_of(&self, side: Side) -> AttackProfile {
        match self.combatant(side) {
            Some(c) => self.resolve_profile(side, c),
            None => match side {
                Side::Player => self.config.default_player_profile(),
                Side::Enemy(_) => self.config.default_enemy_profile(),
            },
        }
    }

    /// Player first, then enemies by ascending id
    fn side_snapshot(&self) -> Vec<Side> {
        let mut sides = Vec::with_capacity(self.enemies.len() + 1);
        sides.push(Side::Player);
        sides.extend(self.enemies.ids().into_iter().map(Side::Enemy));
        sides
    }

    /// Who `side` would attack right now
    ///
    /// Enemies always go for the player. The player picks the nearest live
    /// enemy, lowest id on ties.
    fn current_target(&self, side: Side) -> Option<Side> {
        match side {
            Side::Enemy(_) => self.player.state.is_alive().then_some(Side::Player),
            Side::Player => {
                let origin = self.player.state.pos_x;
                self.enemies
                    .iter()
                    .filter(|(_, c)| c.state.is_alive())
                    .map(|(id, c)| (id, (c.state.pos_x - origin).abs()))
                    .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                    .map(|(id, _)| Side::Enemy(id))
            }
        }
    }

    fn distance(&self, a: Side, b: Side) -> Option<f64> {
        let a = self.combatant(a)?;
        let b = self.combatant(b)?;
        Some(a.state.distance_to(&b.state))
    }

    fn emit(&mut self, side: Side, kind: CombatEventKind) {
        let event = CombatEvent::new(to_secs(self.clock), side, kind);
        self.sink.emit(&event);
    }
}
