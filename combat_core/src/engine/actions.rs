//! Mutation calls available to collaborators
//!
//! Every call on a dead or unknown fighter is a silent no-op.

use super::roster::Combatant;
use super::CombatEngine;
use crate::config::FighterSpec;
use crate::damage::{compute_damage, scaled_damage};
use crate::dot::DotApplication;
use crate::event::{CombatEventKind, EventSink};
use crate::fighter::FighterPatch;
use crate::profile::AttackProfile;
use crate::schedule::PendingImpact;
use crate::time::{to_micros, to_secs};
use crate::types::{FighterId, Side, Team};
use tracing::{debug, info};

impl<S: EventSink> CombatEngine<S> {
    // === Roster ===

    /// Add an enemy to the encounter; ids are handed out in ascending order
    pub fn spawn_enemy(&mut self, spec: &FighterSpec) -> FighterId {
        let id = self.enemies.next_id();
        let state = spec.to_state(id, Team::Enemy);
        let id = self.enemies.insert(Combatant::new(state, spec.profile));
        info!(enemy = %id, name = %spec.name, hp = state.hp, pos_x = state.pos_x, "enemy spawned");
        id
    }

    /// Remove an enemy, dropping every impact it instigated or was targeted by
    pub fn despawn_enemy(&mut self, id: FighterId) -> bool {
        if self.enemies.remove(id).is_none() {
            return false;
        }
        let side = Side::Enemy(id);
        let dropped = self.scheduler.cancel_where(|impact| impact.involves(side));
        // Attacks aimed at it lost their windup impact along with it
        for other in self.side_snapshot() {
            if let Some(c) = self.combatant_mut(other) {
                if c.cadence.awaiting.is_some_and(|a| a.target == side) {
                    c.cadence.release();
                }
            }
        }
        info!(%side, dropped, "enemy despawned");
        true
    }

    /// Despawn every dead enemy, returning their ids
    pub fn clear_dead_enemies(&mut self) -> Vec<FighterId> {
        let dead: Vec<FighterId> = self
            .enemies
            .iter()
            .filter(|(_, c)| c.state.is_dead())
            .map(|(id, _)| id)
            .collect();
        for id in &dead {
            self.despawn_enemy(*id);
        }
        dead
    }

    // === Tuning and position ===

    /// Set attack tuning for a side; malformed values are clamped
    pub fn set_profile(&mut self, side: Side, profile: AttackProfile) -> bool {
        match self.combatant_mut(side) {
            Some(c) => {
                c.profile = Some(profile.normalized());
                true
            }
            None => false,
        }
    }

    /// Place a fighter on the lane
    pub fn set_position(&mut self, side: Side, pos_x: f64) -> bool {
        if !pos_x.is_finite() {
            return false;
        }
        match self.living_mut(side) {
            Some(c) => {
                c.state.pos_x = pos_x;
                true
            }
            None => false,
        }
    }

    /// Shift a fighter by `dx`. No bounds are applied.
    pub fn knockback(&mut self, side: Side, dx: f64) -> bool {
        if !dx.is_finite() {
            return false;
        }
        match self.living_mut(side) {
            Some(c) => {
                c.state.pos_x += dx;
                true
            }
            None => false,
        }
    }

    /// Apply a partial stat update from a collaborator (equipment, stat screens)
    pub fn apply_patch(&mut self, side: Side, patch: &FighterPatch) -> bool {
        match self.living_mut(side) {
            Some(c) => {
                c.state.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    // === Damage ===

    /// Deal raw damage with no attacker. Returns hp lost.
    pub fn apply_damage(&mut self, target: Side, amount: i64) -> i64 {
        self.deal_damage(target, amount, None).hp_lost
    }

    /// Ability hit scaled from the source's live attack
    ///
    /// Damage is `round(compute_damage(atk, def) × multiplier) + flat_bonus`,
    /// fixed now. With `eta_sec` under a microsecond it lands immediately,
    /// otherwise it is scheduled and lands verbatim. Returns the committed
    /// damage, 0 if nothing was done.
    pub fn apply_pure_damage(
        &mut self,
        source: Side,
        target: Side,
        multiplier: f64,
        flat_bonus: i64,
        eta_sec: f64,
    ) -> i64 {
        let (Some(src), Some(dst)) = (self.combatant(source), self.combatant(target)) else {
            return 0;
        };
        if src.state.is_dead() || dst.state.is_dead() {
            return 0;
        }

        let base = compute_damage(src.state.effective_atk(), dst.state.def);
        let damage = scaled_damage(base, multiplier, flat_bonus);
        if damage <= 0 {
            debug!(%source, %target, damage, "ability scaled to nothing");
            return 0;
        }

        let delay = to_micros(eta_sec);
        if delay == 0 {
            self.deal_damage(target, damage, Some(source));
        } else {
            let time = self.clock.saturating_add(delay);
            self.scheduler.schedule(PendingImpact::ability(source, target, time, damage));
            debug!(%source, %target, damage, eta = eta_sec, "ability scheduled");
        }
        damage
    }

    /// Schedule one override impact per DoT tick. Returns ticks scheduled.
    pub fn apply_damage_over_time(&mut self, source: Side, target: Side, dot: DotApplication) -> usize {
        if !dot.is_effective() || !self.is_alive(source) || !self.is_alive(target) {
            return 0;
        }
        let now = self.clock;
        for time in dot.tick_times(now) {
            self.scheduler
                .schedule(PendingImpact::damage_over_time(source, target, time, dot.damage_per_tick));
        }
        debug!(
            %source,
            %target,
            ticks = dot.tick_count,
            per_tick = dot.damage_per_tick,
            "damage over time applied"
        );
        dot.tick_count as usize
    }

    // === Support ===

    /// Restore hp up to max. Returns hp actually restored.
    pub fn heal(&mut self, side: Side, amount: i64) -> i64 {
        let restored = match self.living_mut(side) {
            Some(c) => c.state.heal(amount),
            None => return 0,
        };
        if restored > 0 {
            self.emit(side, CombatEventKind::Healed { amount: restored });
        }
        restored
    }

    pub fn add_shield(&mut self, side: Side, amount: i64) -> i64 {
        let added = match self.living_mut(side) {
            Some(c) => c.state.add_shield(amount),
            None => return 0,
        };
        if added > 0 {
            self.emit(side, CombatEventKind::ShieldAdded { amount: added });
        }
        added
    }

    /// Stun for `seconds` (an existing longer stun is kept)
    ///
    /// Cancels the side's in-flight attack and returns it to Idle.
    pub fn stun(&mut self, side: Side, seconds: f64) -> bool {
        let Some(c) = self.living_mut(side) else {
            return false;
        };
        if !c.state.stun(seconds) {
            return false;
        }
        let remaining = to_secs(c.state.stun_timer);
        c.cadence.release();
        let cancelled = self.scheduler.cancel_attacks(side);

        debug!(%side, seconds = remaining, cancelled, "stunned");
        self.emit(side, CombatEventKind::Stunned { seconds: remaining });
        if cancelled > 0 {
            self.emit(side, CombatEventKind::ImpactCancelled { count: cancelled });
        }
        true
    }

    /// Temporarily multiply a side's attack; replaces any active buff
    pub fn apply_attack_buff(&mut self, side: Side, multiplier: f64, seconds: f64) -> bool {
        match self.living_mut(side) {
            Some(c) => c.state.buff_attack(multiplier, seconds),
            None => false,
        }
    }

    // === Lifecycle ===

    /// Bring a dead fighter back at full hp
    ///
    /// Every side's cadence and stun is reset and all attack impacts are
    /// dropped so the fight restarts cleanly.
    pub fn respawn(&mut self, side: Side) -> bool {
        match self.combatant_mut(side) {
            Some(c) if c.state.is_dead() => c.state.revive(),
            _ => return false,
        }

        for other in self.side_snapshot() {
            if let Some(c) = self.combatant_mut(other) {
                c.cadence.reset();
                c.state.stun_timer = 0;
            }
        }
        let dropped = self.scheduler.cancel_where(|impact| impact.kind.is_attack());

        info!(%side, dropped, time = to_secs(self.clock), "respawned");
        self.emit(side, CombatEventKind::Respawned);
        true
    }

    /// Drop every impact a side instigated and return it to Idle
    pub fn cancel_pending_impacts(&mut self, side: Side) -> usize {
        let Some(c) = self.combatant_mut(side) else {
            return 0;
        };
        c.cadence.release();
        let count = self.scheduler.cancel(side);
        if count > 0 {
            self.emit(side, CombatEventKind::ImpactCancelled { count });
        }
        count
    }
}
