//! Time advancement and impact resolution
//!
//! A tick is cut into sub-steps at every instant where something happens
//! (a cadence fills, an impact is due, a timer runs out). Instants are whole
//! microseconds, so only their order matters, never the frame size.

use super::CombatEngine;
use crate::combat::{absorb_damage, Mitigation};
use crate::damage::compute_damage;
use crate::event::{CombatEventKind, EventSink};
use crate::schedule::{ImpactKind, PendingImpact};
use crate::time::{to_micros, to_secs, Micros};
use crate::types::Side;
use tracing::{debug, info, trace, warn};

impl<S: EventSink> CombatEngine<S> {
    /// Advance the simulation by `dt` seconds
    ///
    /// Non-finite or non-positive `dt` is ignored. The clock tracks the sum
    /// of every `dt` so far, so splitting the same total differently ends on
    /// the same microsecond.
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            debug!(dt, "ignoring tick with invalid dt");
            return;
        }

        // Mutations since the last tick take effect at the current instant
        self.settle();

        self.requested += dt;
        let end = to_micros(self.requested).max(self.clock);
        // Every boundary lies after the clock, so each pass makes progress
        while self.clock < end {
            let next = self.next_boundary(end);
            trace!(at = next, "sub-step");
            self.advance_to(next);
            self.settle();
        }
    }

    /// Earliest instant in `(clock, end]` where state can change
    fn next_boundary(&self, end: Micros) -> Micros {
        let now = self.clock;
        let mut candidates: Vec<Micros> = self.scheduler.next_due_time().into_iter().collect();

        // Cadences and timers are frozen unless both sides are alive
        if self.both_sides_alive() {
            for side in self.side_snapshot() {
                let Some(c) = self.combatant(side) else {
                    continue;
                };
                if c.state.is_dead() {
                    continue;
                }
                if let Some(remaining) = c.state.next_timer_expiry() {
                    candidates.push(now.saturating_add(remaining));
                }

                let profile = self.resolve_profile(side, c);
                match c.cadence.awaiting {
                    Some(awaiting) => {
                        let limit = profile.stuck_await_limit_micros(self.config.stuck_await_floor_sec);
                        candidates.push(awaiting.since.saturating_add(limit));
                    }
                    None => {
                        if let Some(wait) = c.cadence.time_to_ready(profile.period_micros()) {
                            candidates.push(now.saturating_add(wait));
                        }
                    }
                }
            }
        }

        candidates
            .into_iter()
            .filter(|t| *t > now)
            .fold(end, Micros::min)
    }

    /// Move the clock to `t`, accumulating cadences and decaying timers
    fn advance_to(&mut self, t: Micros) {
        if t <= self.clock {
            return;
        }
        let elapsed = t - self.clock;

        if self.both_sides_alive() {
            for side in self.side_snapshot() {
                let period = self.profile_of(side).period_micros();
                let Some(c) = self.combatant_mut(side) else {
                    continue;
                };
                if c.state.is_dead() {
                    continue;
                }
                c.cadence.advance(elapsed, period);
                let expiry = c.state.decay_timers(elapsed);
                if expiry.stun_ended {
                    trace!(%side, "stun ended");
                }
                if expiry.buff_ended {
                    trace!(%side, "attack buff ended");
                }
            }
        }
        self.clock = t;
    }

    /// Everything that happens at the current instant
    fn settle(&mut self) {
        if self.both_sides_alive() {
            self.start_ready_attacks();
        }
        self.release_stuck_attacks();
        self.resolve_due_impacts();
    }

    fn start_ready_attacks(&mut self) {
        for side in self.side_snapshot() {
            let profile = self.profile_of(side);
            let Some(c) = self.combatant(side) else {
                continue;
            };
            if c.state.is_dead() || c.state.is_stunned() || !c.cadence.is_ready(profile.period_micros()) {
                continue;
            }
            let Some(target) = self.current_target(side) else {
                continue;
            };
            let distance = self.distance(side, target).unwrap_or(f64::INFINITY);
            if distance > profile.reach {
                // Stays charged until something walks into reach
                trace!(%side, %target, distance, reach = profile.reach, "target out of reach");
                continue;
            }

            let time = self.clock.saturating_add(profile.windup_micros());
            let impact = self.scheduler.schedule(PendingImpact::windup(side, target, time));
            let now = self.clock;
            if let Some(c) = self.combatant_mut(side) {
                c.cadence.commit(target, now, impact);
            }
            debug!(%side, %target, windup = profile.windup, "attack started");
            self.emit(side, CombatEventKind::AttackStarted { target });
        }
    }

    /// Force back to Idle any side that has waited far longer than its windup
    fn release_stuck_attacks(&mut self) {
        for side in self.side_snapshot() {
            let profile = self.profile_of(side);
            let floor = self.config.stuck_await_floor_sec;
            let now = self.clock;
            let Some(c) = self.combatant_mut(side) else {
                continue;
            };
            let Some(awaiting) = c.cadence.awaiting else {
                continue;
            };
            let limit = profile.stuck_await_limit_micros(floor);
            let waited = now.saturating_sub(awaiting.since);
            if waited < limit {
                continue;
            }

            c.cadence.release();
            let count = self.scheduler.cancel_attacks(side);
            self.anomalies += 1;
            warn!(
                %side,
                waited = to_secs(waited),
                limit = to_secs(limit),
                "attack never resolved, forcing idle"
            );
            self.emit(side, CombatEventKind::ImpactCancelled { count });
        }
    }

    fn resolve_due_impacts(&mut self) {
        loop {
            let due = self.scheduler.drain_due(self.clock);
            if due.is_empty() {
                break;
            }
            for impact in due {
                self.resolve_impact(impact);
            }
        }
    }

    fn resolve_impact(&mut self, impact: PendingImpact) {
        // An earlier impact in the same batch may have killed the instigator
        if !self.is_alive(impact.instigator) {
            trace!(instigator = %impact.instigator, kind = ?impact.kind, "dropping impact from dead instigator");
            return;
        }

        match impact.kind {
            ImpactKind::Windup => self.resolve_windup(impact),
            ImpactKind::ProjectileArrival => self.strike(impact.instigator, impact.target),
            ImpactKind::Ability | ImpactKind::DamageOverTime => {
                if let Some(damage) = impact.damage_override {
                    self.deal_damage(impact.target, damage, Some(impact.instigator));
                }
            }
        }
    }

    fn resolve_windup(&mut self, impact: PendingImpact) {
        let attacker = impact.instigator;
        let target = impact.target;
        let profile = self.profile_of(attacker);
        if let Some(c) = self.combatant_mut(attacker) {
            c.cadence.release();
        }

        if !self.is_alive(target) {
            debug!(%attacker, %target, "attack whiffed, target gone");
            return;
        }

        if profile.is_projectile() {
            let distance = self.distance(attacker, target).unwrap_or(0.0);
            let flight = profile.flight_micros(distance);
            let eta = to_secs(flight);
            self.emit(attacker, CombatEventKind::AttackImpact { target, eta: Some(eta) });
            let arrival = self.clock.saturating_add(flight);
            self.scheduler
                .schedule(PendingImpact::projectile_arrival(attacker, target, arrival));
        } else {
            self.emit(attacker, CombatEventKind::AttackImpact { target, eta: None });
            self.strike(attacker, target);
        }
    }

    /// Cadence hit: damage is computed from live stats at landing time
    fn strike(&mut self, attacker: Side, target: Side) {
        let Some(atk) = self.combatant(attacker).map(|c| c.state.effective_atk()) else {
            return;
        };
        let Some(def) = self
            .combatant(target)
            .filter(|c| c.state.is_alive())
            .map(|c| c.state.def)
        else {
            debug!(%attacker, %target, "hit landed on a fighter that is gone");
            return;
        };
        let damage = compute_damage(atk, def);
        self.deal_damage(target, damage, Some(attacker));
    }

    /// Route damage through shield then hp, emitting the result
    pub(crate) fn deal_damage(&mut self, target: Side, amount: i64, source: Option<Side>) -> Mitigation {
        if amount <= 0 {
            return Mitigation::default();
        }
        let Some(c) = self.living_mut(target) else {
            return Mitigation::default();
        };
        let mitigation = absorb_damage(&mut c.state, amount);
        trace!(%target, detail = %mitigation.summary(), "damage applied");
        self.emit(
            target,
            CombatEventKind::DamageApplied {
                source,
                amount,
                absorbed: mitigation.absorbed,
                hp_lost: mitigation.hp_lost,
            },
        );
        if mitigation.is_killing_blow {
            self.on_death(target, source);
        }
        mitigation
    }

    fn on_death(&mut self, side: Side, killer: Option<Side>) {
        info!(%side, killer = ?killer, time = to_secs(self.clock), "unit died");
        self.emit(side, CombatEventKind::UnitDied);

        let cancelled = self.scheduler.cancel(side);
        if cancelled > 0 {
            debug!(%side, cancelled, "dropped impacts of dead fighter");
        }
        if let Some(c) = self.combatant_mut(side) {
            c.cadence.reset();
        }

        if let Side::Enemy(_) = side {
            let reward = self.config.xp_reward_on_kill;
            self.award_xp(reward);
        }
    }

    /// Grant player xp, applying every level-up it pays for
    fn award_xp(&mut self, amount: u64) {
        if amount == 0 || self.player.state.is_dead() {
            return;
        }
        self.player.state.xp = self.player.state.xp.saturating_add(amount);
        self.emit(Side::Player, CombatEventKind::XpGained { amount });

        let leveling = self.config.leveling.clone();
        loop {
            let needed = leveling.xp_to_next(self.player.state.level);
            let state = &mut self.player.state;
            if state.xp < needed {
                break;
            }
            state.xp -= needed;
            state.level += 1;
            state.max_hp = state.max_hp.saturating_add(leveling.hp_per_level).max(1);
            state.hp = state.hp.saturating_add(leveling.hp_per_level).clamp(1, state.max_hp);
            state.atk = state.atk.saturating_add(leveling.atk_per_level).max(0);
            state.def = state.def.saturating_add(leveling.def_per_level).max(0);
            let level = state.level;
            info!(level, "player leveled up");
            self.emit(Side::Player, CombatEventKind::LeveledUp { level });
        }
    }
}
