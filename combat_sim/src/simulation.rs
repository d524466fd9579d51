//! Headless encounter driver

use combat_core::{CombatEngine, CombatEvent, CombatEventKind, EncounterConfig, EventLog, Side};
use rand::Rng;
use serde::Serialize;

/// How the encounter is driven
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Seconds of engine time to simulate at most
    pub duration: f64,
    /// Nominal frame length
    pub frame_dt: f64,
    /// Relative frame jitter in `[0, 0.9]`; 0.1 means ±10%
    pub jitter: f64,
    /// Lane units per second enemies walk toward the player
    pub walk_speed: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            duration: 30.0,
            frame_dt: 1.0 / 60.0,
            jitter: 0.0,
            walk_speed: 1.0,
        }
    }
}

/// What happened over one encounter
#[derive(Debug, Clone, Default, Serialize)]
pub struct EncounterSummary {
    pub elapsed: f64,
    pub frames: u32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub hits_dealt: u32,
    pub kills: u32,
    pub deaths: u32,
    pub xp_gained: u64,
    pub final_level: u32,
    pub final_hp: i64,
    pub last_kill_time: Option<f64>,
    pub events: usize,
}

impl EncounterSummary {
    /// Fold one event into the totals
    pub fn record(&mut self, event: &CombatEvent) {
        self.events += 1;
        match event.kind {
            CombatEventKind::DamageApplied { absorbed, hp_lost, .. } => {
                let landed = absorbed + hp_lost;
                if event.side == Side::Player {
                    self.damage_taken += landed;
                } else {
                    self.damage_dealt += landed;
                    self.hits_dealt += 1;
                }
            }
            CombatEventKind::UnitDied => {
                if event.side == Side::Player {
                    self.deaths += 1;
                } else {
                    self.kills += 1;
                    self.last_kill_time = Some(event.time);
                }
            }
            CombatEventKind::XpGained { amount } => self.xp_gained += amount,
            _ => {}
        }
    }

    /// Player damage per second of simulated time
    pub fn dps(&self) -> f64 {
        if self.elapsed > 0.0 {
            self.damage_dealt as f64 / self.elapsed
        } else {
            0.0
        }
    }

    /// Average damage per landed player hit
    pub fn avg_damage(&self) -> f64 {
        if self.hits_dealt > 0 {
            self.damage_dealt as f64 / self.hits_dealt as f64
        } else {
            0.0
        }
    }
}

/// Run an encounter to completion or until `duration` runs out
///
/// Every event is passed to `on_event` as it is drained from the engine.
pub fn run_encounter<R, F>(
    encounter: &EncounterConfig,
    options: &RunOptions,
    rng: &mut R,
    mut on_event: F,
) -> EncounterSummary
where
    R: Rng,
    F: FnMut(&CombatEvent),
{
    let mut engine = CombatEngine::from_encounter(encounter, EventLog::new());
    let mut summary = EncounterSummary::default();
    let jitter = options.jitter.clamp(0.0, 0.9);

    while engine.now() < options.duration && engine.both_sides_alive() {
        let scale = if jitter > 0.0 {
            1.0 + rng.gen_range(-jitter..=jitter)
        } else {
            1.0
        };
        let dt = (options.frame_dt * scale).min(options.duration - engine.now());

        walk_enemies(&mut engine, options.walk_speed * dt);
        engine.tick(dt);
        summary.frames += 1;

        for event in engine.sink_mut().drain() {
            summary.record(&event);
            on_event(&event);
        }
    }

    let player = engine.player();
    summary.elapsed = engine.now();
    summary.final_level = player.level;
    summary.final_hp = player.hp;
    summary
}

/// Fraction of its reach an enemy closes to before it stops walking
const STOP_INSIDE_REACH: f64 = 0.9;

/// Close the gap to the player until each enemy is within its own reach
fn walk_enemies(engine: &mut CombatEngine<EventLog>, step: f64) {
    if step <= 0.0 {
        return;
    }
    let player_x = engine.player().pos_x;
    for enemy in engine.enemies() {
        let side = enemy.side();
        if enemy.is_dead() {
            continue;
        }
        let reach = engine.profile(side).map(|p| p.reach).unwrap_or(0.0);
        let gap = (enemy.pos_x - player_x).abs() - reach * STOP_INSIDE_REACH;
        if gap <= 0.0 {
            continue;
        }
        let dx = step.min(gap) * (player_x - enemy.pos_x).signum();
        engine.knockback(side, dx);
    }
}
