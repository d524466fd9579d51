use super::*;
use crate::config::{FighterSpec, LevelingConfig};
use crate::dot::DotApplication;
use crate::event::{EventLog, NullSink};
use crate::fighter::FighterPatch;
use crate::schedule::ImpactKind;
use proptest::prelude::*;

fn engine_with(player: FighterState, enemies: &[FighterSpec]) -> CombatEngine<EventLog> {
    engine_with_config(EngineConfig::default(), player, enemies)
}

fn engine_with_config(
    config: EngineConfig,
    player: FighterState,
    enemies: &[FighterSpec],
) -> CombatEngine<EventLog> {
    let mut engine = CombatEngine::new(config, player, EventLog::new());
    for spec in enemies {
        engine.spawn_enemy(spec);
    }
    engine
}

fn named(engine: &CombatEngine<EventLog>, name: &str) -> Vec<CombatEvent> {
    engine
        .sink()
        .events()
        .iter()
        .filter(|e| e.name() == name)
        .copied()
        .collect()
}

const E1: Side = Side::Enemy(FighterId(1));

#[test]
fn test_first_player_hit_lands_at_one_second() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    engine.tick(1.0);

    let names = engine.sink().names();
    assert_eq!(names, vec!["AttackStarted", "AttackImpact", "DamageApplied"]);

    let hit = named(&engine, "DamageApplied")[0];
    assert_eq!(hit.side, E1);
    assert_eq!(hit.amount(), Some(8));
    assert!((hit.time - 1.0).abs() < 1e-9);
    assert_eq!(engine.fighter(E1).unwrap().hp, 22);
}

#[test]
fn test_duel_runs_to_kill_and_awards_xp() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    for _ in 0..4 {
        engine.tick(1.0);
    }

    let enemy = engine.fighter(E1).unwrap();
    assert!(enemy.is_dead());
    // Enemy swung at 1.2, 2.4 and 3.6 for 6 each
    assert_eq!(engine.player().hp, 82);
    assert_eq!(engine.player().xp, 10);

    let names = engine.sink().names();
    let died = names.iter().position(|n| *n == "UnitDied").unwrap();
    assert_eq!(names[died + 1], "XpGained");
    assert_eq!(engine.sink().events()[died + 1].side, Side::Player);

    // Nothing moves once one side is wiped out
    let before = engine.sink().len();
    engine.tick(5.0);
    assert_eq!(engine.sink().len(), before);
}

#[test]
fn test_stun_cancels_windup_and_blocks_attacks() {
    let mut engine = engine_with(
        FighterState::player(100, 10, 0),
        &[FighterSpec::new(50, 6, 0)
            .at(1.0)
            .with_profile(AttackProfile::melee(1.0, 0.5, 1.5))],
    );
    engine.set_profile(Side::Player, AttackProfile::melee(1.0, 0.0, 0.5));

    engine.tick(1.25);
    assert_eq!(engine.attack_phase(E1), Some(AttackPhase::AwaitingImpact));

    assert!(engine.stun(E1, 2.0));
    assert_eq!(engine.attack_phase(E1), Some(AttackPhase::Idle));
    assert!(engine.pending_impacts().is_empty());
    let tail: Vec<&str> = engine.sink().names().into_iter().rev().take(2).collect();
    assert_eq!(tail, vec!["ImpactCancelled", "Stunned"]);

    for _ in 0..8 {
        engine.tick(0.25);
    }

    assert!(named(&engine, "DamageApplied").is_empty());
    let starts: Vec<CombatEvent> = named(&engine, "AttackStarted")
        .into_iter()
        .filter(|e| e.side == E1 && e.time > 1.25)
        .collect();
    // Charged during the stun, fires the instant it ends
    assert_eq!(starts.len(), 1);
    assert!((starts[0].time - 3.25).abs() < 1e-9);
}

#[test]
fn test_projectile_eta_and_arrival() {
    let mut engine = engine_with(
        FighterState::player(100, 10, 0),
        &[FighterSpec::new(50, 6, 0)
            .at(10.0)
            .with_profile(AttackProfile::projectile(1.0, 0.0, 20.0, 5.0))],
    );
    engine.set_profile(Side::Player, AttackProfile::melee(1.0, 0.0, 0.5));

    engine.tick(1.0);
    let impact = named(&engine, "AttackImpact")[0];
    assert_eq!(impact.side, E1);
    assert_eq!(impact.eta(), Some(2.0));
    assert!(named(&engine, "DamageApplied").is_empty());
    assert!(engine
        .pending_impacts()
        .iter()
        .any(|i| i.kind == ImpactKind::ProjectileArrival && i.time == 3_000_000));

    engine.tick(1.0);
    assert!(named(&engine, "DamageApplied").is_empty());

    engine.tick(1.0);
    let hits = named(&engine, "DamageApplied");
    assert_eq!(hits.len(), 1);
    assert!((hits[0].time - 3.0).abs() < 1e-9);
    assert_eq!(engine.player().hp, 94);
}

#[test]
fn test_out_of_reach_stays_charged_then_fires() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    engine.tick(3.0);
    assert!(named(&engine, "AttackStarted").is_empty());
    let cadence = engine.cadence(Side::Player).unwrap();
    assert_eq!(cadence.accumulator, 1_000_000);

    assert!(engine.set_position(E1, 1.0));
    engine.tick(0.1);

    let starts = named(&engine, "AttackStarted");
    // Both were charged; they swing the moment they are in reach
    assert_eq!(starts.len(), 2);
    assert_eq!(starts[0].side, Side::Player);
    assert!(starts.iter().all(|e| (e.time - 3.0).abs() < 1e-9));
}

#[test]
fn test_player_targets_nearest_enemy() {
    let mut engine = engine_with(
        FighterState::player(100, 10, 0),
        &[
            FighterSpec::new(30, 1, 0).at(1.4),
            FighterSpec::new(30, 1, 0).at(-0.5),
            FighterSpec::new(30, 1, 0).at(0.5),
        ],
    );

    engine.tick(1.0);
    let start = named(&engine, "AttackStarted")
        .into_iter()
        .find(|e| e.side == Side::Player)
        .unwrap();
    // 0.5 away on both sides: lowest id wins
    assert_eq!(start.kind, CombatEventKind::AttackStarted { target: Side::enemy(2) });
}

#[test]
fn test_invalid_dt_is_ignored() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    for dt in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        engine.tick(dt);
    }
    assert_eq!(engine.now(), 0.0);
    assert!(engine.sink().is_empty());
    assert_eq!(engine.cadence(Side::Player).unwrap().accumulator, 0);
}

#[test]
fn test_mutators_on_dead_fighter_do_nothing() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    assert_eq!(engine.apply_damage(E1, 1000), 30);
    assert_eq!(engine.sink().names(), vec!["DamageApplied", "UnitDied", "XpGained"]);
    let snapshot = engine.fighter(E1).unwrap();
    let events = engine.sink().len();

    assert_eq!(engine.heal(E1, 10), 0);
    assert_eq!(engine.add_shield(E1, 10), 0);
    assert!(!engine.stun(E1, 1.0));
    assert!(!engine.knockback(E1, 2.0));
    assert!(!engine.set_position(E1, 0.0));
    assert!(!engine.apply_attack_buff(E1, 2.0, 5.0));
    assert!(!engine.apply_patch(E1, &FighterPatch::new().atk(99)));
    assert_eq!(engine.apply_damage(E1, 5), 0);
    assert_eq!(engine.apply_pure_damage(Side::Player, E1, 2.0, 5, 0.0), 0);
    assert_eq!(engine.apply_pure_damage(E1, Side::Player, 2.0, 5, 0.0), 0);
    assert_eq!(
        engine.apply_damage_over_time(Side::Player, E1, DotApplication::new(5, 1.0, 3)),
        0
    );

    assert_eq!(engine.fighter(E1).unwrap(), snapshot);
    assert_eq!(engine.sink().len(), events);
}

#[test]
fn test_unknown_enemy_is_ignored() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[]);
    let ghost = Side::enemy(42);

    assert!(engine.fighter(ghost).is_none());
    assert_eq!(engine.apply_damage(ghost, 10), 0);
    assert_eq!(engine.heal(ghost, 10), 0);
    assert!(!engine.stun(ghost, 1.0));
    assert!(!engine.respawn(ghost));
    assert!(!engine.despawn_enemy(FighterId(42)));
    assert!(engine.sink().is_empty());
}

#[test]
fn test_shield_absorbs_before_health() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    assert_eq!(engine.add_shield(E1, 5), 5);
    assert_eq!(engine.apply_damage(E1, 8), 3);

    let enemy = engine.fighter(E1).unwrap();
    assert_eq!(enemy.shield, 0);
    assert_eq!(enemy.hp, 27);
    let hit = named(&engine, "DamageApplied")[0];
    assert_eq!(
        hit.kind,
        CombatEventKind::DamageApplied {
            source: None,
            amount: 8,
            absorbed: 5,
            hp_lost: 3
        }
    );
}

#[test]
fn test_heal_caps_and_skips_full_health() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[]);

    assert_eq!(engine.heal(Side::Player, 10), 0);
    assert!(engine.sink().is_empty());

    engine.apply_damage(Side::Player, 15);
    assert_eq!(engine.heal(Side::Player, 50), 15);
    assert_eq!(engine.player().hp, 100);
    assert_eq!(named(&engine, "Healed")[0].amount(), Some(15));
    assert_eq!(engine.heal(Side::Player, -5), 0);
    assert_eq!(engine.apply_damage(Side::Player, -5), 0);
    assert_eq!(engine.player().hp, 100);
}

#[test]
fn test_pure_damage_immediate_and_scheduled() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(100, 6, 2).at(5.0)]);

    // (10 - 2) × 1.5 + 3
    assert_eq!(engine.apply_pure_damage(Side::Player, E1, 1.5, 3, 0.0), 15);
    assert_eq!(engine.fighter(E1).unwrap().hp, 85);

    assert_eq!(engine.apply_pure_damage(Side::Player, E1, 1.0, 0, 0.5), 8);
    assert_eq!(engine.fighter(E1).unwrap().hp, 85);
    let pending = engine.pending_impacts();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].kind, ImpactKind::Ability);

    // Damage was fixed when scheduled
    engine.apply_attack_buff(Side::Player, 3.0, 10.0);
    engine.tick(0.5);
    assert_eq!(engine.fighter(E1).unwrap().hp, 77);
    let hit = named(&engine, "DamageApplied")[1];
    assert_eq!(hit.amount(), Some(8));
    assert!((hit.time - 0.5).abs() < 1e-9);
}

#[test]
fn test_pure_damage_scaled_to_nothing_is_noop() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(100, 6, 2).at(5.0)]);

    assert_eq!(engine.apply_pure_damage(Side::Player, E1, 0.0, 0, 0.0), 0);
    assert_eq!(engine.apply_pure_damage(Side::Player, E1, 1.0, -20, 1.0), 0);
    assert!(engine.sink().is_empty());
    assert!(engine.pending_impacts().is_empty());
}

#[test]
fn test_attack_buff_scales_hits_until_expiry() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(100, 1, 2).at(1.0)]);

    assert!(engine.apply_attack_buff(Side::Player, 2.0, 1.5));
    engine.tick(2.0);

    let hits: Vec<i64> = named(&engine, "DamageApplied")
        .iter()
        .filter(|e| e.side == E1)
        .filter_map(|e| e.amount())
        .collect();
    assert_eq!(hits, vec![18, 8]);
    assert!(!engine.player().has_attack_buff());
}

#[test]
fn test_damage_over_time_ticks() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    assert_eq!(
        engine.apply_damage_over_time(Side::Player, E1, DotApplication::new(3, 0.5, 4)),
        4
    );
    engine.tick(2.0);

    let ticks = named(&engine, "DamageApplied");
    assert_eq!(ticks.len(), 4);
    assert!(ticks
        .iter()
        .all(|e| matches!(e.kind, CombatEventKind::DamageApplied { source: Some(Side::Player), amount: 3, .. })));
    assert!((ticks[0].time - 0.5).abs() < 1e-9);
    assert!((ticks[3].time - 2.0).abs() < 1e-9);
    assert_eq!(engine.fighter(E1).unwrap().hp, 18);
}

#[test]
fn test_death_cancels_instigated_impacts() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    engine.apply_damage_over_time(E1, Side::Player, DotApplication::new(2, 1.0, 5));
    engine.tick(1.5);
    assert_eq!(engine.player().hp, 98);

    engine.apply_damage(E1, 1000);
    assert_eq!(engine.pending_impacts().len(), 0);
    engine.tick(5.0);
    assert_eq!(engine.player().hp, 98);
}

#[test]
fn test_level_up_on_kill() {
    let config = EngineConfig {
        xp_reward_on_kill: 350,
        leveling: LevelingConfig::default(),
        ..Default::default()
    };
    let mut engine = engine_with_config(config, FighterState::player(100, 10, 1), &[FighterSpec::new(10, 1, 0).at(5.0)]);

    engine.apply_damage(E1, 10);

    let names = engine.sink().names();
    assert_eq!(names, vec!["DamageApplied", "UnitDied", "XpGained", "LeveledUp", "LeveledUp"]);
    let player = engine.player();
    // 100 to reach level 2, 200 more for level 3
    assert_eq!(player.level, 3);
    assert_eq!(player.xp, 50);
    assert_eq!(player.max_hp, 120);
    assert_eq!(player.atk, 14);
    assert_eq!(player.def, 3);
    let last = engine.sink().events().last().unwrap();
    assert_eq!(last.kind, CombatEventKind::LeveledUp { level: 3 });
}

#[test]
fn test_player_death_gives_no_xp() {
    let mut engine = engine_with(FighterState::player(20, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    engine.apply_damage(Side::Player, 50);
    assert_eq!(engine.sink().names(), vec!["DamageApplied", "UnitDied"]);
    assert_eq!(engine.fighter(E1).unwrap().xp, 0);
}

#[test]
fn test_respawn_only_when_dead() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    assert!(!engine.respawn(Side::Player));
    engine.tick(1.5);

    engine.apply_damage(Side::Player, 1000);
    assert!(engine.player().is_dead());
    assert!(engine.respawn(Side::Player));

    let player = engine.player();
    assert_eq!(player.hp, player.max_hp);
    assert_eq!(engine.sink().names().last(), Some(&"Respawned"));
    for side in [Side::Player, E1] {
        let cadence = engine.cadence(side).unwrap();
        assert_eq!(cadence.phase(), AttackPhase::Idle);
        assert_eq!(cadence.accumulator, 0);
    }
    assert!(engine.pending_impacts().iter().all(|i| !i.kind.is_attack()));

    // Fight resumes from a clean cadence
    engine.tick(1.0);
    assert!(named(&engine, "AttackStarted")
        .iter()
        .any(|e| e.side == Side::Player && (e.time - 2.5).abs() < 1e-9));
}

#[test]
fn test_despawn_drops_impacts_and_releases_attackers() {
    let mut engine = engine_with(
        FighterState::player(100, 10, 0),
        &[FighterSpec::new(30, 6, 2).at(1.0), FighterSpec::new(30, 6, 2).at(1.2)],
    );
    engine.set_profile(Side::Player, AttackProfile::melee(1.0, 0.5, 1.5));

    engine.tick(1.25);
    assert_eq!(engine.attack_phase(Side::Player), Some(AttackPhase::AwaitingImpact));

    assert!(engine.despawn_enemy(FighterId(1)));
    assert_eq!(engine.attack_phase(Side::Player), Some(AttackPhase::Idle));
    assert!(engine.pending_impacts().iter().all(|i| !i.involves(E1)));
    assert_eq!(engine.enemy_ids(), vec![FighterId(2)]);

    let id = engine.spawn_enemy(&FighterSpec::new(10, 1, 0));
    assert_eq!(id, FighterId(3));
}

#[test]
fn test_clear_dead_enemies() {
    let mut engine = engine_with(
        FighterState::player(100, 10, 0),
        &[FighterSpec::new(10, 1, 0).at(5.0), FighterSpec::new(10, 1, 0).at(6.0)],
    );
    engine.apply_damage(Side::enemy(2), 100);

    assert_eq!(engine.clear_dead_enemies(), vec![FighterId(2)]);
    assert_eq!(engine.enemies().len(), 1);
    assert!(engine.fighter(Side::enemy(2)).is_none());
}

#[test]
fn test_knockback_moves_out_of_reach() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    assert!(engine.knockback(E1, 4.0));
    assert!((engine.fighter(E1).unwrap().pos_x - 5.0).abs() < f64::EPSILON);
    assert!(!engine.knockback(E1, f64::NAN));

    engine.tick(3.0);
    assert!(named(&engine, "AttackStarted").is_empty());
}

#[test]
fn test_cancel_pending_impacts() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(5.0)]);

    engine.apply_damage_over_time(Side::Player, E1, DotApplication::new(1, 1.0, 3));
    assert_eq!(engine.cancel_pending_impacts(Side::Player), 3);
    assert_eq!(
        engine.sink().events().last().unwrap().kind,
        CombatEventKind::ImpactCancelled { count: 3 }
    );
    assert_eq!(engine.cancel_pending_impacts(Side::Player), 0);
}

#[test]
fn test_stuck_attack_is_released() {
    let mut engine = engine_with(
        FighterState::player(100, 10, 0),
        &[FighterSpec::new(50, 6, 0)
            .at(1.0)
            .with_profile(AttackProfile::melee(1.0, 0.5, 1.5))],
    );
    engine.set_profile(Side::Player, AttackProfile::melee(1.0, 0.0, 0.5));

    engine.tick(1.25);
    assert_eq!(engine.attack_phase(E1), Some(AttackPhase::AwaitingImpact));

    // Lose the windup impact behind the engine's back
    engine.scheduler.clear();
    engine.tick(10.0);

    assert_eq!(engine.anomaly_count(), 1);
    assert_eq!(engine.attack_phase(E1), Some(AttackPhase::Idle));
    let cancelled = named(&engine, "ImpactCancelled");
    assert_eq!(cancelled.len(), 1);
    assert!((cancelled[0].time - 11.0).abs() < 1e-9);
}

#[test]
fn test_long_tick_matches_short_ticks() {
    let build = || {
        let player = FighterState::player(1_000_000, 10, 0);
        let mut engine = CombatEngine::new(EngineConfig::default(), player, NullSink);
        engine.spawn_enemy(&FighterSpec::new(1_000_000, 1, 0).at(1.0));
        engine.set_profile(Side::Player, AttackProfile::melee(0.01, 0.0, 1.5));
        engine
    };

    let mut long = build();
    long.tick(200.0);
    let mut short = build();
    for _ in 0..200 {
        short.tick(1.0);
    }

    // One hit every 10ms for 200s, none lost inside the long frame
    assert_eq!(long.enemies()[0].hp, 800_000);
    assert_eq!(long.enemies(), short.enemies());
    assert_eq!(long.player(), short.player());
    assert_eq!(long.now_micros(), 200_000_000);
}

#[test]
fn test_sixty_fps_matches_single_tick() {
    let race = || {
        let mut engine = engine_with(
            FighterState::player(60, 10, 0),
            &[FighterSpec::new(60, 10, 0)
                .at(1.0)
                .with_profile(AttackProfile::melee(0.6, 0.0, 5.0))],
        );
        engine.set_profile(Side::Player, AttackProfile::melee(0.3, 0.1, 5.0));
        engine
    };

    let mut sixty = race();
    for _ in 0..720 {
        sixty.tick(1.0 / 60.0);
    }
    let mut tenths = race();
    for _ in 0..120 {
        tenths.tick(0.1);
    }
    let mut single = race();
    single.tick(12.0);

    assert_eq!(trace(&sixty), trace(&single));
    assert_eq!(trace(&tenths), trace(&single));
    assert_eq!(sixty.player(), single.player());
    assert_eq!(sixty.enemies(), single.enemies());
    assert_eq!(sixty.now_micros(), 12_000_000);
    assert_eq!(single.now_micros(), 12_000_000);
}

#[test]
fn test_sub_microsecond_frames_accumulate() {
    let mut engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    for _ in 0..4 {
        engine.tick(2.5e-7);
    }
    assert_eq!(engine.now_micros(), 1);
}

#[test]
fn test_from_encounter() {
    let engine = CombatEngine::from_encounter(&crate::config::default_encounter(), EventLog::new());

    assert_eq!(engine.enemy_ids(), vec![FighterId(1), FighterId(2)]);
    let archer = engine.profile(Side::enemy(2)).unwrap();
    assert!(archer.is_projectile());
    let player = engine.profile(Side::Player).unwrap();
    assert!((player.windup - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_default_profile_applies_without_tuning() {
    let engine = engine_with(FighterState::player(100, 10, 0), &[FighterSpec::new(30, 6, 2).at(1.0)]);

    let enemy = engine.profile(E1).unwrap();
    assert!((enemy.period - 1.2).abs() < f64::EPSILON);
    assert!((enemy.reach - 1.5).abs() < f64::EPSILON);
}

/// Brawl with windups, a projectile and a DoT on non-dyadic timings
fn brawl() -> CombatEngine<EventLog> {
    let mut engine = engine_with(
        FighterState::player(200, 9, 1),
        &[
            FighterSpec::new(40, 5, 2)
                .at(1.0)
                .with_profile(AttackProfile::melee(0.3, 0.1, 1.5)),
            FighterSpec::new(25, 4, 0)
                .at(8.0)
                .with_profile(AttackProfile::projectile(0.9, 0.2, 10.0, 3.0)),
        ],
    );
    engine.set_profile(Side::Player, AttackProfile::melee(0.7, 0.1, 1.5));
    engine.apply_damage_over_time(Side::Player, Side::enemy(2), DotApplication::new(1, 0.1, 30));
    engine
}

type Trace = Vec<(&'static str, Side, Option<i64>, f64)>;

fn trace(engine: &CombatEngine<EventLog>) -> Trace {
    engine
        .sink()
        .events()
        .iter()
        .map(|e| (e.name(), e.side, e.amount(), e.time))
        .collect()
}

proptest! {
    #[test]
    fn prop_frame_rate_independent(
        frames in proptest::collection::vec(
            prop::sample::select(vec![1.0 / 60.0, 1.0 / 30.0, 0.1, 1.0 / 64.0, 0.25, 0.7]),
            1..120,
        )
    ) {
        let mut chunked = brawl();
        for dt in &frames {
            chunked.tick(*dt);
        }
        let total: f64 = frames.iter().sum();
        let mut single = brawl();
        single.tick(total);

        prop_assert_eq!(trace(&chunked), trace(&single));
        prop_assert_eq!(chunked.player(), single.player());
        prop_assert_eq!(chunked.enemies(), single.enemies());
        prop_assert_eq!(chunked.now_micros(), single.now_micros());
    }

    #[test]
    fn prop_sixty_fps_duel_matches_single_tick(
        player_period in prop::sample::select(vec![0.3, 0.45, 0.6, 0.7, 0.9, 1.2]),
        player_windup in prop::sample::select(vec![0.0, 0.1, 0.2, 0.3]),
        enemy_period in prop::sample::select(vec![0.3, 0.45, 0.6, 0.7, 0.9, 1.2]),
        enemy_windup in prop::sample::select(vec![0.0, 0.1, 0.2, 0.3]),
    ) {
        let duel = || {
            let mut engine = CombatEngine::new(EngineConfig::default(), FighterState::player(60, 10, 0), EventLog::new());
            engine.spawn_enemy(
                &FighterSpec::new(60, 10, 0)
                    .at(1.0)
                    .with_profile(AttackProfile::melee(enemy_period, enemy_windup, 5.0)),
            );
            engine.set_profile(Side::Player, AttackProfile::melee(player_period, player_windup, 5.0));
            engine
        };

        let mut sixty = duel();
        for _ in 0..720 {
            sixty.tick(1.0 / 60.0);
        }
        let mut single = duel();
        single.tick(12.0);

        prop_assert_eq!(trace(&sixty), trace(&single));
        prop_assert_eq!(sixty.player(), single.player());
        prop_assert_eq!(sixty.enemies(), single.enemies());
    }

    #[test]
    fn prop_valve_never_fires_for_sane_profiles(
        player_period in 0.1f64..3.0,
        player_windup in 0.0f64..2.0,
        enemy_period in 0.1f64..3.0,
        enemy_windup in 0.0f64..2.0,
        speed in prop_oneof![Just(0.0f64), 1.0f64..20.0],
        steps in proptest::collection::vec(0.001f64..0.5, 1..200),
    ) {
        let mut engine = CombatEngine::new(EngineConfig::default(), FighterState::player(500, 8, 1), NullSink);
        engine.spawn_enemy(
            &FighterSpec::new(400, 6, 1)
                .at(1.0)
                .with_profile(AttackProfile::projectile(enemy_period, enemy_windup, 3.0, speed)),
        );
        engine.set_profile(Side::Player, AttackProfile::melee(player_period, player_windup, 1.5));

        for dt in steps {
            engine.tick(dt);
        }
        prop_assert_eq!(engine.anomaly_count(), 0);
        prop_assert!(engine.player().hp >= 0);
        prop_assert!(engine.player().hp <= engine.player().max_hp);
    }
}
