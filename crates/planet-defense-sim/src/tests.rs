//! Tests for the simulation engine: session flow, firing, blast resolution,
//! silo losses and determinism.

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use planet_defense_core::commands::PlayerCommand;
use planet_defense_core::constants::*;
use planet_defense_core::enums::*;
use planet_defense_core::events::GameEvent;
use planet_defense_core::math::point_on_circle;
use planet_defense_core::missile::{EnemyMissile, MirvPayload};
use planet_defense_core::upgrades::UpgradeId;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::spawn_validator::{generate_spawn_point, generate_target_point};

const BLAST_POINT: Vec2 = Vec2::new(600.0, 300.0);

fn started(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.start_game();
    engine.drain_events();
    engine
}

fn run_for(engine: &mut SimulationEngine, secs: f32) {
    let ticks = (secs * TICK_RATE as f32).round() as u32;
    for _ in 0..ticks {
        engine.tick(DT);
    }
}

/// A missile that never moves, for blast tests.
fn parked(engine: &mut SimulationEngine, at: Vec2) {
    let target = engine.planet().center;
    engine.spawn_enemy(EnemyMissile::plain(at, target, 0.0));
}

/// Play the current wave to the end without shooting, rebuilding any silo
/// lost along the way so the run cannot end early.
fn play_out_wave(engine: &mut SimulationEngine) {
    for _ in 0..(120 * TICK_RATE) {
        if engine.phase() != GamePhase::Playing {
            return;
        }
        engine.tick(DT);
        for i in 0..INITIAL_SILO_COUNT {
            if let Some(silo) = engine.silos_mut().get_mut(i) {
                if silo.is_destroyed() {
                    silo.repair(SILO_RELOAD_TIME);
                }
            }
        }
    }
}

// ---- Session flow ----

#[test]
fn test_start_game_begins_wave_one() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), GamePhase::Menu);

    engine.queue_command(PlayerCommand::StartGame);
    engine.tick(DT);

    assert_eq!(engine.phase(), GamePhase::Playing);
    assert!(engine.wave_active());
    assert_eq!(engine.session().current_wave, 1);
    let events = engine.drain_events();
    assert_eq!(events[0], GameEvent::GameStarted);
    assert_eq!(
        events[1],
        GameEvent::WaveStarted {
            wave: 1,
            enemy_count: INITIAL_ENEMY_COUNT,
        }
    );
}

#[test]
fn test_start_game_ignored_mid_wave() {
    let mut engine = started(SimConfig::default());
    engine.session_mut().score = 700;
    engine.start_game();
    assert_eq!(engine.session().score, 700);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_systems_idle_outside_play() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    run_for(&mut engine, 1.0);
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.planet().rotation, 0.0);
}

#[test]
fn test_pause_and_resume() {
    let mut engine = started(SimConfig::default());
    run_for(&mut engine, 0.5);
    let ticks = engine.time().tick;

    engine.queue_command(PlayerCommand::Pause);
    engine.tick(DT);
    assert_eq!(engine.phase(), GamePhase::Paused);
    run_for(&mut engine, 1.0);
    assert_eq!(engine.time().tick, ticks);
    assert_eq!(engine.fire(BLAST_POINT), Err(ShotRejection::NotPlaying));

    engine.queue_command(PlayerCommand::Resume);
    engine.tick(DT);
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(engine.time().tick, ticks + 1);

    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::Paused));
    assert!(events.contains(&GameEvent::Resumed));
}

// ---- Firing ----

#[test]
fn test_fire_rejected_before_game() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.fire(BLAST_POINT), Err(ShotRejection::NotPlaying));
    assert_eq!(
        engine.drain_events(),
        vec![GameEvent::ShotRejected {
            reason: ShotRejection::NotPlaying
        }]
    );
}

#[test]
fn test_fire_rejected_inside_planet() {
    let mut engine = started(SimConfig::default());
    let center = engine.planet().center;
    assert_eq!(engine.fire(center), Err(ShotRejection::InsidePlanet));
    assert_eq!(engine.session().shots_fired, 0);
}

#[test]
fn test_fire_uses_nearest_ready_silo_until_all_reload() {
    let mut engine = started(SimConfig::default());

    assert_eq!(engine.fire(BLAST_POINT), Ok(0));
    let mut used = vec![0];
    for _ in 1..INITIAL_SILO_COUNT {
        let silo = engine.fire(BLAST_POINT).expect("a silo should still be ready");
        assert!(!used.contains(&silo));
        used.push(silo);
    }
    assert_eq!(engine.fire(BLAST_POINT), Err(ShotRejection::NoSiloReady));
    assert_eq!(engine.session().shots_fired, INITIAL_SILO_COUNT as u32);

    let launched = engine
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::InterceptorLaunched { .. }))
        .count();
    assert_eq!(launched, INITIAL_SILO_COUNT);
    assert_eq!(engine.snapshot().interceptors.len(), INITIAL_SILO_COUNT);
}

#[test]
fn test_silo_reloads_after_firing() {
    let mut engine = started(SimConfig::default());
    engine.fire(BLAST_POINT).unwrap();
    assert_eq!(engine.silos().ready_count(), INITIAL_SILO_COUNT - 1);

    run_for(&mut engine, SILO_RELOAD_TIME + 0.1);
    assert_eq!(engine.silos().ready_count(), INITIAL_SILO_COUNT);
    assert!(engine
        .drain_events()
        .contains(&GameEvent::SiloReloaded { silo_index: 0 }));
}

// ---- Blast resolution ----

#[test]
fn test_blast_destroys_missile_and_scores() {
    let mut engine = started(SimConfig::default());
    parked(&mut engine, BLAST_POINT + Vec2::new(3.0, 0.0));
    engine.fire(BLAST_POINT).unwrap();

    run_for(&mut engine, 1.0);

    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::InterceptorDetonated { .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::EnemyDestroyed {
            kind: MissileKind::Plain,
            points: POINTS_ENEMY_KILL,
            ..
        }
    )));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::MultiKill { .. })));

    let session = engine.session();
    assert_eq!(session.score, POINTS_ENEMY_KILL);
    assert_eq!(session.shots_hit, 1);
    assert_eq!(session.total_enemies_destroyed, 1);
    assert_eq!(engine.alive_enemies(), 0);
    assert!(engine.snapshot().missiles.is_empty());
}

#[test]
fn test_blast_out_of_range_misses() {
    let mut engine = started(SimConfig::default());
    parked(&mut engine, BLAST_POINT + Vec2::new(0.0, BLAST_RADIUS + 10.0));
    engine.fire(BLAST_POINT).unwrap();

    run_for(&mut engine, 1.2);

    assert_eq!(engine.alive_enemies(), 1);
    assert_eq!(engine.session().score, 0);
    // Blast has faded and been cleaned up.
    assert!(engine.snapshot().blasts.is_empty());
}

#[test]
fn test_multi_kill_bonus() {
    let mut engine = started(SimConfig::default());
    parked(&mut engine, BLAST_POINT + Vec2::new(0.0, 5.0));
    parked(&mut engine, BLAST_POINT - Vec2::new(0.0, 5.0));
    engine.fire(BLAST_POINT).unwrap();

    run_for(&mut engine, 1.0);

    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MultiKill {
            count: 2,
            bonus,
            ..
        } if *bonus == 2 * MULTI_KILL_BONUS
    )));
    assert_eq!(
        engine.session().score,
        2 * POINTS_ENEMY_KILL + 2 * MULTI_KILL_BONUS
    );
}

#[test]
fn test_chain_reaction_reaches_past_primary_blast() {
    let mut engine = started(SimConfig {
        chain_reactions: true,
        ..Default::default()
    });
    // The first missile sits near the blast edge; the second is out of the
    // primary radius but inside the secondary one.
    parked(&mut engine, BLAST_POINT + Vec2::new(35.0, 0.0));
    parked(&mut engine, BLAST_POINT + Vec2::new(55.0, 0.0));
    engine.fire(BLAST_POINT).unwrap();

    run_for(&mut engine, 1.5);

    let events = engine.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ChainReaction { depth: 1, .. })));
    assert_eq!(engine.session().total_enemies_destroyed, 2);
    assert_eq!(engine.alive_enemies(), 0);
}

#[test]
fn test_no_chain_reaction_by_default() {
    let mut engine = started(SimConfig::default());
    parked(&mut engine, BLAST_POINT + Vec2::new(35.0, 0.0));
    parked(&mut engine, BLAST_POINT + Vec2::new(55.0, 0.0));
    engine.fire(BLAST_POINT).unwrap();

    run_for(&mut engine, 1.5);

    assert!(!engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::ChainReaction { .. })));
    assert_eq!(engine.session().total_enemies_destroyed, 1);
    assert_eq!(engine.alive_enemies(), 1);
}

// ---- MIRV carriers ----

fn carrier(split_distance: f32, warhead_count: u32) -> MirvPayload {
    MirvPayload {
        split_distance,
        warhead_count,
        has_split: false,
    }
}

#[test]
fn test_mirv_splits_once_in_flight() {
    let mut engine = started(SimConfig::default());
    let center = engine.planet().center;
    engine.spawn_enemy(EnemyMissile::mirv(
        center + Vec2::new(300.0, 0.0),
        center + Vec2::new(PLANET_RADIUS, 0.0),
        100.0,
        carrier(200.0, 3),
    ));

    // Before the first burst of the wave arrives.
    run_for(&mut engine, 1.25);

    let events = engine.drain_events();
    let splits: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MirvSplit { .. }))
        .collect();
    assert_eq!(splits.len(), 1);
    assert!(matches!(splits[0], GameEvent::MirvSplit { warheads: 3, .. }));

    assert_eq!(engine.alive_enemies(), 3);
    let snap = engine.snapshot();
    assert_eq!(snap.missiles.len(), 3);
    assert!(snap
        .missiles
        .iter()
        .all(|m| m.kind == MissileKind::MirvWarhead));
}

#[test]
fn test_wave_waits_for_mirv_warheads() {
    let mut engine = started(SimConfig::default());
    let center = engine.planet().center;
    // Slow enough that its warheads outlive the regular wave.
    engine.spawn_enemy(EnemyMissile::mirv(
        center - Vec2::new(380.0, 0.0),
        center - Vec2::new(PLANET_RADIUS, 0.0),
        20.0,
        carrier(200.0, 2),
    ));

    play_out_wave(&mut engine);
    assert_eq!(engine.phase(), GamePhase::WaveTransition);
    assert_eq!(engine.alive_enemies(), 0);

    let events = engine.drain_events();
    let position = |pred: fn(&GameEvent) -> bool| events.iter().position(pred);
    let split = position(|e| matches!(e, GameEvent::MirvSplit { .. })).expect("carrier should split");
    let complete =
        position(|e| matches!(e, GameEvent::WaveComplete { .. })).expect("wave should complete");
    assert!(split < complete);

    let impacts_before_complete = events[..complete]
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyImpacted { .. }))
        .count();
    assert_eq!(impacts_before_complete as u32, INITIAL_ENEMY_COUNT + 2);
}

// ---- Event order within a tick ----

#[test]
fn test_tick_orders_detonation_hit_then_impact() {
    let mut engine = started(SimConfig::default());
    let center = engine.planet().center;
    let silo = engine.silos().get(0).unwrap().clone();

    // A shot just outside silo 0 detonates on the first tick, onto a
    // missile parked at the aim point.
    let outward = (silo.position - center).normalize();
    let aim = silo.position + outward * 5.0;
    parked(&mut engine, aim);
    assert_eq!(engine.fire(aim), Ok(0));

    // A missile one pixel above the gap between silos 0 and 1 lands the
    // same tick.
    let gap = point_on_circle(center, PLANET_RADIUS, silo.angle + std::f32::consts::PI / 6.0);
    let above = gap + (gap - center).normalize();
    engine.spawn_enemy(EnemyMissile::plain(above, gap, 100.0));
    engine.drain_events();

    engine.tick(DT);

    let events = engine.drain_events();
    let position = |pred: fn(&GameEvent) -> bool| events.iter().position(pred);
    let detonated = position(|e| matches!(e, GameEvent::InterceptorDetonated { .. }))
        .expect("interceptor should detonate");
    let destroyed = position(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
        .expect("parked missile should be hit");
    let impacted = position(|e| matches!(e, GameEvent::EnemyImpacted { silo: None, .. }))
        .expect("missile should land between silos");
    assert!(detonated < destroyed);
    assert!(destroyed < impacted);
    assert_eq!(engine.alive_enemies(), 0);
    assert_eq!(engine.silos().active_count(), INITIAL_SILO_COUNT);
}

// ---- Impacts and game over ----

fn strike_silo_zero(engine: &mut SimulationEngine) {
    let silo = engine.silos().get(0).unwrap().position;
    engine.spawn_enemy(EnemyMissile::plain(silo + Vec2::new(10.0, 0.0), silo, 100.0));
    run_for(engine, 0.2);
}

#[test]
fn test_impact_destroys_silo() {
    let mut engine = started(SimConfig::default());
    strike_silo_zero(&mut engine);

    let events = engine.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyImpacted { silo: Some(0), .. })));
    assert!(events.contains(&GameEvent::SiloDestroyed {
        silo_index: 0,
        remaining: INITIAL_SILO_COUNT - 1,
    }));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.silos[0].state, SiloState::Destroyed);
    assert_eq!(snapshot.score.active_silos, INITIAL_SILO_COUNT - 1);
    assert_eq!(engine.session().wave_silos_lost, 1);
    assert_eq!(engine.phase(), GamePhase::Playing);
}

#[test]
fn test_losing_last_silo_ends_game() {
    let mut engine = started(SimConfig::default());
    engine.session_mut().score = 1234;
    for i in 1..INITIAL_SILO_COUNT {
        engine.silos_mut().get_mut(i).unwrap().destroy();
    }

    strike_silo_zero(&mut engine);

    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert!(!engine.wave_active());
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::AllSilosDestroyed));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::GameOver {
            score: 1234,
            wave: 1,
            high_score: 1234,
            new_high_score: true,
            ..
        }
    )));

    // Nothing advances after game over.
    let ticks = engine.time().tick;
    run_for(&mut engine, 1.0);
    assert_eq!(engine.time().tick, ticks);
}

#[test]
fn test_restart_after_game_over_keeps_high_score() {
    let mut engine = SimulationEngine::with_high_score(SimConfig::default(), 5000);
    engine.start_game();
    engine.session_mut().score = 1234;
    for i in 1..INITIAL_SILO_COUNT {
        engine.silos_mut().get_mut(i).unwrap().destroy();
    }
    strike_silo_zero(&mut engine);
    assert!(engine.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::GameOver {
            high_score: 5000,
            new_high_score: false,
            ..
        }
    )));

    engine.start_game();
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(engine.session().score, 0);
    assert_eq!(engine.session().high_score, 5000);
    assert_eq!(engine.silos().active_count(), INITIAL_SILO_COUNT);
    assert_eq!(engine.alive_enemies(), 0);
}

// ---- Wave completion and upgrade shop ----

#[test]
fn test_wave_completes_and_opens_shop() {
    let mut engine = started(SimConfig::default());
    play_out_wave(&mut engine);
    assert_eq!(engine.phase(), GamePhase::WaveTransition);

    let events = engine.drain_events();
    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned as u32, INITIAL_ENEMY_COUNT);
    assert!(events.contains(&GameEvent::WaveAllSpawned { wave: 1 }));

    let bonus = events
        .iter()
        .find_map(|e| match e {
            GameEvent::WaveComplete { wave: 1, bonus, .. } => Some(*bonus),
            _ => None,
        })
        .expect("wave should complete");
    assert!(bonus >= WAVE_CLEAR_BONUS);
    assert_eq!(engine.session().score, bonus);

    // Shots are refused between waves.
    assert_eq!(engine.fire(BLAST_POINT), Err(ShotRejection::NotPlaying));

    run_for(&mut engine, WAVE_TRANSITION_DELAY + 0.1);
    assert_eq!(engine.phase(), GamePhase::UpgradeShop);
    assert!(engine
        .drain_events()
        .contains(&GameEvent::UpgradeShopOpened { wave: 1 }));
}

#[test]
fn test_shop_purchase_and_next_wave() {
    let mut engine = started(SimConfig::default());
    play_out_wave(&mut engine);
    run_for(&mut engine, WAVE_TRANSITION_DELAY + 0.1);
    engine.drain_events();

    engine.session_mut().score = 1500;
    engine.queue_command(PlayerCommand::PurchaseUpgrade {
        upgrade: UpgradeId::BlastRadius,
    });
    engine.tick(DT);
    assert_eq!(engine.session().upgrades.blast_radius, 1);
    assert_eq!(engine.session().score, 0);
    assert_eq!(engine.session().effective_blast_radius(), BLAST_RADIUS + 6.0);

    assert!(!engine.purchase_upgrade(UpgradeId::BlastRadius));
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::UpgradePurchased {
        upgrade: UpgradeId::BlastRadius,
        level: 1,
        score: 0,
    }));
    assert!(events.contains(&GameEvent::UpgradeRejected {
        upgrade: UpgradeId::BlastRadius,
    }));

    engine.queue_command(PlayerCommand::StartNextWave);
    engine.tick(DT);
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(engine.session().current_wave, 2);
    assert!(engine.drain_events().contains(&GameEvent::WaveStarted {
        wave: 2,
        enemy_count: INITIAL_ENEMY_COUNT + ENEMY_COUNT_ESCALATION,
    }));
}

#[test]
fn test_silo_repair_restores_destroyed_silo() {
    let mut engine = started(SimConfig::default());
    play_out_wave(&mut engine);
    run_for(&mut engine, WAVE_TRANSITION_DELAY + 0.1);

    engine.silos_mut().get_mut(2).unwrap().destroy();
    engine.session_mut().score = SILO_REPAIR_COST_MULT;

    assert!(engine.purchase_upgrade(UpgradeId::SiloRepair));
    assert!(engine.silos().get(2).unwrap().is_ready());
    assert_eq!(engine.silos().active_count(), INITIAL_SILO_COUNT);
    assert_eq!(engine.session().score, 0);

    // Nothing left to repair.
    engine.session_mut().score = SILO_REPAIR_COST_MULT;
    assert!(!engine.purchase_upgrade(UpgradeId::SiloRepair));
}

#[test]
fn test_purchase_refused_outside_shop() {
    let mut engine = started(SimConfig::default());
    engine.session_mut().score = 10_000;
    assert!(!engine.purchase_upgrade(UpgradeId::InterceptorSpeed));
    assert_eq!(engine.session().score, 10_000);
    assert_eq!(engine.session().upgrades.interceptor_speed, 0);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_reflects_world() {
    let mut engine = started(SimConfig::default());
    parked(&mut engine, BLAST_POINT);
    engine.fire(Vec2::new(300.0, 100.0)).unwrap();
    engine.tick(DT);

    let snap = engine.snapshot();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.silos.len(), INITIAL_SILO_COUNT);
    assert_eq!(snap.missiles.len(), 1);
    assert_eq!(snap.missiles[0].kind, MissileKind::Plain);
    assert_eq!(snap.interceptors.len(), 1);
    let progress = snap.interceptors[0].progress;
    assert!(progress > 0.0 && progress < 1.0);
    assert_eq!(snap.score.wave, 1);
    assert_eq!(snap.score.shots_fired, 1);
    assert_eq!(snap.time.tick, 1);

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Playing\""));
}

// ---- Determinism ----

fn scripted_run(seed: u64) -> (String, String) {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartGame);

    let mut events = Vec::new();
    for tick in 0..600u32 {
        if tick % 45 == 0 {
            let angle = tick as f32 * 0.1;
            engine.queue_command(PlayerCommand::Fire {
                x: 400.0 + angle.cos() * 180.0,
                y: 300.0 + angle.sin() * 180.0,
            });
        }
        engine.tick(DT);
        events.extend(engine.drain_events());
    }

    (
        serde_json::to_string(&events).unwrap(),
        serde_json::to_string(&engine.snapshot()).unwrap(),
    )
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_run(12345), scripted_run(12345));
}

#[test]
fn test_determinism_different_seeds() {
    let (events_a, _) = scripted_run(111);
    let (events_b, _) = scripted_run(222);
    assert_ne!(events_a, events_b, "different seeds should diverge");
}

// ---- Spawn geometry ----

proptest! {
    #[test]
    fn test_target_points_lie_on_planet_surface(seed in any::<u64>(), silo in proptest::option::of(0.0f32..std::f32::consts::TAU)) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let center = Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0);
        let target = generate_target_point(&mut rng, center, PLANET_RADIUS, silo);
        prop_assert!((target.distance(center) - PLANET_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_spawn_points_stay_on_screen(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let center = Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0);
        let target = generate_target_point(&mut rng, center, PLANET_RADIUS, None);
        let screen = Vec2::new(GAME_WIDTH, GAME_HEIGHT);
        let spawn = generate_spawn_point(&mut rng, target, center, PLANET_RADIUS, screen);
        prop_assert!(spawn.x >= SPAWN_MARGIN && spawn.x <= GAME_WIDTH - SPAWN_MARGIN);
        prop_assert!(spawn.y >= SPAWN_MARGIN && spawn.y <= GAME_HEIGHT - SPAWN_MARGIN);
        prop_assert!(spawn.distance(center) >= PLANET_RADIUS);
    }
}
