//! Game loop thread: owns the engine and advances it at a fixed tick.
//!
//! The engine is created inside this thread. Commands arrive via `mpsc`
//! channel; the loop ends on `Shutdown`, at game over, or when a wave or
//! tick limit is reached, and hands back a summary of the run.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use planet_defense_core::commands::PlayerCommand;
use planet_defense_core::constants::{DT, TICK_RATE};
use planet_defense_core::enums::GamePhase;
use planet_defense_core::events::GameEvent;
use planet_defense_core::upgrades::UpgradeId;
use planet_defense_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Commands from the host to the game loop thread.
#[derive(Debug)]
pub enum EngineCommand {
    Player(PlayerCommand),
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct LoopOptions {
    /// Stop once the shop opens after this wave.
    pub max_waves: Option<u32>,
    pub max_ticks: u64,
    /// Pace ticks to wall-clock time instead of running flat out.
    pub realtime: bool,
    pub autopilot: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_waves: None,
            max_ticks: 60 * 60 * u64::from(TICK_RATE),
            realtime: false,
            autopilot: true,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    GameOver,
    WaveLimit,
    TickLimit,
    Shutdown,
}

/// Outcome of one run, reported when the loop thread exits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub reason: StopReason,
    pub score: u32,
    pub wave: u32,
    pub accuracy: f32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub enemies_destroyed: u32,
    pub ticks: u64,
}

/// Spawns the game loop in a new thread and starts a game.
///
/// Returns the command sender and the handle yielding the run summary.
pub fn spawn_game_loop(
    config: SimConfig,
    high_score: u32,
    options: LoopOptions,
) -> io::Result<(mpsc::Sender<EngineCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
    cmd_tx
        .send(EngineCommand::Player(PlayerCommand::StartGame))
        .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "game loop channel closed"))?;

    let handle = std::thread::Builder::new()
        .name("planet-defense-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::with_high_score(config, high_score);
            run_game_loop(engine, cmd_rx, &options)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until a stop condition or channel disconnect.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    options: &LoopOptions,
) -> RunSummary {
    let mut autopilot = options.autopilot.then(Autopilot::new);
    let mut next_tick_time = Instant::now();
    let mut new_high_score = false;

    let reason = loop {
        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(EngineCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(EngineCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if shutdown {
            break StopReason::Shutdown;
        }

        // 2. Autopilot decisions on the current state
        if let Some(pilot) = autopilot.as_mut() {
            let commands = pilot.plan(&engine);
            engine.queue_commands(commands);
        }

        // 3. Advance one tick
        engine.tick(DT);

        // 4. Log what happened
        let mut wave_limit_hit = false;
        for event in engine.drain_events() {
            log_event(&event);
            match event {
                GameEvent::UpgradeShopOpened { wave } => {
                    log_shop(&engine);
                    wave_limit_hit |= options.max_waves.is_some_and(|max| wave >= max);
                }
                GameEvent::GameOver {
                    new_high_score: record,
                    ..
                } => new_high_score = record,
                _ => {}
            }
        }

        // 5. Stop conditions
        if engine.phase() == GamePhase::GameOver {
            break StopReason::GameOver;
        }
        if wave_limit_hit {
            break StopReason::WaveLimit;
        }
        if engine.time().tick >= options.max_ticks {
            break StopReason::TickLimit;
        }

        // 6. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind: reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    };

    // A run cut short still counts toward the high score.
    if reason != StopReason::GameOver {
        new_high_score = engine.session_mut().record_high_score();
    }
    summarize(&engine, reason, new_high_score)
}

fn summarize(engine: &SimulationEngine, reason: StopReason, new_high_score: bool) -> RunSummary {
    let session = engine.session();
    RunSummary {
        reason,
        score: session.score,
        wave: session.current_wave,
        accuracy: session.overall_accuracy(),
        high_score: session.high_score,
        new_high_score,
        enemies_destroyed: session.total_enemies_destroyed,
        ticks: engine.time().tick,
    }
}

fn log_shop(engine: &SimulationEngine) {
    let session = engine.session();
    for id in UpgradeId::ALL {
        let spec = id.spec();
        debug!(
            upgrade = spec.name,
            description = spec.description,
            level = session.upgrades.level_for(id),
            cost = ?session.upgrade_cost(id),
            score = session.score,
            "shop offer"
        );
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::WaveComplete {
            wave,
            bonus,
            accuracy,
        } => info!(wave, bonus, accuracy, "wave cleared"),
        GameEvent::SiloDestroyed {
            silo_index,
            remaining,
        } => info!(silo = silo_index, remaining, "silo lost"),
        GameEvent::UpgradePurchased {
            upgrade,
            level,
            score,
        } => info!(upgrade = upgrade.spec().name, level, score, "upgrade bought"),
        GameEvent::GameOver { score, wave, .. } => info!(score, wave, "run over"),
        GameEvent::EnemySpawned { .. }
        | GameEvent::InterceptorLaunched { .. }
        | GameEvent::InterceptorDetonated { .. }
        | GameEvent::SiloReloaded { .. }
        | GameEvent::ScoreChanged { .. } => {}
        other => debug!(?other, "event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<EngineCommand>();

        tx.send(EngineCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(EngineCommand::Player(PlayerCommand::Pause)).unwrap();
        tx.send(EngineCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            EngineCommand::Player(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            EngineCommand::Player(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], EngineCommand::Shutdown));
    }

    #[test]
    fn test_tick_limit_stops_loop() {
        let (tx, rx) = mpsc::channel();
        tx.send(EngineCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        let options = LoopOptions {
            max_ticks: 120,
            autopilot: false,
            ..Default::default()
        };

        let summary = run_game_loop(SimulationEngine::new(SimConfig::default()), rx, &options);
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(summary.ticks, 120);
        assert_eq!(summary.wave, 1);
        drop(tx);
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let (tx, rx) = mpsc::channel();
        tx.send(EngineCommand::Shutdown).unwrap();
        let summary = run_game_loop(
            SimulationEngine::new(SimConfig::default()),
            rx,
            &LoopOptions::default(),
        );
        assert_eq!(summary.reason, StopReason::Shutdown);
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn test_autopilot_clears_first_wave() {
        let options = LoopOptions {
            max_waves: Some(1),
            max_ticks: 120 * u64::from(TICK_RATE),
            ..Default::default()
        };
        let (tx, handle) = spawn_game_loop(SimConfig::default(), 0, options).unwrap();
        let summary = handle.join().unwrap();
        drop(tx);

        assert_eq!(summary.reason, StopReason::WaveLimit);
        assert_eq!(summary.wave, 1);
        assert!(summary.score >= 500);
        assert!(summary.enemies_destroyed > 0);
        assert_eq!(summary.high_score, summary.score);
    }

    #[test]
    fn test_tick_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
