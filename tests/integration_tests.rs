//! Integration tests for the timer engine and presenter.
//!
//! These tests drive the public API through whole work/break cycles:
//! - Engine with a manual scheduler, fired tick by tick
//! - Engine with the tokio scheduler under paused time
//! - Presenter with a mock sound player and captured output

use std::time::Duration;

use tokio::sync::mpsc;

use pomodoro_timer::app::{App, OutputMode};
use pomodoro_timer::cli::UserCommand;
use pomodoro_timer::sound::{AlarmPlayer, MockSoundPlayer};
use pomodoro_timer::{
    ManualScheduler, TimerConfig, TimerEngine, TimerEvent, TimerPhase, TokioScheduler,
};

// ============================================================================
// Test Helpers
// ============================================================================

type ManualEngine = TimerEngine<ManualScheduler>;

/// Creates an engine driven by a manual scheduler.
fn create_engine(config: TimerConfig) -> (ManualEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TimerEngine::new(config, ManualScheduler::new(), tx), rx)
}

/// Fires the oldest scheduled tick. Returns false if none was scheduled.
fn fire(engine: &mut ManualEngine) -> bool {
    match engine.scheduler_mut().take_due() {
        Some(handle) => engine.on_tick_fired(handle),
        None => false,
    }
}

/// Fires `count` ticks in a row.
fn fire_n(engine: &mut ManualEngine, count: usize) {
    for _ in 0..count {
        assert!(fire(engine), "expected a scheduled tick");
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Short phases so whole cycles stay small.
fn short_config() -> TimerConfig {
    TimerConfig::default()
        .with_work_seconds(3)
        .with_break_seconds(2)
}

// ============================================================================
// Full Cycle
// ============================================================================

#[test]
fn test_full_pomodoro_cycle() {
    let (mut engine, mut rx) = create_engine(short_config());

    engine.start();
    fire_n(&mut engine, 3);
    assert_eq!(engine.state().remaining_seconds, 0);
    assert!(engine.state().running);

    // Boundary tick
    fire_n(&mut engine, 1);
    let state = engine.state();
    assert_eq!(state.phase, TimerPhase::Break);
    assert_eq!(state.remaining_seconds, 2);
    assert_eq!(state.sessions_completed, 1);
    assert!(!state.running);
    assert!(!engine.has_pending_tick());

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![
            TimerEvent::Started {
                phase: TimerPhase::Work
            },
            TimerEvent::Tick {
                remaining_seconds: 2
            },
            TimerEvent::Tick {
                remaining_seconds: 1
            },
            TimerEvent::Tick {
                remaining_seconds: 0
            },
            TimerEvent::Alarm {
                completed: TimerPhase::Work
            },
            TimerEvent::PhaseSwitched {
                phase: TimerPhase::Break,
                sessions_completed: 1
            },
        ]
    );

    // Break needs a manual start
    assert!(!fire(&mut engine));
    engine.start();
    fire_n(&mut engine, 3);

    let state = engine.state();
    assert_eq!(state.phase, TimerPhase::Work);
    assert_eq!(state.remaining_seconds, 3);
    assert_eq!(state.sessions_completed, 1);
    assert!(!state.running);

    let events = drain(&mut rx);
    assert!(events.contains(&TimerEvent::Alarm {
        completed: TimerPhase::Break
    }));
}

#[test]
fn test_default_work_phase_ends_after_1500_ticks() {
    let (mut engine, mut rx) = create_engine(TimerConfig::default());

    engine.start();
    fire_n(&mut engine, 1500);
    assert_eq!(engine.state().remaining_seconds, 0);
    assert_eq!(engine.state().phase, TimerPhase::Work);

    fire_n(&mut engine, 1);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, TimerPhase::Break);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert_eq!(snapshot.clock, "05:00");
    assert_eq!(snapshot.sessions_completed, 1);

    let alarms = drain(&mut rx)
        .into_iter()
        .filter(|e| matches!(e, TimerEvent::Alarm { .. }))
        .count();
    assert_eq!(alarms, 1);
}

#[test]
fn test_sessions_count_only_work_phases() {
    let (mut engine, _rx) = create_engine(short_config());

    for _ in 0..3 {
        // Work
        engine.start();
        fire_n(&mut engine, 4);
        // Break
        engine.start();
        fire_n(&mut engine, 3);
    }

    assert_eq!(engine.state().sessions_completed, 3);
    assert_eq!(engine.state().phase, TimerPhase::Work);
}

// ============================================================================
// Pause / Resume
// ============================================================================

#[test]
fn test_pause_blocks_ticks_and_resume_continues() {
    let (mut engine, _rx) = create_engine(TimerConfig::default());

    engine.start();
    fire_n(&mut engine, 10);
    assert_eq!(engine.state().remaining_seconds, 1490);

    engine.pause();
    assert!(engine.state().paused);
    assert!(!fire(&mut engine));
    assert_eq!(engine.state().remaining_seconds, 1490);

    engine.pause();
    assert!(!engine.state().paused);
    fire_n(&mut engine, 10);
    assert_eq!(engine.state().remaining_seconds, 1480);
}

#[test]
fn test_stale_tick_after_pause_is_dropped() {
    let (mut engine, _rx) = create_engine(short_config());

    engine.start();
    let stale = engine.scheduler().outstanding()[0].0;
    engine.pause();
    engine.pause();

    assert!(!engine.on_tick_fired(stale));
    assert_eq!(engine.state().remaining_seconds, 3);
    assert_eq!(engine.scheduler().outstanding().len(), 1);
}

#[test]
fn test_at_most_one_outstanding_tick() {
    let (mut engine, _rx) = create_engine(short_config());

    engine.start();
    engine.start();
    engine.pause();
    engine.pause();
    engine.pause();
    engine.pause();
    assert!(engine.scheduler().outstanding().len() <= 1);

    fire_n(&mut engine, 2);
    assert_eq!(engine.scheduler().outstanding().len(), 1);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_mid_break() {
    let (mut engine, mut rx) = create_engine(short_config());

    engine.start();
    fire_n(&mut engine, 4);
    engine.start();
    fire_n(&mut engine, 1);
    assert_eq!(engine.state().phase, TimerPhase::Break);

    engine.reset();
    let state = engine.state();
    assert_eq!(state.phase, TimerPhase::Work);
    assert_eq!(state.remaining_seconds, 3);
    assert_eq!(state.sessions_completed, 0);
    assert!(!state.running);
    assert!(!state.paused);
    assert!(engine.scheduler().outstanding().is_empty());
    assert_eq!(drain(&mut rx).last(), Some(&TimerEvent::Reset));
}

#[test]
fn test_commands_are_total() {
    let (mut engine, _rx) = create_engine(short_config());

    // Nothing running yet
    engine.pause();
    engine.tick();
    engine.reset();
    engine.reset();

    let state = engine.state();
    assert_eq!(state.remaining_seconds, 3);
    assert!(!state.running);
    assert!(!state.paused);
}

// ============================================================================
// Tokio Scheduler
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_drives_a_phase() {
    let (scheduler, mut fired) = TokioScheduler::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(short_config(), scheduler, tx);

    engine.start();
    for _ in 0..4 {
        let handle = fired.recv().await.expect("tick should fire");
        assert!(engine.on_tick_fired(handle));
    }

    assert_eq!(engine.state().phase, TimerPhase::Break);
    assert!(!engine.has_pending_tick());

    let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert!(events.contains(&TimerEvent::Alarm {
        completed: TimerPhase::Work
    }));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_pause_suppresses_ticks() {
    let (scheduler, mut fired) = TokioScheduler::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(short_config(), scheduler, tx);

    engine.start();
    engine.pause();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(fired.try_recv().is_err());
    assert_eq!(engine.state().remaining_seconds, 3);
}

// ============================================================================
// Presenter
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_app_rings_alarm_at_phase_end() {
    let alarm = AlarmPlayer::new(Some(MockSoundPlayer::new()), "conga.wav").with_bell(false);
    let mut app: App<Vec<u8>, MockSoundPlayer> =
        App::new(short_config(), Some(alarm), OutputMode::Text, Vec::new());

    app.handle_command(UserCommand::Start).unwrap();
    for _ in 0..4 {
        assert!(app.process_next_tick().await.unwrap());
    }

    assert_eq!(app.engine().state().phase, TimerPhase::Break);
    let player = app.alarm().and_then(|a| a.player()).unwrap();
    assert_eq!(player.play_count(), 1);

    let output = String::from_utf8(app.output().clone()).unwrap();
    assert!(output.contains("Work session complete!"));
    assert!(output.contains("[00:02] Take a break!"));
}
