//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Timer engine: the work/break state machine and its tick scheduler
//! - Sound playback with a fallback chain for phase alarms
//! - CLI argument parsing, interactive commands and display formatting
//! - The presenter event loop tying them together
//! - Type definitions for configuration and state

pub mod app;
pub mod cli;
pub mod engine;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, TimerConfig, TimerPhase, TimerSnapshot, TimerState};

pub use engine::{ManualScheduler, Scheduler, TickHandle, TimerEngine, TimerEvent, TokioScheduler};

pub use app::{App, OutputMode};

// Re-export sound types
pub use sound::{
    try_create_player, AlarmOutcome, AlarmPlayer, MockSoundPlayer, RodioSoundPlayer, SoundError,
    SoundPlayer, SoundSource,
};
