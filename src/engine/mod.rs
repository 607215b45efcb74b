//! Timer engine for the Pomodoro Timer.
//!
//! This module contains the countdown core:
//! - `timer`: the work/break state machine and its events
//! - `scheduler`: the scheduling port that delivers one-second ticks

pub mod scheduler;
pub mod timer;

pub use scheduler::{ManualScheduler, Scheduler, TickHandle, TokioScheduler};
pub use timer::{TimerEngine, TimerEvent, TICK_INTERVAL};
