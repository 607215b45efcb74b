//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Phase identification (work / break)
//! - Duration configuration with validation
//! - Timer state and its pure transitions
//! - Serializable snapshots for display output

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default work phase length (25 minutes).
pub const DEFAULT_WORK_SECONDS: u32 = 25 * 60;

/// Default break phase length (5 minutes).
pub const DEFAULT_BREAK_SECONDS: u32 = 5 * 60;

/// Upper bound for the work phase, in minutes.
pub const MAX_WORK_MINUTES: u32 = 120;

/// Upper bound for the break phase, in minutes.
pub const MAX_BREAK_MINUTES: u32 = 60;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the interval the countdown currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Focused work interval
    #[default]
    Work,
    /// Rest interval
    Break,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Work => "work",
            TimerPhase::Break => "break",
        }
    }

    /// Returns the status message shown while this phase is current.
    pub fn status_message(&self) -> &'static str {
        match self {
            TimerPhase::Work => "Time to focus!",
            TimerPhase::Break => "Take a break!",
        }
    }

    /// Returns the phase that follows this one.
    pub fn next(&self) -> TimerPhase {
        match self {
            TimerPhase::Work => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Work,
        }
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Errors produced when validating a [`TimerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Work duration outside `1..=MAX_WORK_MINUTES` minutes.
    #[error("work duration must be between 1 second and {MAX_WORK_MINUTES} minutes (got {0}s)")]
    WorkOutOfRange(u32),

    /// Break duration outside `1..=MAX_BREAK_MINUTES` minutes.
    #[error("break duration must be between 1 second and {MAX_BREAK_MINUTES} minutes (got {0}s)")]
    BreakOutOfRange(u32),
}

/// Phase durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work phase length in seconds
    pub work_seconds: u32,
    /// Break phase length in seconds
    pub break_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            break_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

impl TimerConfig {
    /// Sets the work duration in minutes.
    pub fn with_work_minutes(self, minutes: u32) -> Self {
        self.with_work_seconds(minutes.saturating_mul(60))
    }

    /// Sets the break duration in minutes.
    pub fn with_break_minutes(self, minutes: u32) -> Self {
        self.with_break_seconds(minutes.saturating_mul(60))
    }

    /// Sets the work duration in seconds.
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Sets the break duration in seconds.
    pub fn with_break_seconds(mut self, seconds: u32) -> Self {
        self.break_seconds = seconds;
        self
    }

    /// Returns the length of the given phase in seconds.
    pub fn duration_of(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Work => self.work_seconds,
            TimerPhase::Break => self.break_seconds,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_seconds == 0 || self.work_seconds > MAX_WORK_MINUTES * 60 {
            return Err(ConfigError::WorkOutOfRange(self.work_seconds));
        }
        if self.break_seconds == 0 || self.break_seconds > MAX_BREAK_MINUTES * 60 {
            return Err(ConfigError::BreakOutOfRange(self.break_seconds));
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The countdown state owned by the timer engine.
///
/// The transitions here are pure bookkeeping; scheduling of the next tick
/// is the engine's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Current phase
    pub phase: TimerPhase,
    /// True once started, false after reset or a phase switch
    pub running: bool,
    /// True only while running and suspended
    pub paused: bool,
    /// Completed work phases since the last reset
    pub sessions_completed: u32,
}

impl TimerState {
    /// Creates the initial state: idle, at the start of a work phase.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            remaining_seconds: config.work_seconds,
            phase: TimerPhase::Work,
            running: false,
            paused: false,
            sessions_completed: 0,
        }
    }

    /// Marks the timer as running and unpaused.
    ///
    /// Returns false (and changes nothing) if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.paused = false;
        true
    }

    /// Flips the pause flag.
    ///
    /// Returns the new pause flag, or `None` if the timer is not running.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        if !self.running {
            return None;
        }
        self.paused = !self.paused;
        Some(self.paused)
    }

    /// Returns true if a tick would advance the countdown.
    pub fn is_counting(&self) -> bool {
        self.running && !self.paused
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns false if the countdown is already at the phase boundary.
    pub fn decrement(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        true
    }

    /// Moves to the next phase and stops the countdown.
    ///
    /// Leaving a work phase counts one completed session.
    pub fn switch_phase(&mut self, config: &TimerConfig) {
        if self.phase == TimerPhase::Work {
            self.sessions_completed += 1;
        }
        self.phase = self.phase.next();
        self.remaining_seconds = config.duration_of(self.phase);
        self.running = false;
        self.paused = false;
    }

    /// Restores the initial state.
    pub fn reset(&mut self, config: &TimerConfig) {
        *self = Self::new(config);
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only, serializable view of the timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds left in the current phase
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Remaining time formatted as `MM:SS`
    pub clock: String,
    /// Whether the countdown has been started
    pub running: bool,
    /// Whether the countdown is suspended
    pub paused: bool,
    /// Completed work sessions
    #[serde(rename = "sessionsCompleted")]
    pub sessions_completed: u32,
}

impl TimerSnapshot {
    /// Creates a snapshot from the timer state.
    pub fn from_state(state: &TimerState) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            clock: format_clock(state.remaining_seconds),
            running: state.running,
            paused: state.paused,
            sessions_completed: state.sessions_completed,
        }
    }
}

/// Formats seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so 7200 seconds renders as `120:00`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
