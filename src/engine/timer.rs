//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the work/break state machine:
//! - Commands: start, pause/resume, reset
//! - One-second ticks requested through a [`Scheduler`]
//! - Alarm and phase-switch events at each phase boundary
//!
//! Every command is total. Calls outside their precondition are logged
//! and ignored rather than reported as errors.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::types::{TimerConfig, TimerPhase, TimerSnapshot, TimerState};

use super::scheduler::{Scheduler, TickHandle};

/// Interval between two countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// Events emitted by the engine for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started (or restarted after a phase switch)
    Started {
        /// Phase being counted down
        phase: TimerPhase,
    },
    /// Countdown suspended
    Paused,
    /// Countdown continued after a pause
    Resumed,
    /// One second elapsed
    Tick {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// Phase boundary reached; an audio cue should play
    Alarm {
        /// The phase that just ran out
        completed: TimerPhase,
    },
    /// The next phase has been loaded and the countdown stopped
    PhaseSwitched {
        /// The new current phase
        phase: TimerPhase,
        /// Completed work sessions after the switch
        sessions_completed: u32,
    },
    /// Timer returned to its initial state
    Reset,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// The Pomodoro state machine.
///
/// Owns the countdown state and at most one outstanding scheduled tick.
pub struct TimerEngine<S: Scheduler> {
    config: TimerConfig,
    state: TimerState,
    scheduler: S,
    pending: Option<TickHandle>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl<S: Scheduler> TimerEngine<S> {
    /// Creates an idle engine at the start of a work phase.
    pub fn new(
        config: TimerConfig,
        scheduler: S,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
            scheduler,
            pending: None,
            event_tx,
        }
    }

    /// Starts counting down the current phase.
    ///
    /// No-op if already running.
    pub fn start(&mut self) {
        if !self.state.start() {
            debug!("start ignored: timer already running");
            return;
        }

        debug!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "timer started");
        self.emit(TimerEvent::Started {
            phase: self.state.phase,
        });
        self.arm();
    }

    /// Toggles between paused and resumed.
    ///
    /// Pausing cancels the pending tick; resuming requests a fresh one and
    /// continues from the exact remaining value. No-op if not running.
    pub fn pause(&mut self) {
        match self.state.toggle_pause() {
            None => debug!("pause ignored: timer not running"),
            Some(true) => {
                self.disarm();
                debug!(remaining = self.state.remaining_seconds, "timer paused");
                self.emit(TimerEvent::Paused);
            }
            Some(false) => {
                debug!(remaining = self.state.remaining_seconds, "timer resumed");
                self.emit(TimerEvent::Resumed);
                self.arm();
            }
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing unless running and unpaused. At the phase boundary the
    /// alarm fires and the engine switches phase instead of decrementing.
    pub fn tick(&mut self) {
        if !self.state.is_counting() {
            return;
        }

        if self.state.decrement() {
            self.emit(TimerEvent::Tick {
                remaining_seconds: self.state.remaining_seconds,
            });
            self.arm();
        } else {
            self.emit(TimerEvent::Alarm {
                completed: self.state.phase,
            });
            self.switch_phase();
        }
    }

    /// Loads the next phase and stops the countdown.
    ///
    /// Leaving a work phase counts one completed session. The timer is left
    /// idle so the next phase needs a manual start.
    pub fn switch_phase(&mut self) {
        self.disarm();
        self.state.switch_phase(&self.config);

        info!(
            phase = %self.state.phase,
            sessions = self.state.sessions_completed,
            "phase switched"
        );
        self.emit(TimerEvent::PhaseSwitched {
            phase: self.state.phase,
            sessions_completed: self.state.sessions_completed,
        });
    }

    /// Returns to the initial state. Always permitted.
    pub fn reset(&mut self) {
        self.disarm();
        self.state.reset(&self.config);

        debug!("timer reset");
        self.emit(TimerEvent::Reset);
    }

    /// Entry point for a fired scheduler tick.
    ///
    /// Returns false if `handle` is not the pending tick; such stale
    /// deliveries are dropped without touching state.
    pub fn on_tick_fired(&mut self, handle: TickHandle) -> bool {
        if self.pending != Some(handle) {
            debug!(handle = handle.id(), "stale tick dropped");
            return false;
        }
        self.pending = None;
        self.tick();
        true
    }

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a serializable view of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from_state(&self.state)
    }

    /// Returns true if a tick is currently scheduled.
    pub fn has_pending_tick(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the scheduler mutably, e.g. to fire a manual tick.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Requests the next tick, replacing any outstanding one.
    fn arm(&mut self) {
        self.disarm();
        self.pending = Some(self.scheduler.schedule_after(TICK_INTERVAL));
    }

    /// Cancels the outstanding tick, if any.
    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("timer event receiver closed");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
